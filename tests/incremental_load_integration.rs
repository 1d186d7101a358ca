//! Incremental load integration tests
//!
//! Exercises the loader against a SQLite database on disk, including the
//! full pipeline path from raw listings to the stored reference table.

use housing_monitor::dataset::{read_csv, Column, ColumnType, Dataset};
use housing_monitor::storage::{DedupConfig, IncrementalLoader, SqliteStore, TableStore};
use housing_monitor::{Pipeline, PipelineConfig};
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

fn xs(values: &[f64]) -> Dataset {
    Dataset::from_columns(vec![Column::from_f64("x", values.iter().copied())]).unwrap()
}

const LISTINGS: &str = "\
year,n_bedrooms,n_bathrooms,price,price_per_sqft,size_sqft,region,area,title,road_name,scraped_date
1990,3,2,600000,600,1000,Central,Bishan,1 Bishan Rd,Bishan Rd,2025-03-01 10:00:00
2005,4,2,550000,458,1200,North,Woodlands,22A Woodlands Ave,Woodlands Ave,2025-03-02 11:30:00
,2,1,450000,500,900,East,Tampines,301 Tampines St,Tampines St,2025-03-03
";

// =============================================================================
// Loader Against SQLite
// =============================================================================

#[test]
fn test_first_load_then_reload_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::open(dir.path().join("housing.db")).unwrap();
    let loader = IncrementalLoader::default();

    let first = loader.load(&mut store, "housing_data", &xs(&[1.0, 2.0, 3.0, 4.0])).unwrap();
    assert!(first.first_load);
    assert_eq!(first.appended, 4);

    let again = loader.load(&mut store, "housing_data", &xs(&[1.0, 2.0, 3.0, 4.0])).unwrap();
    assert!(!again.first_load);
    assert_eq!(again.appended, 0);
    assert_eq!(store.read_table("housing_data").unwrap().n_rows(), 4);
}

#[test]
fn test_delta_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("housing.db");
    let loader = IncrementalLoader::default();

    {
        let mut store = SqliteStore::open(&db).unwrap();
        loader.load(&mut store, "housing_data", &xs(&[1.0, 2.0, 3.0])).unwrap();
    }

    let mut store = SqliteStore::open(&db).unwrap();
    let outcome = loader.load(&mut store, "housing_data", &xs(&[2.0, 3.0, 4.0, 5.0])).unwrap();
    assert_eq!(outcome.appended, 2);

    let table = store.read_table("housing_data").unwrap();
    let values: Vec<f64> = table.numeric("x").unwrap().iter().flatten().copied().collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_rounded_dedup_absorbs_float_noise() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::open(dir.path().join("housing.db")).unwrap();
    IncrementalLoader::default().load(&mut store, "t", &xs(&[0.1 + 0.2])).unwrap();

    let stored = store.read_table("t").unwrap();
    let exact = IncrementalLoader::default().load_delta(Some(&stored), &xs(&[0.3])).unwrap();
    assert_eq!(exact.n_rows(), 1);

    let rounded = IncrementalLoader::new(DedupConfig { float_decimals: Some(6) });
    let outcome = rounded.load(&mut store, "t", &xs(&[0.3])).unwrap();
    assert_eq!(outcome.appended, 0);
}

#[test]
fn test_batch_with_extra_columns_keeps_stored_schema() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::open(dir.path().join("housing.db")).unwrap();
    let loader = IncrementalLoader::default();
    loader.load(&mut store, "t", &xs(&[1.0])).unwrap();

    let batch = Dataset::from_columns(vec![
        Column::from_labels("source", ["portal", "portal"]),
        Column::from_f64("x", [1.0, 7.0]),
    ])
    .unwrap();
    let outcome = loader.load(&mut store, "t", &batch).unwrap();
    assert_eq!(outcome.appended, 1);

    let table = store.read_table("t").unwrap();
    assert_eq!(table.column_names(), vec!["x"]);
    assert_eq!(table.n_rows(), 2);
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_pipeline_engineers_and_loads_listings() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("cleaned.csv");
    std::fs::write(&csv_path, LISTINGS).unwrap();

    let mut config = PipelineConfig::default();
    config.storage.database = dir.path().join("housing.db");
    config.drift.report_path = dir.path().join("drift_report.csv");
    let mut pipeline = Pipeline::open(config).unwrap();

    let batch = read_csv(&csv_path, None).unwrap();
    let outcome = pipeline.ingest(&batch).unwrap();
    // The listing without a build year is dropped
    assert_eq!(outcome.appended, 2);
    assert_eq!(pipeline.ingest(&batch).unwrap().appended, 0);

    let table = pipeline.store().read_table(pipeline.table()).unwrap();
    assert!(table.column("title").is_none());
    assert_eq!(table.column("flat_age").map(Column::column_type), Some(ColumnType::Numeric));
    assert_eq!(table.column("street").map(Column::column_type), Some(ColumnType::Categorical));

    let is_mature: Vec<f64> =
        table.numeric("is_mature_town").unwrap().iter().flatten().copied().collect();
    assert_eq!(is_mature, vec![1.0, 0.0]);
}

#[test]
fn test_pipeline_reset_empties_reference() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default();
    config.features.enabled = false;
    config.storage.database = dir.path().join("housing.db");
    let mut pipeline = Pipeline::open(config).unwrap();

    pipeline.ingest(&xs(&[1.0, 2.0])).unwrap();
    pipeline.reset().unwrap();
    assert!(!pipeline.store().table_exists(pipeline.table()).unwrap());

    let outcome = pipeline.ingest(&xs(&[1.0, 2.0])).unwrap();
    assert!(outcome.first_load);
    assert_eq!(outcome.appended, 2);
}

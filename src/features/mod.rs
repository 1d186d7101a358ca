//! Listing validation and feature engineering
//!
//! Runs on a cleaned scrape batch before it is loaded into the reference
//! table: drops invalid and duplicate listings, then derives age, lease,
//! ratio, date and location features.

mod clean;

pub use clean::{clean_listings, RAW_COLUMNS};

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::{Column, ColumnType, Dataset};
use crate::error::{Error, Result};

/// Columns every listing batch must carry
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "year",
    "n_bedrooms",
    "n_bathrooms",
    "price",
    "price_per_sqft",
    "size_sqft",
    "region",
    "area",
    "title",
    "scraped_date",
];

const NUMERIC_INPUTS: [&str; 6] =
    ["year", "n_bedrooms", "n_bathrooms", "price", "price_per_sqft", "size_sqft"];

const TEXT_INPUTS: [&str; 4] = ["region", "area", "title", "scraped_date"];

/// Export artifacts dropped from the output
const DROPPED_COLUMNS: [&str; 3] = ["title", "Unnamed: 0", "Unnamed: 0.1"];

const BLOCK_PATTERN: &str = r"^(\d+\w?)";

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Feature engineering settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Run feature engineering before loading
    pub enabled: bool,
    /// Clean raw scrape text (`S$ 1,200,000`, `3 Beds`) before validation
    pub clean: bool,
    /// Year flat age is measured against
    pub reference_year: i32,
    /// Lease length in years
    pub lease_years: u32,
    /// Towns flagged by `is_mature_town`
    pub mature_towns: Vec<String>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            clean: false,
            reference_year: 2025,
            lease_years: 99,
            mature_towns: [
                "Ang Mo Kio",
                "Bedok",
                "Bishan",
                "Bukit Merah",
                "Bukit Timah",
                "Central Area",
                "Clementi",
                "Geylang",
                "Kallang/Whampoa",
                "Marine Parade",
                "Pasir Ris",
                "Queenstown",
                "Serangoon",
                "Tampines",
                "Toa Payoh",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Validate a listing batch and append derived features.
///
/// Rows without a build year, exact duplicate rows and rows with non-positive
/// bedroom or bathroom counts are removed first. `year` becomes `build_year`,
/// `road_name` becomes `street` and `title` is replaced by its leading block
/// number.
pub fn engineer_features(config: &FeatureConfig, listings: &Dataset) -> Result<Dataset> {
    for name in REQUIRED_COLUMNS {
        listings.require(name)?;
    }

    let mut data = listings.clone();
    let unparsed = cast_numeric_inputs(&mut data)?;
    if unparsed > 0 {
        warn!(unparsed, "listing cells could not be parsed as numbers and are treated as missing");
    }
    for name in TEXT_INPUTS {
        data.cast_column(name, ColumnType::Categorical)?;
    }

    let before = data.n_rows();
    let data = drop_missing_year(&data)?;
    let data = drop_duplicate_rows(&data);
    let data = keep_positive_rooms(&data)?;
    debug!(before, after = data.n_rows(), "listings validated");

    derive(config, &data)
}

/// Cast the numeric inputs in place and count the cells the cast lost
fn cast_numeric_inputs(data: &mut Dataset) -> Result<usize> {
    let mut unparsed = 0;
    for name in NUMERIC_INPUTS {
        let observed = data.require(name)?.data().observed_count();
        data.cast_column(name, ColumnType::Numeric)?;
        let lost = observed.saturating_sub(data.require(name)?.data().observed_count());
        if lost > 0 {
            debug!(column = name, lost, "cells are not numbers");
        }
        unparsed += lost;
    }
    Ok(unparsed)
}

fn drop_missing_year(data: &Dataset) -> Result<Dataset> {
    let year = data.numeric("year")?;
    let keep: Vec<usize> = (0..data.n_rows()).filter(|&i| year[i].is_some_and(|y| !y.is_nan())).collect();
    Ok(data.take(&keep))
}

fn drop_duplicate_rows(data: &Dataset) -> Dataset {
    let mut seen = HashSet::with_capacity(data.n_rows());
    let keep: Vec<usize> = (0..data.n_rows()).filter(|&i| seen.insert(data.row_key(i, None))).collect();
    data.take(&keep)
}

fn keep_positive_rooms(data: &Dataset) -> Result<Dataset> {
    let bedrooms = data.numeric("n_bedrooms")?;
    let bathrooms = data.numeric("n_bathrooms")?;
    let positive = |v: Option<f64>| v.is_some_and(|x| x > 0.0);
    let keep: Vec<usize> =
        (0..data.n_rows()).filter(|&i| positive(bedrooms[i]) && positive(bathrooms[i])).collect();
    Ok(data.take(&keep))
}

fn zip_with(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    a.iter().zip(b).map(|(x, y)| Some(f((*x)?, (*y)?))).collect()
}

fn flag(values: &[Option<String>], pred: impl Fn(&str) -> bool) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| Some(if v.as_deref().is_some_and(&pred) { 1.0 } else { 0.0 }))
        .collect()
}

/// Parse an ISO date with an optional time part; anything else is missing
pub fn parse_scraped_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    DATE_TIME_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn derive(config: &FeatureConfig, data: &Dataset) -> Result<Dataset> {
    let block_re = Regex::new(BLOCK_PATTERN).map_err(|e| Error::Config(e.to_string()))?;

    let year = data.numeric("year")?;
    let bedrooms = data.numeric("n_bedrooms")?;
    let bathrooms = data.numeric("n_bathrooms")?;
    let price = data.numeric("price")?;
    let price_per_sqft = data.numeric("price_per_sqft")?;
    let size = data.numeric("size_sqft")?;

    let reference_year = f64::from(config.reference_year);
    let lease_years = f64::from(config.lease_years);
    let flat_age: Vec<Option<f64>> = year.iter().map(|y| y.map(|y| reference_year - y)).collect();
    let lease_remaining: Vec<Option<f64>> =
        flat_age.iter().map(|a| a.map(|a| lease_years - a)).collect();

    let scraped: Vec<Option<NaiveDateTime>> = data
        .labels("scraped_date")?
        .iter()
        .map(|v| v.as_deref().and_then(parse_scraped_date))
        .collect();

    let blocks: Vec<Option<String>> = data
        .labels("title")?
        .iter()
        .map(|t| {
            t.as_deref()
                .and_then(|t| block_re.captures(t))
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect();

    let mature: HashSet<&str> = config.mature_towns.iter().map(String::as_str).collect();

    let mut out = Dataset::new();
    for column in data.columns() {
        let column = match column.name() {
            name if DROPPED_COLUMNS.contains(&name) => continue,
            "year" => Column::new("build_year", column.data().clone()),
            "road_name" => Column::new("street", column.data().clone()),
            "scraped_date" => Column::categorical(
                "scraped_date",
                scraped.iter().map(|d| d.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())).collect(),
            ),
            _ => column.clone(),
        };
        out.push_column(column)?;
    }

    let derived = vec![
        Column::numeric("flat_age", flat_age.clone()),
        Column::numeric("lease_remaining", lease_remaining.clone()),
        Column::numeric("price_per_bedroom", zip_with(price, bedrooms, |p, b| p / b)),
        Column::numeric("size_per_room", zip_with(size, bedrooms, |s, b| s / b)),
        Column::numeric("bed_bath_ratio", zip_with(bedrooms, bathrooms, |b, t| b / t)),
        Column::numeric("scraped_month", scraped.iter().map(|d| d.map(|d| f64::from(d.month()))).collect()),
        Column::numeric("scraped_year", scraped.iter().map(|d| d.map(|d| f64::from(d.year()))).collect()),
        Column::numeric("is_central", flag(data.labels("region")?, |r| r.to_lowercase() == "central")),
        Column::numeric("is_mature_town", flag(data.labels("area")?, |a| mature.contains(a))),
        Column::numeric("age_size_interaction", zip_with(&flat_age, size, |a, s| a * s)),
        Column::numeric(
            "lease_price_interaction",
            zip_with(&lease_remaining, price_per_sqft, |l, p| l * p),
        ),
        Column::categorical("block", blocks),
    ];
    for column in derived {
        out.push_column(column)?;
    }
    Ok(out)
}

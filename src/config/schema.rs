//! YAML schema for the pipeline configuration
//!
//! Every component receives its section explicitly; nothing is read from
//! process-wide state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::eval::alert::AlertPolicy;
use crate::eval::drift::{CategoricalTest, DriftConfig};
use crate::features::FeatureConfig;
use crate::storage::DedupConfig;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Complete pipeline configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub storage: StorageConfig,
    pub drift: DriftSection,
    pub alert: AlertPolicy,
    pub dedup: DedupConfig,
    pub features: FeatureConfig,
}

/// Reference table location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Reference table name
    pub table: String,
    /// Drop the table before the next load
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    pub reset_before_load: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("housing.db"),
            table: "housing_data".to_string(),
            reset_before_load: false,
        }
    }
}

/// Comparator settings plus the report destination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSection {
    pub significance: f64,
    pub categorical_test: CategoricalTest,
    pub epsilon: f64,
    /// Where the drift report CSV is written
    pub report_path: PathBuf,
    /// Table in the same database holding the incoming batch, used when no
    /// CSV is given
    pub incoming_table: Option<String>,
}

impl Default for DriftSection {
    fn default() -> Self {
        let detector = DriftConfig::default();
        Self {
            significance: detector.significance,
            categorical_test: detector.categorical_test,
            epsilon: detector.epsilon,
            report_path: PathBuf::from("drift_report.csv"),
            incoming_table: None,
        }
    }
}

impl DriftSection {
    /// Comparator configuration for this section
    pub fn detector_config(&self) -> DriftConfig {
        DriftConfig {
            significance: self.significance,
            categorical_test: self.categorical_test,
            epsilon: self.epsilon,
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("invalid YAML: {e}")))
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;
        serde_yaml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid YAML in {}: {e}", path.display())))
    }

    /// Configuration from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}

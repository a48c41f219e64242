//! Dashboard configuration parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::validate_config_schema;
use crate::catalog::{CatalogError, EvidenceCatalog};

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Evidence catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Input files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPaths {
    /// Annotated variant table (TSV)
    pub variant_table: PathBuf,

    /// Evidence grid; the built-in ACMG table is used when absent
    #[serde(default)]
    pub evidence_table: Option<PathBuf>,

    /// Evidence descriptions; required when `evidence_table` is set
    #[serde(default)]
    pub evidence_details: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            variant_table: PathBuf::from("data/demo-table_clean.tsv"),
            evidence_table: None,
            evidence_details: None,
        }
    }
}

/// Which variant table columns each view shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Columns {
    /// Grid columns
    pub main: Vec<String>,

    /// Fields listed for the selected variant
    pub detail: Vec<String>,

    /// Categorical columns summarised as counts
    pub summary: Vec<String>,

    /// Numeric columns summarised as distributions
    pub distribution: Vec<String>,

    /// Sort keys, ascending, applied when the table is loaded
    pub sort_by: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            main: strings(&[
                "Gene",
                "Protein Change",
                "HGVSg",
                "VAF",
                "Depth",
                "oncokb_level",
                "ClinVar_ClinSig",
                "cancer_hotspot",
                "SIFT",
                "PolyPhen2",
            ]),
            detail: strings(&[
                "Gene",
                "HGVSg",
                "HGVSc",
                "Exon",
                "pop_freq",
                "gnomAD",
                "ClinVar_ClinSig",
                "dbSNP",
            ]),
            summary: strings(&["Variant Type", "Mutation Type"]),
            distribution: strings(&["VAF"]),
            sort_by: strings(&["oncokb_level", "cancer_hotspot", "SIFT", "PolyPhen2"]),
        }
    }
}

/// External link settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Links {
    /// gnomAD dataset used in region links
    pub gnomad_dataset: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            gnomad_dataset: "gnomad_r2_1".to_string(),
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Version of this configuration format
    pub config_version: String,

    /// Title shown on the dashboard
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub data: DataPaths,

    #[serde(default)]
    pub columns: Columns,

    #[serde(default)]
    pub links: Links,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            config_version: "1.0".to_string(),
            name: "Variants Viewer Demo".to_string(),
            description: Some(
                "A variant viewer dashboard to browse annotated variant calling result."
                    .to_string(),
            ),
            data: DataPaths::default(),
            columns: Columns::default(),
            links: Links::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a configuration file, choosing the format by extension.
    ///
    /// Relative data paths are resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_yaml(&contents)?,
        };

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        tracing::debug!(path = %path.display(), name = %config.name, "Config loaded");
        Ok(config)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        validate_config_schema(&value).map_err(ConfigError::SchemaError)?;
        let config: DashboardConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields the schema cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingField("name".to_string()));
        }

        if self.data.variant_table.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("data.variant_table".to_string()));
        }

        match (&self.data.evidence_table, &self.data.evidence_details) {
            (Some(_), None) => {
                return Err(ConfigError::MissingField("data.evidence_details".to_string()))
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingField("data.evidence_table".to_string()))
            }
            _ => {}
        }

        self.validate_unique_columns()?;

        Ok(())
    }

    /// Ensure no column is listed twice within one view.
    fn validate_unique_columns(&self) -> Result<(), ConfigError> {
        let views = [
            ("main", &self.columns.main),
            ("detail", &self.columns.detail),
            ("summary", &self.columns.summary),
            ("distribution", &self.columns.distribution),
            ("sort_by", &self.columns.sort_by),
        ];

        for (view, columns) in views {
            let mut seen = HashSet::new();
            for column in columns {
                if !seen.insert(column) {
                    return Err(ConfigError::ValidationError(format!(
                        "Duplicate column {:?} in columns.{}",
                        column, view
                    )));
                }
            }
        }

        Ok(())
    }

    /// Make relative data paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &Path| -> PathBuf {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };

        self.data.variant_table = resolve(self.data.variant_table.as_path());
        self.data.evidence_table = self.data.evidence_table.as_deref().map(resolve);
        self.data.evidence_details = self.data.evidence_details.as_deref().map(resolve);
    }

    /// Load the configured evidence catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<EvidenceCatalog, ConfigError> {
        let catalog = match (&self.data.evidence_table, &self.data.evidence_details) {
            (Some(grid), Some(details)) => EvidenceCatalog::from_files(grid, details)?,
            _ => EvidenceCatalog::builtin()?,
        };
        Ok(catalog)
    }
}

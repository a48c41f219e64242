//! JSON Schema validation for dashboard configuration.
//!
//! Configurations are checked against `schema/dashboard.schema.json` before
//! they are deserialized, so unknown keys and malformed values are reported
//! with their location.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded configuration schema (loaded at compile time).
const DASHBOARD_SCHEMA_JSON: &str = include_str!("../../schema/dashboard.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(DASHBOARD_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a configuration JSON value against the schema.
///
/// Returns every violation found, each suffixed with its instance path.
pub fn validate_config_schema(config_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(config_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_passes() {
        let value = serde_json::json!({
            "config_version": "1.0",
            "name": "Demo",
            "data": { "variant_table": "variants.tsv" }
        });
        assert!(validate_config_schema(&value).is_ok());
    }

    #[test]
    fn test_missing_data_fails() {
        let value = serde_json::json!({
            "config_version": "1.0",
            "name": "Demo"
        });
        let errors = validate_config_schema(&value).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_bad_version_fails() {
        let value = serde_json::json!({
            "config_version": "latest",
            "name": "Demo",
            "data": { "variant_table": "variants.tsv" }
        });
        assert!(validate_config_schema(&value).is_err());
    }

    #[test]
    fn test_unknown_key_fails() {
        let value = serde_json::json!({
            "config_version": "1.0",
            "name": "Demo",
            "data": { "variant_table": "variants.tsv" },
            "theme": "dark"
        });
        assert!(validate_config_schema(&value).is_err());
    }

    #[test]
    fn test_full_config_passes() {
        let value = serde_json::json!({
            "config_version": "1.0.0",
            "name": "Variants Viewer Demo",
            "description": "Demo only",
            "data": {
                "variant_table": "data/demo-table_clean.tsv",
                "evidence_table": "data/acmg_evidence_table.tsv",
                "evidence_details": "data/acmg_evidence_details.tsv"
            },
            "columns": {
                "main": ["Gene", "HGVSg", "VAF"],
                "detail": ["Gene", "dbSNP"],
                "summary": ["Variant Type"],
                "distribution": ["VAF"],
                "sort_by": ["oncokb_level"]
            },
            "links": { "gnomad_dataset": "gnomad_r2_1" }
        });
        assert!(validate_config_schema(&value).is_ok());
    }
}

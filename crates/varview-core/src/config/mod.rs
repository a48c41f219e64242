//! Dashboard configuration.
//!
//! A configuration names the input files and the columns each view shows.
//! It is written in YAML or JSON, validated against an embedded JSON Schema,
//! then checked for the constraints the schema cannot express.

mod parser;
mod schema;

pub use parser::{Columns, ConfigError, DashboardConfig, DataPaths, Links};
pub use schema::validate_config_schema;

//! Loading and ordering the annotated variant table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const VARIANT_DEPTH_COLUMN: &str = "Variant Depth";
pub const REF_DEPTH_COLUMN: &str = "Ref Depth";
pub const DEPTH_COLUMN: &str = "Depth";
pub const ID_COLUMN: &str = "ID";

/// Cell values treated as absent.
const MISSING_VALUES: [&str; 6] = ["", ".", "NA", "N/A", "NaN", "nan"];

/// Errors from reading or querying a variant table.
#[derive(Error, Debug)]
pub enum VariantTableError {
    #[error("Failed to read variant table: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TSV: {0}")]
    TsvError(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column {column:?} (row {row})")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No variant with ID {0}")]
    NotFound(usize),
}

/// True for empty and placeholder cells.
pub fn is_missing(value: &str) -> bool {
    MISSING_VALUES.contains(&value.trim())
}

/// One row of the variant table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantRecord {
    /// Position of the row after sorting
    pub id: usize,

    pub fields: BTreeMap<String, String>,
}

impl VariantRecord {
    /// Value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of a column, or an error naming the column.
    pub fn require(&self, column: &str) -> Result<&str, VariantTableError> {
        self.get(column)
            .ok_or_else(|| VariantTableError::MissingColumn(column.to_string()))
    }
}

/// The annotated variant table, sorted and numbered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantTable {
    headers: Vec<String>,
    rows: Vec<VariantRecord>,
}

impl VariantTable {
    /// Read a TSV file.
    pub fn from_path(
        path: impl AsRef<Path>,
        sort_by: &[String],
    ) -> Result<Self, VariantTableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file, sort_by)?;

        tracing::info!(
            path = %path.display(),
            variants = table.len(),
            "Variant table loaded"
        );

        Ok(table)
    }

    /// Read TSV data, derive `Depth`, sort ascending by `sort_by` and assign `ID`.
    pub fn from_reader<R: Read>(reader: R, sort_by: &[String]) -> Result<Self, VariantTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let mut headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        for required in [VARIANT_DEPTH_COLUMN, REF_DEPTH_COLUMN]
            .iter()
            .copied()
            .chain(sort_by.iter().map(String::as_str))
        {
            if !headers.iter().any(|h| h == required) {
                return Err(VariantTableError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let mut fields: BTreeMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();

            let depth = format_depth(&fields, index + 1)?;
            fields.insert(DEPTH_COLUMN.to_string(), depth);

            rows.push(VariantRecord { id: 0, fields });
        }

        rows.sort_by(|a, b| compare_by_columns(a, b, sort_by));
        for (id, row) in rows.iter_mut().enumerate() {
            row.id = id;
            row.fields.insert(ID_COLUMN.to_string(), id.to_string());
        }

        for derived in [DEPTH_COLUMN, ID_COLUMN] {
            if !headers.iter().any(|h| h == derived) {
                headers.push(derived.to_string());
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[VariantRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// The variant with a given ID.
    pub fn get(&self, id: usize) -> Result<&VariantRecord, VariantTableError> {
        self.rows.get(id).ok_or(VariantTableError::NotFound(id))
    }

    /// All values of one column, in table order.
    pub fn column(&self, column: &str) -> Result<Vec<&str>, VariantTableError> {
        if !self.has_column(column) {
            return Err(VariantTableError::MissingColumn(column.to_string()));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(column).unwrap_or_default())
            .collect())
    }

    /// Project every row onto the given columns.
    pub fn select(&self, columns: &[String]) -> Result<Vec<Vec<&str>>, VariantTableError> {
        if let Some(missing) = columns.iter().find(|c| !self.has_column(c)) {
            return Err(VariantTableError::MissingColumn(missing.clone()));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.get(c).unwrap_or_default())
                    .collect()
            })
            .collect())
    }
}

/// "<variant>/<variant + ref>" read depth.
fn format_depth(fields: &BTreeMap<String, String>, row: usize) -> Result<String, VariantTableError> {
    let parse = |column: &str| -> Result<u64, VariantTableError> {
        let value = fields.get(column).map(String::as_str).unwrap_or_default();
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| VariantTableError::InvalidValue {
                row,
                column: column.to_string(),
                value: value.to_string(),
            })
    };

    let variant = parse(VARIANT_DEPTH_COLUMN)?;
    let reference = parse(REF_DEPTH_COLUMN)?;
    Ok(format!("{}/{}", variant, variant + reference))
}

fn compare_by_columns(a: &VariantRecord, b: &VariantRecord, columns: &[String]) -> Ordering {
    columns
        .iter()
        .map(|c| {
            compare_values(
                a.get(c).unwrap_or_default(),
                b.get(c).unwrap_or_default(),
            )
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Rank of a cell in the sort order: numbers, then text, then missing.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
    Missing,
}

impl<'a> SortValue<'a> {
    fn of(value: &'a str) -> Self {
        if is_missing(value) {
            return SortValue::Missing;
        }
        match value.trim().parse::<f64>() {
            Ok(number) => SortValue::Number(number),
            Err(_) => SortValue::Text(value),
        }
    }
}

/// Ascending order: numbers by value, then text, with missing values last.
fn compare_values(a: &str, b: &str) -> Ordering {
    match (SortValue::of(a), SortValue::of(b)) {
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(&y),
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        (x, y) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

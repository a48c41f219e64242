//! Evidence catalog parsing from the grid and details TSV files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::evidence::EvidenceCode;
use crate::types::{Direction, Strength, StrengthCategory};

/// ACMG 2015 evidence grid, embedded at compile time.
const BUILTIN_GRID: &str = include_str!("../../data/acmg_evidence_table.tsv");

/// Descriptions of the ACMG 2015 criteria, embedded at compile time.
const BUILTIN_DETAILS: &str = include_str!("../../data/acmg_evidence_details.tsv");

/// Separator between codes sharing one grid cell.
const CELL_SEPARATOR: char = ',';

/// Layout of the six strength columns following the evidence type column.
const GRID_COLUMNS: [(Direction, Strength); 6] = [
    (Direction::Pathogenic, Strength::VeryStrong),
    (Direction::Pathogenic, Strength::Strong),
    (Direction::Pathogenic, Strength::Moderate),
    (Direction::Pathogenic, Strength::Supporting),
    (Direction::Benign, Strength::Supporting),
    (Direction::Benign, Strength::Strong),
];

/// Errors that can occur when loading or querying the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TSV: {0}")]
    TsvError(#[from] csv::Error),

    #[error("Invalid evidence code {code:?} in row {row:?}")]
    InvalidCode { code: String, row: String },

    #[error("Evidence code {0} has no description")]
    MissingDescription(String),

    #[error("Evidence code {0} appears more than once in the grid")]
    DuplicateCode(String),

    #[error("Catalog validation failed: {0}")]
    ValidationError(String),

    #[error("Evidence code not found in catalog: {0}")]
    NotFound(String),
}

/// A strength column of the evidence grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogColumn {
    /// Header text as it appears in the grid file
    pub title: String,

    pub direction: Direction,

    pub strength: Strength,
}

/// One evidence type row (e.g. "Population data").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRow {
    /// Evidence type shown in the first column
    pub evidence_type: String,

    /// Codes per strength column, aligned with `EvidenceCatalog::columns`
    pub cells: Vec<Vec<EvidenceCode>>,
}

/// A code together with its description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub code: EvidenceCode,
    pub description: String,
}

/// The reference set of evidence codes offered for selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceCatalog {
    columns: Vec<CatalogColumn>,
    rows: Vec<CatalogRow>,
    descriptions: BTreeMap<String, String>,
}

impl EvidenceCatalog {
    /// The ACMG 2015 catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_tsv(BUILTIN_GRID, BUILTIN_DETAILS)
    }

    /// Parse a catalog from grid and details TSV strings.
    pub fn from_tsv(grid: &str, details: &str) -> Result<Self, CatalogError> {
        Self::from_readers(grid.as_bytes(), details.as_bytes())
    }

    /// Parse a catalog from grid and details TSV files.
    pub fn from_files(
        grid: impl AsRef<Path>,
        details: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let grid = File::open(grid.as_ref())?;
        let details = File::open(details.as_ref())?;
        Self::from_readers(grid, details)
    }

    /// Parse a catalog from any pair of readers.
    pub fn from_readers<G: Read, D: Read>(grid: G, details: D) -> Result<Self, CatalogError> {
        let (columns, rows) = parse_grid(grid)?;
        let descriptions = parse_details(details)?;

        let catalog = Self {
            columns,
            rows,
            descriptions,
        };
        catalog.validate()?;

        tracing::debug!(
            rows = catalog.rows.len(),
            codes = catalog.codes().len(),
            "Evidence catalog loaded"
        );

        Ok(catalog)
    }

    /// Check grid codes are unique and described.
    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();

        for code in self.codes() {
            if !seen.insert(code.as_str()) {
                return Err(CatalogError::DuplicateCode(code.to_string()));
            }

            if !self.descriptions.contains_key(code.as_str()) {
                return Err(CatalogError::MissingDescription(code.to_string()));
            }
        }

        for code in self.descriptions.keys() {
            if !seen.contains(code.as_str()) {
                tracing::warn!(code = %code, "Description for code not present in the grid");
            }
        }

        Ok(())
    }

    /// The strength columns, in grid order.
    pub fn columns(&self) -> &[CatalogColumn] {
        &self.columns
    }

    /// The evidence type rows, in grid order.
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// All codes in the grid, row by row, column by column.
    pub fn codes(&self) -> Vec<&EvidenceCode> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten())
            .collect()
    }

    /// Codes of one strength category, in grid order.
    pub fn codes_in(&self, category: StrengthCategory) -> Vec<&EvidenceCode> {
        self.codes()
            .into_iter()
            .filter(|code| code.category() == category)
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes().iter().any(|c| c.as_str() == code)
    }

    /// Validate a raw code against the catalog vocabulary.
    pub fn resolve(&self, raw: &str) -> Result<EvidenceCode, CatalogError> {
        let trimmed = raw.trim();
        self.codes()
            .into_iter()
            .find(|c| c.as_str() == trimmed)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(trimmed.to_string()))
    }

    /// Description of a code.
    pub fn describe(&self, code: &str) -> Result<&str, CatalogError> {
        self.descriptions
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))
    }

    /// Every grid code with its description, in grid order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.codes()
            .into_iter()
            .map(|code| CatalogEntry {
                code: code.clone(),
                description: self
                    .descriptions
                    .get(code.as_str())
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }
}

fn tsv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .quoting(false)
        .from_reader(reader)
}

fn parse_grid<R: Read>(reader: R) -> Result<(Vec<CatalogColumn>, Vec<CatalogRow>), CatalogError> {
    let mut reader = tsv_reader(reader, true);

    let headers = reader.headers()?.clone();
    if headers.len() != GRID_COLUMNS.len() + 1 {
        return Err(CatalogError::ValidationError(format!(
            "Expected {} columns in evidence grid, found {}",
            GRID_COLUMNS.len() + 1,
            headers.len()
        )));
    }

    let columns = GRID_COLUMNS
        .iter()
        .zip(headers.iter().skip(1))
        .map(|(&(direction, strength), title)| CatalogColumn {
            title: title.trim().to_string(),
            direction,
            strength,
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let evidence_type = record.get(0).unwrap_or_default().trim().to_string();

        let mut cells = Vec::with_capacity(GRID_COLUMNS.len());
        for cell in record.iter().skip(1) {
            let codes = cell
                .split(CELL_SEPARATOR)
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| {
                    EvidenceCode::parse(code).map_err(|_| CatalogError::InvalidCode {
                        code: code.to_string(),
                        row: evidence_type.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(codes);
        }

        rows.push(CatalogRow {
            evidence_type,
            cells,
        });
    }

    Ok((columns, rows))
}

fn parse_details<R: Read>(reader: R) -> Result<BTreeMap<String, String>, CatalogError> {
    let mut reader = tsv_reader(reader, false);
    let mut descriptions = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        let code = record.get(0).unwrap_or_default().trim();
        if code.is_empty() {
            continue;
        }

        let description = record.get(1).ok_or_else(|| {
            CatalogError::ValidationError(format!("Missing description column for {}", code))
        })?;

        descriptions.insert(code.to_string(), description.trim().to_string());
    }

    Ok(descriptions)
}

//! Python bindings for varview.
//!
//! Exposes the ACMG classifier and the built-in evidence catalog to a
//! Python dashboard host.
//!
//! ```python
//! import varview
//!
//! varview.classify(["PVS1", "PM2"])        # "Likely Pathogenic"
//! varview.describe("BA1")                  # "Allele frequency is >5% ..."
//! ```

use pyo3::exceptions::{PyKeyError, PyRuntimeError};
use pyo3::prelude::*;

use varview_core::{classify_detailed, CatalogError, EvidenceCatalog};

fn builtin_catalog() -> PyResult<EvidenceCatalog> {
    EvidenceCatalog::builtin().map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Classify evidence codes and return the label.
#[pyfunction]
fn classify(codes: Vec<String>) -> String {
    classify_detailed(&codes).label.to_string()
}

/// Classify evidence codes and return the full result as JSON.
#[pyfunction]
fn classify_json(codes: Vec<String>) -> PyResult<String> {
    serde_json::to_string(&classify_detailed(&codes))
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Description of an evidence code. Raises KeyError for unknown codes.
#[pyfunction]
fn describe(code: &str) -> PyResult<String> {
    let catalog = builtin_catalog()?;
    match catalog.describe(code) {
        Ok(description) => Ok(description.to_string()),
        Err(CatalogError::NotFound(code)) => Err(PyKeyError::new_err(code)),
        Err(e) => Err(PyRuntimeError::new_err(e.to_string())),
    }
}

/// All codes of the built-in catalog, in grid order.
#[pyfunction]
fn catalog_codes() -> PyResult<Vec<String>> {
    let catalog = builtin_catalog()?;
    Ok(catalog.codes().iter().map(|c| c.to_string()).collect())
}

#[pymodule]
fn varview(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(classify_json, m)?)?;
    m.add_function(wrap_pyfunction!(describe, m)?)?;
    m.add_function(wrap_pyfunction!(catalog_codes, m)?)?;
    Ok(())
}

//! Evidence catalog loading and lookup.
//!
//! The catalog is reference data: a grid of evidence codes arranged by
//! evidence type and strength column, and a description for every code.
//! It is read from two TSV files, or taken from the built-in ACMG 2015 table.

mod parser;

pub use parser::{CatalogColumn, CatalogEntry, CatalogError, CatalogRow, EvidenceCatalog};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrengthCategory;

    #[test]
    fn test_builtin_has_all_acmg_criteria() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        assert_eq!(catalog.codes().len(), 28);
        assert_eq!(catalog.codes_in(StrengthCategory::Pvs).len(), 1);
        assert_eq!(catalog.codes_in(StrengthCategory::Ps).len(), 4);
        assert_eq!(catalog.codes_in(StrengthCategory::Pm).len(), 6);
        assert_eq!(catalog.codes_in(StrengthCategory::Pp).len(), 5);
        assert_eq!(catalog.codes_in(StrengthCategory::Ba).len(), 1);
        assert_eq!(catalog.codes_in(StrengthCategory::Bs).len(), 4);
        assert_eq!(catalog.codes_in(StrengthCategory::Bp).len(), 7);
    }

    #[test]
    fn test_builtin_entries_are_described() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        for entry in catalog.entries() {
            assert!(!entry.description.is_empty(), "{} undocumented", entry.code);
        }
        assert!(catalog.describe("BA1").unwrap().contains("5%"));
    }
}

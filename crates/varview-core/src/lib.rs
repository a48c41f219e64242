//! # varview-core
//!
//! Deterministic ACMG evidence combination for annotated variant review.
//!
//! This crate provides the logic behind the variant viewer dashboard:
//! - Which verdict does a set of checked evidence codes support?
//! - What does each evidence code mean?
//! - What does the annotated variant table contain?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same selection always produces the same verdict
//! 2. **Total**: `classify` accepts any input, including unknown codes
//! 3. **Traceable**: Every verdict names the combining rule that fired
//! 4. **Order-independent**: Only category counts drive the verdict
//!
//! ## Example
//!
//! ```rust
//! use varview_core::{classify, ClassificationLabel};
//!
//! assert_eq!(classify(["PVS1", "PS1"]), ClassificationLabel::Pathogenic);
//! assert_eq!(classify(["BS1", "BP1"]), ClassificationLabel::LikelyBenign);
//! assert_eq!(classify(Vec::<&str>::new()), ClassificationLabel::Vus);
//! ```

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod evidence;
pub mod session;
pub mod types;
pub mod variants;

use chrono::Utc;

// Re-export main types at crate root
pub use catalog::{CatalogEntry, CatalogError, EvidenceCatalog};
pub use classifier::{classify, classify_detailed, Classifier, CombiningRule, COMBINING_RULES};
pub use config::{ConfigError, DashboardConfig};
pub use evidence::{category_of, EvidenceCode, EvidenceError, EvidenceTally};
pub use session::{Assessment, FocusedEvidence, SelectionSession};
pub use types::{Classification, ClassificationLabel, Direction, Strength, StrengthCategory};
pub use variants::{VariantRecord, VariantTable, VariantTableError};

/// Validate raw codes against the catalog and assess them as one selection.
///
/// This is the entry point for selections that come from outside the
/// process: every code must be offered by the catalog. Use [`classify`]
/// directly when input has already been validated. Repeated codes are
/// counted each time, as [`classify`] counts them.
///
/// # Arguments
///
/// * `catalog` - The evidence catalog the codes were chosen from
/// * `codes` - Codes in the order they were checked
///
/// # Returns
///
/// An `Assessment` with the verdict, the rule that fired, and the
/// description of the last code.
pub fn assess_codes<I, S>(catalog: &EvidenceCatalog, codes: I) -> Result<Assessment, CatalogError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let checked = codes
        .into_iter()
        .map(|code| catalog.resolve(code.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let focus = checked
        .last()
        .map(|code| FocusedEvidence::lookup(catalog, code))
        .transpose()?;

    Ok(Assessment {
        classification: classify_detailed(&checked),
        selected: checked,
        focus,
        assessed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_valid_codes() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let assessment = assess_codes(&catalog, ["PS1", "PS2"]).unwrap();

        assert_eq!(assessment.classification.label, ClassificationLabel::Pathogenic);
        assert_eq!(assessment.classification.rule_id, "ps-corroborated");
        assert_eq!(assessment.focus.unwrap().code.as_str(), "PS2");
    }

    #[test]
    fn test_assess_rejects_unknown_code() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let result = assess_codes(&catalog, ["PS1", "PS9"]);

        assert!(matches!(
            result,
            Err(CatalogError::NotFound(code)) if code == "PS9"
        ));
    }

    #[test]
    fn test_assess_counts_repeated_codes() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let codes = ["PM1", "PM1", "PM1"];
        let assessment = assess_codes(&catalog, codes).unwrap();

        assert_eq!(assessment.classification.label, classify(codes));
        assert_eq!(
            assessment.classification.label,
            ClassificationLabel::LikelyPathogenic
        );
        assert_eq!(assessment.classification.tally.pm, 3);
        assert_eq!(assessment.selected.len(), 3);
        assert_eq!(assessment.focus.unwrap().code.as_str(), "PM1");
    }

    #[test]
    fn test_assess_empty_selection() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let assessment = assess_codes(&catalog, Vec::<String>::new()).unwrap();

        assert_eq!(assessment.classification.label, ClassificationLabel::Vus);
        assert!(assessment.focus.is_none());
    }
}

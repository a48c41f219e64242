//! Selection sessions: the codes a user has checked, and their assessment.
//!
//! A session is an immutable value. Every toggle returns a new session, so
//! the selection that is classified is always the one passed in explicitly.
//! Checking a code that is already selected and unchecking a code that is
//! not selected are both no-ops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, EvidenceCatalog};
use crate::classifier::classify_detailed;
use crate::evidence::EvidenceCode;
use crate::types::Classification;

/// A user's current selection of evidence codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSession {
    /// Selected codes, in the order they were checked
    selected: Vec<EvidenceCode>,
}

impl SelectionSession {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from the live state of the checkboxes.
    ///
    /// The codes keep the order they are given in (grid order for the
    /// dashboard). Repeated codes are kept once.
    pub fn from_checked<I>(checked: I) -> Self
    where
        I: IntoIterator<Item = EvidenceCode>,
    {
        checked
            .into_iter()
            .fold(Self::new(), |session, code| session.toggle(code, true))
    }

    /// Apply one checkbox event and return the resulting session.
    pub fn toggle(&self, code: EvidenceCode, checked: bool) -> Self {
        let mut selected = self.selected.clone();
        let present = selected.contains(&code);

        match (checked, present) {
            (true, false) => selected.push(code.clone()),
            (false, true) => selected.retain(|c| c != &code),
            _ => {}
        }

        tracing::debug!(
            code = %code,
            checked,
            selected = selected.len(),
            "Evidence toggled"
        );

        Self { selected }
    }

    /// Check a code.
    pub fn check(&self, code: EvidenceCode) -> Self {
        self.toggle(code, true)
    }

    /// Uncheck a code.
    pub fn uncheck(&self, code: EvidenceCode) -> Self {
        self.toggle(code, false)
    }

    pub fn selected(&self) -> &[EvidenceCode] {
        &self.selected
    }

    pub fn is_selected(&self, code: &EvidenceCode) -> bool {
        self.selected.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The most recently checked code still selected, shown in the detail pane.
    pub fn focus(&self) -> Option<&EvidenceCode> {
        self.selected.last()
    }

    /// Classify the current selection.
    pub fn classification(&self) -> Classification {
        classify_detailed(&self.selected)
    }

    /// Classify the current selection and look up the focused code's description.
    pub fn assess(&self, catalog: &EvidenceCatalog) -> Result<Assessment, CatalogError> {
        let focus = self
            .focus()
            .map(|code| FocusedEvidence::lookup(catalog, code))
            .transpose()?;

        Ok(Assessment {
            classification: self.classification(),
            selected: self.selected.clone(),
            focus,
            assessed_at: Utc::now(),
        })
    }
}

/// The code shown in the detail pane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusedEvidence {
    pub code: EvidenceCode,
    pub description: String,
}

impl FocusedEvidence {
    /// Pair a code with its catalog description.
    pub fn lookup(catalog: &EvidenceCatalog, code: &EvidenceCode) -> Result<Self, CatalogError> {
        Ok(Self {
            code: code.clone(),
            description: catalog.describe(code.as_str())?.to_string(),
        })
    }
}

/// Snapshot of a session's verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// The verdict and the rule that produced it
    pub classification: Classification,

    /// Codes the verdict was computed from
    pub selected: Vec<EvidenceCode>,

    /// Most recently checked code with its description
    pub focus: Option<FocusedEvidence>,

    /// When the assessment was made
    pub assessed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassificationLabel;

    fn code(raw: &str) -> EvidenceCode {
        EvidenceCode::parse(raw).unwrap()
    }

    #[test]
    fn test_new_session_is_vus() {
        let session = SelectionSession::new();
        assert!(session.is_empty());
        assert!(session.focus().is_none());
        assert_eq!(session.classification().label, ClassificationLabel::Vus);
    }

    #[test]
    fn test_toggle_returns_new_session() {
        let empty = SelectionSession::new();
        let one = empty.check(code("PVS1"));

        assert!(empty.is_empty());
        assert_eq!(one.selected().len(), 1);
    }

    #[test]
    fn test_uncheck_removes_code() {
        let session = SelectionSession::new()
            .check(code("PVS1"))
            .check(code("PS1"));
        assert_eq!(session.classification().label, ClassificationLabel::Pathogenic);

        let session = session.uncheck(code("PS1"));
        assert_eq!(session.selected(), &[code("PVS1")]);
        assert_eq!(session.classification().label, ClassificationLabel::Vus);
    }

    #[test]
    fn test_repeat_check_and_stray_uncheck_are_noops() {
        let session = SelectionSession::new().check(code("BA1")).check(code("BA1"));
        assert_eq!(session.selected().len(), 1);

        let same = session.uncheck(code("BS1"));
        assert_eq!(same, session);
    }

    #[test]
    fn test_focus_is_last_checked() {
        let session = SelectionSession::new()
            .check(code("PM1"))
            .check(code("PP3"))
            .check(code("BS1"));
        assert_eq!(session.focus(), Some(&code("BS1")));

        let session = session.uncheck(code("BS1"));
        assert_eq!(session.focus(), Some(&code("PP3")));
    }

    #[test]
    fn test_from_checked_keeps_order_and_dedups() {
        let session =
            SelectionSession::from_checked(vec![code("BS1"), code("BP1"), code("BS1")]);
        assert_eq!(session.selected(), &[code("BS1"), code("BP1")]);
        assert_eq!(session.classification().label, ClassificationLabel::LikelyBenign);
    }

    #[test]
    fn test_assess_with_catalog() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let session = SelectionSession::new().check(code("PVS1")).check(code("PM2"));

        let assessment = session.assess(&catalog).unwrap();
        assert_eq!(
            assessment.classification.label,
            ClassificationLabel::LikelyPathogenic
        );
        let focus = assessment.focus.unwrap();
        assert_eq!(focus.code, code("PM2"));
        assert!(focus.description.contains("population databases"));
    }

    #[test]
    fn test_assess_unknown_focus_is_not_found() {
        let catalog = EvidenceCatalog::builtin().unwrap();
        let session = SelectionSession::new().check(code("PM7"));

        assert!(matches!(
            session.assess(&catalog),
            Err(CatalogError::NotFound(_))
        ));
    }
}

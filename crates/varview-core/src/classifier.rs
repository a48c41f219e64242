//! Classifier: combines evidence counts into a single verdict.
//!
//! The combining rules form one ordered list and the first rule whose guard
//! holds decides the label:
//! 1. Any very-strong evidence → pathogenic-side rules only
//! 2. Else any strong pathogenic evidence → pathogenic-side rules only
//! 3. Else moderate/supporting combinations → Likely Pathogenic
//! 4. Else benign combinations → Benign or Likely Benign
//! 5. Else → VUS
//!
//! Once a PVS or PS code is present, benign evidence is never consulted.
//! The order of the list is therefore part of the behaviour and must not
//! be rearranged.

use crate::evidence::EvidenceTally;
use crate::types::{Classification, ClassificationLabel};

/// Id of the fallback when no rule matches.
pub const FALLBACK_RULE_ID: &str = "insufficient";

/// One entry of the combining table.
#[derive(Debug, Clone, Copy)]
pub struct CombiningRule {
    /// Stable identifier reported with each classification
    pub id: &'static str,

    /// Verdict when the guard holds
    pub label: ClassificationLabel,

    guard: fn(&EvidenceTally) -> bool,
}

impl CombiningRule {
    pub fn matches(&self, tally: &EvidenceTally) -> bool {
        (self.guard)(tally)
    }
}

/// The combining table, in evaluation order.
///
/// Rules in the PVS and PS groups repeat their entry condition so the
/// list can be read flat while keeping the nested precedence.
pub const COMBINING_RULES: [CombiningRule; 13] = [
    CombiningRule {
        id: "pvs-corroborated",
        label: ClassificationLabel::Pathogenic,
        guard: |t| t.pvs > 0 && (t.ps > 0 || t.pm > 1 || t.pp > 1 || (t.pm > 0 && t.pp > 0)),
    },
    CombiningRule {
        id: "pvs-moderate",
        label: ClassificationLabel::LikelyPathogenic,
        guard: |t| t.pvs > 0 && t.pm > 0,
    },
    CombiningRule {
        id: "pvs-alone",
        label: ClassificationLabel::Vus,
        guard: |t| t.pvs > 0,
    },
    CombiningRule {
        id: "ps-corroborated",
        label: ClassificationLabel::Pathogenic,
        guard: |t| {
            t.ps > 0
                && (t.ps > 1 || t.pm > 2 || (t.pm > 1 && t.pp > 1) || (t.pm > 0 && t.pp > 3))
        },
    },
    CombiningRule {
        id: "ps-supported",
        label: ClassificationLabel::LikelyPathogenic,
        guard: |t| t.ps > 0 && (t.pm > 0 || t.pp > 1),
    },
    CombiningRule {
        id: "ps-alone",
        label: ClassificationLabel::Vus,
        guard: |t| t.ps > 0,
    },
    CombiningRule {
        id: "pm-three",
        label: ClassificationLabel::LikelyPathogenic,
        guard: |t| t.pm > 2,
    },
    CombiningRule {
        id: "pm-two-pp-two",
        label: ClassificationLabel::LikelyPathogenic,
        guard: |t| t.pm > 1 && t.pp > 1,
    },
    CombiningRule {
        id: "pm-one-pp-four",
        label: ClassificationLabel::LikelyPathogenic,
        guard: |t| t.pm > 0 && t.pp > 3,
    },
    CombiningRule {
        id: "ba-standalone",
        label: ClassificationLabel::Benign,
        guard: |t| t.ba > 0,
    },
    CombiningRule {
        id: "bs-two",
        label: ClassificationLabel::Benign,
        guard: |t| t.bs > 1,
    },
    CombiningRule {
        id: "bs-bp",
        label: ClassificationLabel::LikelyBenign,
        guard: |t| t.bs > 0 && t.bp > 0,
    },
    CombiningRule {
        id: "bp-two",
        label: ClassificationLabel::LikelyBenign,
        guard: |t| t.bp > 1,
    },
];

/// The Classifier applies the combining table to a tally.
pub struct Classifier {
    rules: &'static [CombiningRule],
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            rules: &COMBINING_RULES,
        }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &'static [CombiningRule] {
        self.rules
    }

    /// Find the first rule that matches, if any.
    pub fn first_match(&self, tally: &EvidenceTally) -> Option<&'static CombiningRule> {
        self.rules.iter().find(|rule| rule.matches(tally))
    }

    /// Classify a tally.
    ///
    /// Never fails: a tally that matches no rule is VUS.
    pub fn classify_tally(&self, tally: EvidenceTally) -> Classification {
        let (label, rule_id) = match self.first_match(&tally) {
            Some(rule) => (rule.label, rule.id),
            None => (ClassificationLabel::Vus, FALLBACK_RULE_ID),
        };

        tracing::debug!(
            rule = rule_id,
            label = %label,
            pathogenic = tally.pathogenic_total(),
            benign = tally.benign_total(),
            unknown = tally.unknown,
            "Combining rule applied"
        );

        Classification {
            label,
            pathogenic_side: label.is_pathogenic_side(),
            rule_id: rule_id.to_string(),
            tally,
        }
    }

    /// Classify a sequence of raw codes.
    pub fn classify<I, S>(&self, codes: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classify_tally(EvidenceTally::from_codes(codes))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a selection of evidence codes.
///
/// Order does not matter and duplicates are counted. Unrecognised codes are
/// ignored, and codes are matched exactly: `"PS1 "` or `"PM2_Supporting"`
/// count as unknown. Use [`EvidenceCode::parse`](crate::EvidenceCode::parse)
/// to trim raw input first.
pub fn classify<I, S>(codes: I) -> ClassificationLabel
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classify_detailed(codes).label
}

/// Like [`classify`], but also reports the rule that fired and the tally.
pub fn classify_detailed<I, S>(codes: I) -> Classification
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Classifier::new().classify(codes)
}

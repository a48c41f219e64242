//! Core types for ACMG evidence classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::evidence::EvidenceTally;

/// Which way a piece of evidence points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Pathogenic,
    Benign,
}

/// How strongly a single piece of evidence counts.
///
/// The benign side has no moderate tier; stand-alone only exists there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    VeryStrong,
    StandAlone,
    Strong,
    Moderate,
    Supporting,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strength::VeryStrong => "Very Strong",
            Strength::StandAlone => "Stand-alone",
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Supporting => "Supporting",
        };
        f.write_str(name)
    }
}

/// The seven strength categories of the combining rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrengthCategory {
    Pvs,
    Ps,
    Pm,
    Pp,
    Ba,
    Bs,
    Bp,
}

impl StrengthCategory {
    /// All categories, pathogenic side first, strongest first.
    pub const ALL: [StrengthCategory; 7] = [
        StrengthCategory::Pvs,
        StrengthCategory::Ps,
        StrengthCategory::Pm,
        StrengthCategory::Pp,
        StrengthCategory::Ba,
        StrengthCategory::Bs,
        StrengthCategory::Bp,
    ];

    /// Code prefix for this category (e.g. "PM").
    pub fn prefix(&self) -> &'static str {
        match self {
            StrengthCategory::Pvs => "PVS",
            StrengthCategory::Ps => "PS",
            StrengthCategory::Pm => "PM",
            StrengthCategory::Pp => "PP",
            StrengthCategory::Ba => "BA",
            StrengthCategory::Bs => "BS",
            StrengthCategory::Bp => "BP",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            StrengthCategory::Pvs
            | StrengthCategory::Ps
            | StrengthCategory::Pm
            | StrengthCategory::Pp => Direction::Pathogenic,
            StrengthCategory::Ba | StrengthCategory::Bs | StrengthCategory::Bp => {
                Direction::Benign
            }
        }
    }

    pub fn strength(&self) -> Strength {
        match self {
            StrengthCategory::Pvs => Strength::VeryStrong,
            StrengthCategory::Ps | StrengthCategory::Bs => Strength::Strong,
            StrengthCategory::Pm => Strength::Moderate,
            StrengthCategory::Pp | StrengthCategory::Bp => Strength::Supporting,
            StrengthCategory::Ba => Strength::StandAlone,
        }
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// The five possible verdicts of the combining rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClassificationLabel {
    #[serde(rename = "Pathogenic")]
    Pathogenic,
    #[serde(rename = "Likely Pathogenic")]
    LikelyPathogenic,
    #[serde(rename = "VUS")]
    Vus,
    #[serde(rename = "Likely Benign")]
    LikelyBenign,
    #[serde(rename = "Benign")]
    Benign,
}

impl ClassificationLabel {
    pub const ALL: [ClassificationLabel; 5] = [
        ClassificationLabel::Pathogenic,
        ClassificationLabel::LikelyPathogenic,
        ClassificationLabel::Vus,
        ClassificationLabel::LikelyBenign,
        ClassificationLabel::Benign,
    ];

    /// Display name, as shown on the dashboard badge.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::Pathogenic => "Pathogenic",
            ClassificationLabel::LikelyPathogenic => "Likely Pathogenic",
            ClassificationLabel::Vus => "VUS",
            ClassificationLabel::LikelyBenign => "Likely Benign",
            ClassificationLabel::Benign => "Benign",
        }
    }

    /// True for Pathogenic and Likely Pathogenic. VUS sits on neither side.
    pub fn is_pathogenic_side(&self) -> bool {
        matches!(
            self,
            ClassificationLabel::Pathogenic | ClassificationLabel::LikelyPathogenic
        )
    }

    /// Background colour of the dashboard badge.
    pub fn badge_color(&self) -> &'static str {
        match self {
            ClassificationLabel::Pathogenic => "darkred",
            ClassificationLabel::LikelyPathogenic => "tomato",
            ClassificationLabel::Vus => "darkgrey",
            ClassificationLabel::LikelyBenign => "lightskyblue",
            ClassificationLabel::Benign => "navy",
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a selection, with the rule that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// The verdict
    pub label: ClassificationLabel,

    /// Whether the verdict leans pathogenic
    pub pathogenic_side: bool,

    /// Id of the combining rule that fired (e.g. "pvs-corroborated")
    pub rule_id: String,

    /// Category counts the rules were evaluated against
    pub tally: EvidenceTally,
}

impl Classification {
    /// Render the verdict as the coloured heading used by the dashboard.
    pub fn badge_html(&self) -> String {
        format!(
            r#"<h3><span style="background-color:{}; color:white;">{}</span></h3>"#,
            self.label.badge_color(),
            self.label
        )
    }
}

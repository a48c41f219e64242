//! Evidence codes and category tallies.
//!
//! An evidence code names one ACMG/AMP criterion (`PVS1`, `PM2`, `BP4`, ...).
//! Its strength category is found through an explicit lookup: the exact code
//! `PVS1`, or one of the two-letter prefixes followed by a number. Strings that
//! match neither fall into an inert unknown bucket.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::{Direction, StrengthCategory};

lazy_static! {
    /// Two-letter category prefix followed by the criterion number.
    static ref PREFIXED_CODE: Regex = Regex::new(r"^(PS|PM|PP|BA|BS|BP)[0-9]+$").unwrap();
}

/// The only very-strong criterion.
const VERY_STRONG_CODE: &str = "PVS1";

/// Errors from parsing evidence codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvidenceError {
    #[error("Invalid evidence code: {0:?}")]
    InvalidFormat(String),
}

/// Look up the strength category of a raw code.
///
/// Returns `None` for anything outside the vocabulary.
pub fn category_of(code: &str) -> Option<StrengthCategory> {
    if code == VERY_STRONG_CODE {
        return Some(StrengthCategory::Pvs);
    }

    if !PREFIXED_CODE.is_match(code) {
        return None;
    }

    match &code[..2] {
        "PS" => Some(StrengthCategory::Ps),
        "PM" => Some(StrengthCategory::Pm),
        "PP" => Some(StrengthCategory::Pp),
        "BA" => Some(StrengthCategory::Ba),
        "BS" => Some(StrengthCategory::Bs),
        "BP" => Some(StrengthCategory::Bp),
        _ => None,
    }
}

/// A well-formed evidence code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvidenceCode {
    code: String,
    category: StrengthCategory,
}

impl EvidenceCode {
    /// Parse a code, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, EvidenceError> {
        let code = raw.trim();
        let category =
            category_of(code).ok_or_else(|| EvidenceError::InvalidFormat(raw.to_string()))?;

        Ok(Self {
            code: code.to_string(),
            category,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn category(&self) -> StrengthCategory {
        self.category
    }

    pub fn direction(&self) -> Direction {
        self.category.direction()
    }
}

impl AsRef<str> for EvidenceCode {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for EvidenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for EvidenceCode {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EvidenceCode {
    type Error = EvidenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EvidenceCode> for String {
    fn from(code: EvidenceCode) -> Self {
        code.code
    }
}

/// Per-category counts of a selection.
///
/// Duplicates are counted every time they appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceTally {
    pub pvs: usize,
    pub ps: usize,
    pub pm: usize,
    pub pp: usize,
    pub ba: usize,
    pub bs: usize,
    pub bp: usize,

    /// Codes that matched no category
    pub unknown: usize,
}

impl EvidenceTally {
    /// Count the categories of a sequence of raw codes.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Self::default();
        for code in codes {
            match category_of(code.as_ref()) {
                Some(category) => tally.add(category),
                None => tally.unknown += 1,
            }
        }
        tally
    }

    /// Record one more code of the given category.
    pub fn add(&mut self, category: StrengthCategory) {
        match category {
            StrengthCategory::Pvs => self.pvs += 1,
            StrengthCategory::Ps => self.ps += 1,
            StrengthCategory::Pm => self.pm += 1,
            StrengthCategory::Pp => self.pp += 1,
            StrengthCategory::Ba => self.ba += 1,
            StrengthCategory::Bs => self.bs += 1,
            StrengthCategory::Bp => self.bp += 1,
        }
    }

    pub fn count(&self, category: StrengthCategory) -> usize {
        match category {
            StrengthCategory::Pvs => self.pvs,
            StrengthCategory::Ps => self.ps,
            StrengthCategory::Pm => self.pm,
            StrengthCategory::Pp => self.pp,
            StrengthCategory::Ba => self.ba,
            StrengthCategory::Bs => self.bs,
            StrengthCategory::Bp => self.bp,
        }
    }

    pub fn pathogenic_total(&self) -> usize {
        self.pvs + self.ps + self.pm + self.pp
    }

    pub fn benign_total(&self) -> usize {
        self.ba + self.bs + self.bp
    }

    /// True when no recognised code was counted.
    pub fn is_empty(&self) -> bool {
        self.pathogenic_total() + self.benign_total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_of("PVS1"), Some(StrengthCategory::Pvs));
        assert_eq!(category_of("PS4"), Some(StrengthCategory::Ps));
        assert_eq!(category_of("PM2"), Some(StrengthCategory::Pm));
        assert_eq!(category_of("PP5"), Some(StrengthCategory::Pp));
        assert_eq!(category_of("BA1"), Some(StrengthCategory::Ba));
        assert_eq!(category_of("BS3"), Some(StrengthCategory::Bs));
        assert_eq!(category_of("BP7"), Some(StrengthCategory::Bp));
    }

    #[test]
    fn test_unknown_codes_have_no_category() {
        // Only PVS1 is very strong; other PVS numbers are not in the vocabulary
        assert_eq!(category_of("PVS2"), None);
        assert_eq!(category_of("pm2"), None);
        assert_eq!(category_of("PM"), None);
        assert_eq!(category_of("XY1"), None);
        assert_eq!(category_of(""), None);
    }

    #[test]
    fn test_parse_trims_and_validates() {
        let code = EvidenceCode::parse("  PM2 ").unwrap();
        assert_eq!(code.as_str(), "PM2");
        assert_eq!(code.category(), StrengthCategory::Pm);
        assert_eq!(code.direction(), Direction::Pathogenic);

        assert_eq!(
            EvidenceCode::parse("ZZ9"),
            Err(EvidenceError::InvalidFormat("ZZ9".to_string()))
        );
    }

    #[test]
    fn test_code_serde_roundtrip_rejects_invalid() {
        let code: EvidenceCode = serde_json::from_str("\"BS1\"").unwrap();
        assert_eq!(code.category(), StrengthCategory::Bs);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"BS1\"");

        let invalid: Result<EvidenceCode, _> = serde_json::from_str("\"nope\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_tally_counts_duplicates_and_unknowns() {
        let tally = EvidenceTally::from_codes(["PM1", "PM1", "BP4", "junk", "PVS1"]);
        assert_eq!(tally.pm, 2);
        assert_eq!(tally.bp, 1);
        assert_eq!(tally.pvs, 1);
        assert_eq!(tally.unknown, 1);
        assert_eq!(tally.pathogenic_total(), 3);
        assert_eq!(tally.benign_total(), 1);
    }

    #[test]
    fn test_tally_empty() {
        assert!(EvidenceTally::from_codes(Vec::<String>::new()).is_empty());
        assert!(EvidenceTally::from_codes(["??"]).is_empty());
    }
}

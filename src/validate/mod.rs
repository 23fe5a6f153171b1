// SPDX-License-Identifier: PMPL-1.0-or-later

//! Cross-field checks over primitive inputs.
//!
//! These are the per-keystroke checks a data-entry surface runs. The numeric
//! variants take already-parsed numbers; the `live_*` variants take raw
//! strings and report [`FieldCheck::Empty`] for anything that is not yet a
//! number, so half-typed input never shows as an error.

use regex::Regex;
use std::sync::LazyLock;

/// Outcome of a live check on raw text input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCheck<T> {
    /// Blank or not yet parseable: nothing to report.
    Empty,
    Valid(T),
    Invalid(String),
}

impl<T> FieldCheck<T> {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldCheck::Invalid(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldCheck::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// `tested <= total` and `triggered <= tested`. Violations are joined with
/// `"; "`.
pub fn validate_test_counts(total: u32, tested: u32, triggered: u32) -> Result<(), String> {
    let mut errors = Vec::new();
    if tested > total {
        errors.push("Tested rules cannot exceed total rules");
    }
    if triggered > tested {
        errors.push("Triggered rules cannot exceed tested rules");
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

pub fn validate_tactic_counts(test: u32, triggered: u32) -> Result<(), String> {
    if triggered > test {
        Err("Triggered count cannot exceed test count".to_string())
    } else {
        Ok(())
    }
}

fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

/// Live variant of [`validate_test_counts`]. Returns [`FieldCheck::Empty`]
/// until all three fields hold a non-negative integer.
pub fn live_test_counts(total: &str, tested: &str, triggered: &str) -> FieldCheck<()> {
    match (parse_count(total), parse_count(tested), parse_count(triggered)) {
        (Some(total), Some(tested), Some(triggered)) => {
            match validate_test_counts(total, tested, triggered) {
                Ok(()) => FieldCheck::Valid(()),
                Err(message) => FieldCheck::Invalid(message),
            }
        }
        _ => FieldCheck::Empty,
    }
}

pub fn live_tactic_counts(test: &str, triggered: &str) -> FieldCheck<()> {
    match (parse_count(test), parse_count(triggered)) {
        (Some(test), Some(triggered)) => match validate_tactic_counts(test, triggered) {
            Ok(()) => FieldCheck::Valid(()),
            Err(message) => FieldCheck::Invalid(message),
        },
        _ => FieldCheck::Empty,
    }
}

static MITRE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(TA|T)\d{4}(\.\d{3})?$").unwrap());

/// Accepts `T1059`, `T1059.001` and `TA0002` after trimming and
/// upper-casing; yields the normalised id.
pub fn validate_mitre_id(value: &str) -> FieldCheck<String> {
    let normalized = value.trim().to_uppercase();
    if normalized.is_empty() {
        return FieldCheck::Empty;
    }
    if MITRE_ID_RE.is_match(&normalized) {
        FieldCheck::Valid(normalized)
    } else {
        FieldCheck::Invalid("Invalid MITRE ID format (expected T1234, T1234.001 or TA0001)".into())
    }
}

/// Integer confidence in `0..=100`, optional trailing `%`.
pub fn validate_confidence(value: &str) -> FieldCheck<u32> {
    let trimmed = value.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return FieldCheck::Empty;
    }
    match trimmed.parse::<i64>() {
        Ok(v) if (0..=100).contains(&v) => FieldCheck::Valid(v as u32),
        Ok(_) => FieldCheck::Invalid("Confidence must be between 0 and 100".into()),
        Err(_) => FieldCheck::Invalid("Confidence must be a whole number".into()),
    }
}

/// Decimal percentage in `0..=100`, optional trailing `%`.
pub fn validate_percentage(value: &str) -> FieldCheck<f64> {
    let trimmed = value.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return FieldCheck::Empty;
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(v) if (0.0..=100.0).contains(&v) => FieldCheck::Valid(v),
        Ok(_) => FieldCheck::Invalid("Percentage must be between 0 and 100".into()),
        Err(_) => FieldCheck::Invalid("Percentage must be a number".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_ordering() {
        assert!(validate_test_counts(100, 150, 10).is_err());
        assert!(validate_test_counts(100, 60, 80).is_err());
        assert!(validate_test_counts(100, 60, 40).is_ok());
        assert!(validate_test_counts(0, 0, 0).is_ok());
    }

    #[test]
    fn test_both_violations_are_reported() {
        let message = validate_test_counts(10, 20, 30).unwrap_err();
        assert_eq!(
            message,
            "Tested rules cannot exceed total rules; Triggered rules cannot exceed tested rules"
        );
    }

    #[test]
    fn test_tactic_counts() {
        assert!(validate_tactic_counts(5, 5).is_ok());
        assert!(validate_tactic_counts(5, 6).is_err());
    }

    #[test]
    fn test_partial_input_is_not_an_error() {
        assert_eq!(live_test_counts("100", "", "10"), FieldCheck::Empty);
        assert_eq!(live_test_counts("100", "6", "-"), FieldCheck::Empty);
        assert_eq!(live_tactic_counts("1x", "0"), FieldCheck::Empty);
        assert!(live_test_counts("100", "150", "10").is_invalid());
        assert_eq!(live_test_counts(" 100 ", "60", "40"), FieldCheck::Valid(()));
    }

    #[test]
    fn test_mitre_ids() {
        assert_eq!(validate_mitre_id(" t1059.001 "), FieldCheck::Valid("T1059.001".into()));
        assert_eq!(validate_mitre_id("TA0002"), FieldCheck::Valid("TA0002".into()));
        assert!(validate_mitre_id("T105").is_invalid());
        assert!(validate_mitre_id("T1059.01").is_invalid());
        assert_eq!(validate_mitre_id("   "), FieldCheck::Empty);
    }

    #[test]
    fn test_confidence_and_percentage() {
        assert_eq!(validate_confidence("95%"), FieldCheck::Valid(95));
        assert!(validate_confidence("101").is_invalid());
        assert!(validate_confidence("high").is_invalid());
        assert_eq!(validate_confidence(""), FieldCheck::Empty);
        assert_eq!(validate_percentage("37,5"), FieldCheck::Valid(37.5));
        assert!(validate_percentage("-1").message().is_some());
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! JSON load/save for assessments

use crate::types::Assessment;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Top-level keys every saved assessment must carry.
pub const REQUIRED_KEYS: [&str; 6] = [
    "general",
    "test_results",
    "mitre_tactics",
    "triggered_rules",
    "undetected_techniques",
    "recommendations",
];

pub const METADATA_KEY: &str = "_metadata";
pub const FORMAT_VERSION: &str = "1.0";
pub const APPLICATION: &str = "IDCA Security Assessment";

/// Serialises `assessment` with a `_metadata` block.
pub fn to_json(assessment: &Assessment) -> Result<String> {
    let mut value = serde_json::to_value(assessment)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            METADATA_KEY.to_string(),
            json!({
                "version": FORMAT_VERSION,
                "created_at": Utc::now().to_rfc3339(),
                "application": APPLICATION,
            }),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn save_assessment(assessment: &Assessment, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let json = to_json(assessment)?;
    fs::write(path, json).with_context(|| format!("writing assessment {}", path.display()))?;
    log::info!("saved assessment to {}", path.display());
    Ok(())
}

/// Parses a saved payload: all six keys must be present, `_metadata` is
/// dropped, and derived values are recomputed.
pub fn parse_assessment(content: &str) -> Result<Assessment> {
    let mut value: Value = serde_json::from_str(content).context("parsing assessment JSON")?;
    let map = value
        .as_object_mut()
        .ok_or_else(|| anyhow!("assessment JSON must be an object"))?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !map.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(anyhow!("invalid assessment file, missing: {}", missing.join(", ")));
    }

    if let Some(metadata) = map.remove(METADATA_KEY) {
        log::debug!("dropping metadata {metadata}");
    }

    let mut assessment: Assessment =
        serde_json::from_value(value).context("decoding assessment")?;
    assessment.recompute_all();
    assessment.renumber_recommendations();
    Ok(assessment)
}

pub fn load_assessment(path: &Path) -> Result<Assessment> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading assessment {}", path.display()))?;
    parse_assessment(&content).with_context(|| format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tactic, TestResults};

    #[test]
    fn test_metadata_is_written_and_stripped() {
        let mut assessment = Assessment::new();
        assessment.general.company_name = "Acme".into();
        assessment.test_results = TestResults::new(50, 40, 30);
        assessment.set_tactic(Tactic::Execution, 8, 3);

        let json = to_json(&assessment).unwrap();
        let raw: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(raw[METADATA_KEY]["application"], APPLICATION);
        assert_eq!(raw[METADATA_KEY]["version"], FORMAT_VERSION);

        let loaded = parse_assessment(&json).unwrap();
        assert_eq!(loaded, assessment);
    }

    #[test]
    fn test_missing_keys_are_rejected() {
        let err = parse_assessment(r#"{"general": {}, "test_results": {}}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("mitre_tactics"));
        assert!(message.contains("recommendations"));
        assert!(parse_assessment("[]").is_err());
    }

    #[test]
    fn test_derived_values_are_recomputed_on_load() {
        let payload = r#"{
            "general": {"company_name": "Acme"},
            "test_results": {"total_rules": 100, "tested_rules": 80, "triggered_rules": 60,
                             "not_tested": 999, "failed": 999, "success_rate": 1.0, "coverage_rate": 1.0},
            "mitre_tactics": {"Execution": {"test": 8, "triggered": 3, "rate": 99.0}},
            "triggered_rules": [{"name": "r", "mitre": "T1059", "tactic": "Execution", "confidence": "85"}],
            "undetected_techniques": [{"id": "T1003", "name": "OS Credential Dumping", "tactic": "Credential Access", "criticality": "Kritik"}],
            "recommendations": [{"priority": "P1", "category": "Log Kaynakları", "text": "Enable Sysmon"}]
        }"#;
        let assessment = parse_assessment(payload).unwrap();
        assert_eq!(assessment.test_results.not_tested, 20);
        assert_eq!(assessment.test_results.failed, 20);
        assert_eq!(assessment.test_results.success_rate, 75.0);
        assert_eq!(assessment.mitre_tactics[&Tactic::Execution].success_rate, 37.5);
        assert_eq!(assessment.triggered_rules[0].confidence, 85);
    }

    #[test]
    fn test_priorities_follow_entry_order_on_load() {
        let payload = r#"{
            "general": {}, "test_results": {}, "mitre_tactics": {},
            "triggered_rules": [], "undetected_techniques": [],
            "recommendations": [
                {"priority": "P7", "category": "Training", "text": "a"},
                {"category": "Other", "text": "b"},
                {"priority": "", "category": "Automation", "text": "c"}
            ]
        }"#;
        let assessment = parse_assessment(payload).unwrap();
        let priorities: Vec<_> = assessment
            .recommendations
            .iter()
            .map(|r| r.priority.as_str())
            .collect();
        assert_eq!(priorities, ["P1", "P2", "P3"]);
    }

    #[test]
    fn test_duplicate_tactic_keys_are_rejected() {
        let payload = r#"{
            "general": {}, "test_results": {},
            "mitre_tactics": {"Execution": {"test": 5, "triggered": 1}, "TA0002": {"test": 9, "triggered": 9}},
            "triggered_rules": [], "undetected_techniques": [], "recommendations": []
        }"#;
        let err = parse_assessment(payload).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate MITRE tactic"));
        let lowercase = payload.replace("TA0002", "execution");
        assert!(parse_assessment(&lowercase).is_err());
    }
}

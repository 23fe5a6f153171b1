// SPDX-License-Identifier: PMPL-1.0-or-later

//! JSON persistence and theme file round trips

use idca_report::storage::{load_assessment, save_assessment};
use idca_report::theme::{self, Theme, ThemeRegistry, DEFAULT_THEME};
use idca_report::types::{
    Assessment, Criticality, RecommendationCategory, Tactic, TestResults, TriggeredRule,
    UndetectedTechnique,
};
use tempfile::TempDir;

fn populated() -> Assessment {
    let mut assessment = Assessment::new();
    assessment.general.company_name = "Acme".into();
    assessment.general.report_date = "2025-05-05".into();
    assessment.general.classification = "Confidential".into();
    assessment.test_results = TestResults::new(300, 210, 150);
    assessment.set_tactic(Tactic::Discovery, 8, 3);
    assessment.set_tactic(Tactic::Impact, 3, 1);
    assessment.triggered_rules.push(TriggeredRule {
        name: "Mimikatz command line".into(),
        mitre_id: "T1003".into(),
        tactic: "Credential Access".into(),
        confidence: 92,
    });
    assessment.undetected_techniques.push(UndetectedTechnique {
        mitre_id: "T1486".into(),
        name: "Data Encrypted for Impact".into(),
        tactic: "Impact".into(),
        criticality: Criticality::High,
    });
    assessment.add_recommendation(RecommendationCategory::UebaSiem, "Baseline admin logons");
    assessment
}

#[test]
fn test_round_trip_preserves_derived_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("assessment.json");
    let original = populated();
    save_assessment(&original, &path).unwrap();

    let loaded = load_assessment(&path).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.test_results.success_rate, original.test_results.success_rate);
    assert_eq!(loaded.mitre_tactics[&Tactic::Discovery].success_rate, 37.5);
    assert_eq!(loaded.mitre_tactics[&Tactic::Impact].success_rate, 33.3);
}

#[test]
fn test_saved_file_uses_wire_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assessment.json");
    save_assessment(&populated(), &path).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["triggered_rules"][0]["mitre"], "T1003");
    assert_eq!(raw["undetected_techniques"][0]["id"], "T1486");
    assert_eq!(raw["undetected_techniques"][0]["criticality"], "High");
    assert_eq!(raw["recommendations"][0]["category"], "UEBA/SIEM");
    assert_eq!(raw["mitre_tactics"]["Discovery"]["triggered"], 3);
    assert!(raw["_metadata"]["created_at"].is_string());
}

#[test]
fn test_unknown_labels_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"general":{},"test_results":{},"mitre_tactics":{"Reconnaissance":{"test":1}},
            "triggered_rules":[],"undetected_techniques":[],"recommendations":[]}"#,
    )
    .unwrap();
    assert!(load_assessment(&path).is_err());
}

#[test]
fn test_custom_theme_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("themes.json");
    let mut registry = ThemeRegistry::new();
    let mut palette = theme::resolve(DEFAULT_THEME);
    palette.accent = theme::Color::rgb(0x12, 0x34, 0x56);
    registry
        .add_custom(Theme {
            name: "Corporate".into(),
            palette,
            description: "House colours".into(),
        })
        .unwrap();
    registry.save_custom_file(&path).unwrap();

    let mut fresh = ThemeRegistry::new();
    assert_eq!(fresh.load_custom_file(&path).unwrap(), 1);
    assert_eq!(fresh.resolve("corporate").accent, palette.accent);
    assert!(std::fs::read_to_string(&path).unwrap().contains("#123456"));
}

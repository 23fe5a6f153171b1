// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for idca-report
//!
//! The [`Assessment`] aggregate owns every entity of a detection-coverage
//! assessment. Derived values (rates, differences) are never trusted from
//! input: call [`Assessment::recompute_all`] after any mutation or load.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Tactics averaged into the "critical tactic" summary metric.
pub const CRITICAL_TACTICS: [Tactic; 3] = [
    Tactic::InitialAccess,
    Tactic::Execution,
    Tactic::PrivilegeEscalation,
];

/// Label that could not be mapped onto one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Advisory finding produced by `validate()`; never raised as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Entity the invariant belongs to (e.g. `"test_results"`, `"Execution"`).
    pub entity: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity, self.message)
    }
}

/// `part / whole × 100`, or 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The twelve MITRE ATT&CK enterprise tactics, in kill-chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tactic {
    InitialAccess,
    Execution,
    Persistence,
    PrivilegeEscalation,
    DefenseEvasion,
    CredentialAccess,
    Discovery,
    LateralMovement,
    Collection,
    CommandAndControl,
    Exfiltration,
    Impact,
}

impl Tactic {
    pub fn all() -> &'static [Tactic] {
        &[
            Tactic::InitialAccess,
            Tactic::Execution,
            Tactic::Persistence,
            Tactic::PrivilegeEscalation,
            Tactic::DefenseEvasion,
            Tactic::CredentialAccess,
            Tactic::Discovery,
            Tactic::LateralMovement,
            Tactic::Collection,
            Tactic::CommandAndControl,
            Tactic::Exfiltration,
            Tactic::Impact,
        ]
    }

    /// Canonical display name, also the JSON key.
    pub fn name(&self) -> &'static str {
        match self {
            Tactic::InitialAccess => "Initial Access",
            Tactic::Execution => "Execution",
            Tactic::Persistence => "Persistence",
            Tactic::PrivilegeEscalation => "Privilege Escalation",
            Tactic::DefenseEvasion => "Defense Evasion",
            Tactic::CredentialAccess => "Credential Access",
            Tactic::Discovery => "Discovery",
            Tactic::LateralMovement => "Lateral Movement",
            Tactic::Collection => "Collection",
            Tactic::CommandAndControl => "Command and Control",
            Tactic::Exfiltration => "Exfiltration",
            Tactic::Impact => "Impact",
        }
    }

    /// ATT&CK tactic identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Tactic::InitialAccess => "TA0001",
            Tactic::Execution => "TA0002",
            Tactic::Persistence => "TA0003",
            Tactic::PrivilegeEscalation => "TA0004",
            Tactic::DefenseEvasion => "TA0005",
            Tactic::CredentialAccess => "TA0006",
            Tactic::Discovery => "TA0007",
            Tactic::LateralMovement => "TA0008",
            Tactic::Collection => "TA0009",
            Tactic::Exfiltration => "TA0010",
            Tactic::CommandAndControl => "TA0011",
            Tactic::Impact => "TA0040",
        }
    }

    /// Accepts the canonical name (case-insensitive) or the `TA####` id.
    pub fn from_name(value: &str) -> Option<Self> {
        let value = value.trim();
        Tactic::all().iter().copied().find(|tactic| {
            tactic.name().eq_ignore_ascii_case(value) || tactic.id().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of an undetected technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Criticality {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Criticality {
    pub fn all() -> &'static [Criticality] {
        &[
            Criticality::Critical,
            Criticality::High,
            Criticality::Medium,
            Criticality::Low,
        ]
    }

    /// Sort key: Critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Criticality::Critical => 0,
            Criticality::High => 1,
            Criticality::Medium => 2,
            Criticality::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Criticality::Critical => "Critical",
            Criticality::High => "High",
            Criticality::Medium => "Medium",
            Criticality::Low => "Low",
        }
    }

    /// Maps English or Turkish labels onto the canonical level.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "critical" | "kritik" => Some(Criticality::Critical),
            "high" | "yüksek" | "yuksek" => Some(Criticality::High),
            "medium" | "orta" => Some(Criticality::Medium),
            "low" | "düşük" | "dusuk" => Some(Criticality::Low),
            _ => None,
        }
    }
}

impl TryFrom<String> for Criticality {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Criticality::from_label(&value).ok_or(UnknownLabel {
            kind: "criticality",
            value,
        })
    }
}

impl From<Criticality> for String {
    fn from(value: Criticality) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommendation categories offered by the data-entry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecommendationCategory {
    LogSources,
    RuleOptimization,
    NewRules,
    UebaSiem,
    TestingCycle,
    Training,
    Automation,
    #[default]
    Other,
}

impl RecommendationCategory {
    pub fn all() -> &'static [RecommendationCategory] {
        &[
            RecommendationCategory::LogSources,
            RecommendationCategory::RuleOptimization,
            RecommendationCategory::NewRules,
            RecommendationCategory::UebaSiem,
            RecommendationCategory::TestingCycle,
            RecommendationCategory::Training,
            RecommendationCategory::Automation,
            RecommendationCategory::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationCategory::LogSources => "Log Sources",
            RecommendationCategory::RuleOptimization => "Rule Optimization",
            RecommendationCategory::NewRules => "New Rules",
            RecommendationCategory::UebaSiem => "UEBA/SIEM",
            RecommendationCategory::TestingCycle => "Testing Cycle",
            RecommendationCategory::Training => "Training",
            RecommendationCategory::Automation => "Automation",
            RecommendationCategory::Other => "Other",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "log sources" | "log kaynakları" => Some(RecommendationCategory::LogSources),
            "rule optimization" | "kural optimizasyonu" => {
                Some(RecommendationCategory::RuleOptimization)
            }
            "new rules" | "yeni kurallar" => Some(RecommendationCategory::NewRules),
            "ueba/siem" => Some(RecommendationCategory::UebaSiem),
            "testing cycle" | "test döngüsü" => Some(RecommendationCategory::TestingCycle),
            "training" | "eğitim" => Some(RecommendationCategory::Training),
            "automation" | "otomasyon" => Some(RecommendationCategory::Automation),
            "other" | "diğer" => Some(RecommendationCategory::Other),
            _ => None,
        }
    }
}

impl TryFrom<String> for RecommendationCategory {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecommendationCategory::from_label(&value).ok_or(UnknownLabel {
            kind: "recommendation category",
            value,
        })
    }
}

impl From<RecommendationCategory> for String {
    fn from(value: RecommendationCategory) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Report metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub company_name: String,
    pub report_date: String,
    pub prepared_by: String,
    pub report_id: String,
    pub report_title: String,
    pub classification: String,
}

impl GeneralInfo {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.company_name.trim().is_empty() {
            issues.push(ValidationIssue::new("general", "Company name is required"));
        }
        if self.report_date.trim().is_empty() {
            issues.push(ValidationIssue::new("general", "Report date is required"));
        }
        issues
    }
}

/// Rule-coverage counters. Counters are unsigned, so the `>= 0` invariant
/// holds by construction; derived fields saturate at 0 while the ordering
/// invariants are violated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResults {
    pub total_rules: u32,
    pub tested_rules: u32,
    pub triggered_rules: u32,
    pub not_tested: u32,
    pub failed: u32,
    pub success_rate: f64,
    pub coverage_rate: f64,
}

impl TestResults {
    pub fn new(total_rules: u32, tested_rules: u32, triggered_rules: u32) -> Self {
        let mut results = Self {
            total_rules,
            tested_rules,
            triggered_rules,
            ..Self::default()
        };
        results.recompute_derived();
        results
    }

    pub fn recompute_derived(&mut self) {
        self.not_tested = self.total_rules.saturating_sub(self.tested_rules);
        self.failed = self.tested_rules.saturating_sub(self.triggered_rules);
        self.success_rate = percentage(self.triggered_rules, self.tested_rules);
        self.coverage_rate = percentage(self.tested_rules, self.total_rules);
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.tested_rules > self.total_rules {
            issues.push(ValidationIssue::new(
                "test_results",
                format!(
                    "Tested rules ({}) cannot exceed total rules ({})",
                    self.tested_rules, self.total_rules
                ),
            ));
        }
        if self.triggered_rules > self.tested_rules {
            issues.push(ValidationIssue::new(
                "test_results",
                format!(
                    "Triggered rules ({}) cannot exceed tested rules ({})",
                    self.triggered_rules, self.tested_rules
                ),
            ));
        }
        issues
    }
}

/// Per-tactic counters. `success_rate` is rounded to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct MitreTactic {
    pub tactic: Tactic,
    pub test_count: u32,
    pub triggered_count: u32,
    pub success_rate: f64,
}

impl MitreTactic {
    pub fn new(tactic: Tactic, test_count: u32, triggered_count: u32) -> Self {
        let mut row = Self {
            tactic,
            test_count,
            triggered_count,
            success_rate: 0.0,
        };
        row.recompute_derived();
        row
    }

    pub fn name(&self) -> &'static str {
        self.tactic.name()
    }

    pub fn recompute_derived(&mut self) {
        self.success_rate = round_one_decimal(percentage(self.triggered_count, self.test_count));
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.triggered_count > self.test_count {
            issues.push(ValidationIssue::new(
                self.name(),
                format!(
                    "Triggered count ({}) cannot exceed test count ({})",
                    self.triggered_count, self.test_count
                ),
            ));
        }
        issues
    }
}

/// A correlation rule that fired during testing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggeredRule {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mitre", default)]
    pub mitre_id: String,
    #[serde(default)]
    pub tactic: String,
    #[serde(default, deserialize_with = "confidence_from_any")]
    pub confidence: u32,
}

impl TriggeredRule {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let entity = if self.name.trim().is_empty() {
            "triggered_rule".to_string()
        } else {
            self.name.clone()
        };
        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::new(&entity, "Rule name is required"));
        }
        if self.mitre_id.trim().is_empty() {
            issues.push(ValidationIssue::new(&entity, "MITRE ID is required"));
        }
        if self.confidence > 100 {
            issues.push(ValidationIssue::new(
                &entity,
                format!("Confidence must be between 0 and 100 (got {})", self.confidence),
            ));
        }
        issues
    }
}

/// A technique the detection stack did not catch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UndetectedTechnique {
    #[serde(rename = "id", default)]
    pub mitre_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tactic: String,
    #[serde(default)]
    pub criticality: Criticality,
}

impl UndetectedTechnique {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let entity = if self.mitre_id.trim().is_empty() {
            "undetected_technique".to_string()
        } else {
            self.mitre_id.clone()
        };
        if self.mitre_id.trim().is_empty() {
            issues.push(ValidationIssue::new(&entity, "MITRE ID is required"));
        }
        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::new(&entity, "Technique name is required"));
        }
        issues
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category: RecommendationCategory,
    #[serde(default)]
    pub text: String,
}

impl Recommendation {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        if self.text.trim().is_empty() {
            let entity = if self.priority.is_empty() {
                "recommendation"
            } else {
                self.priority.as_str()
            };
            vec![ValidationIssue::new(entity, "Recommendation text is required")]
        } else {
            Vec::new()
        }
    }
}

/// Aggregate root: the unit of validation, serialization and rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assessment {
    pub general: GeneralInfo,
    pub test_results: TestResults,
    #[serde(with = "tactic_map")]
    pub mitre_tactics: BTreeMap<Tactic, MitreTactic>,
    pub triggered_rules: Vec<TriggeredRule>,
    pub undetected_techniques: Vec<UndetectedTechnique>,
    pub recommendations: Vec<Recommendation>,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes every derived field. Idempotent.
    pub fn recompute_all(&mut self) {
        self.test_results.recompute_derived();
        for tactic in self.mitre_tactics.values_mut() {
            tactic.recompute_derived();
        }
    }

    pub fn validate_all(&self) -> Vec<ValidationIssue> {
        let mut issues = self.general.validate();
        issues.extend(self.test_results.validate());
        for tactic in self.mitre_tactics.values() {
            issues.extend(tactic.validate());
        }
        for rule in &self.triggered_rules {
            issues.extend(rule.validate());
        }
        for technique in &self.undetected_techniques {
            issues.extend(technique.validate());
        }
        for recommendation in &self.recommendations {
            issues.extend(recommendation.validate());
        }
        issues
    }

    /// Resets the aggregate to an empty assessment.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Inserts or replaces the counters of one tactic.
    pub fn set_tactic(&mut self, tactic: Tactic, test_count: u32, triggered_count: u32) {
        self.mitre_tactics
            .insert(tactic, MitreTactic::new(tactic, test_count, triggered_count));
    }

    pub fn remove_tactic(&mut self, tactic: Tactic) -> Option<MitreTactic> {
        self.mitre_tactics.remove(&tactic)
    }

    /// Appends a recommendation labelled with the next `P{n}` priority.
    pub fn add_recommendation(&mut self, category: RecommendationCategory, text: impl Into<String>) {
        let priority = format!("P{}", self.recommendations.len() + 1);
        self.recommendations.push(Recommendation {
            priority,
            category,
            text: text.into(),
        });
    }

    /// Relabels priorities `P1..Pn` by entry order (after removals).
    pub fn renumber_recommendations(&mut self) {
        for (idx, recommendation) in self.recommendations.iter_mut().enumerate() {
            recommendation.priority = format!("P{}", idx + 1);
        }
    }

    /// Tactics ascending by success rate, worst first. Ties keep the
    /// canonical tactic order.
    pub fn tactics_by_success_rate(&self) -> Vec<&MitreTactic> {
        let mut rows: Vec<&MitreTactic> = self.mitre_tactics.values().collect();
        rows.sort_by(|a, b| a.success_rate.total_cmp(&b.success_rate));
        rows
    }

    pub fn mean_tactic_success_rate(&self) -> Option<f64> {
        mean(self.mitre_tactics.values().map(|t| t.success_rate))
    }

    /// Mean success rate over the entered [`CRITICAL_TACTICS`].
    pub fn critical_tactic_average(&self) -> Option<f64> {
        mean(
            CRITICAL_TACTICS
                .iter()
                .filter_map(|tactic| self.mitre_tactics.get(tactic))
                .map(|t| t.success_rate),
        )
    }

    /// Undetected techniques by severity, Critical first; stable for ties.
    pub fn undetected_by_criticality(&self) -> Vec<&UndetectedTechnique> {
        let mut rows: Vec<&UndetectedTechnique> = self.undetected_techniques.iter().collect();
        rows.sort_by_key(|t| t.criticality.rank());
        rows
    }

    pub fn criticality_count(&self, level: Criticality) -> usize {
        self.undetected_techniques
            .iter()
            .filter(|t| t.criticality == level)
            .count()
    }

    pub fn average_confidence(&self) -> Option<f64> {
        mean(self.triggered_rules.iter().map(|r| f64::from(r.confidence)))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Accepts `87`, `87.0`, `"87"` and `"87%"`.
fn confidence_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Int(v) => v,
        Raw::Float(v) => v.round() as i64,
        Raw::Text(text) => {
            let trimmed = text.trim().trim_end_matches('%').trim();
            if trimmed.is_empty() {
                0
            } else {
                trimmed
                    .parse::<i64>()
                    .map_err(|_| D::Error::custom(format!("invalid confidence: {text:?}")))?
            }
        }
    };
    u32::try_from(value).map_err(|_| D::Error::custom(format!("invalid confidence: {value}")))
}

/// `{"<Tactic Name>": {"test": n, "triggered": n, "rate": x}}`
mod tactic_map {
    use super::{MitreTactic, Tactic};
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize)]
    struct Counts {
        #[serde(default)]
        test: u32,
        #[serde(default)]
        triggered: u32,
        #[serde(default)]
        rate: f64,
    }

    pub fn serialize<S>(map: &BTreeMap<Tactic, MitreTactic>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (tactic, row) in map {
            out.serialize_entry(
                tactic.name(),
                &Counts {
                    test: row.test_count,
                    triggered: row.triggered_count,
                    rate: row.success_rate,
                },
            )?;
        }
        out.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Tactic, MitreTactic>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Counts>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for (name, counts) in raw {
            let tactic = Tactic::from_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown MITRE tactic: {name:?}")))?;
            let row = MitreTactic {
                tactic,
                test_count: counts.test,
                triggered_count: counts.triggered,
                success_rate: counts.rate,
            };
            if map.insert(tactic, row).is_some() {
                return Err(D::Error::custom(format!(
                    "duplicate MITRE tactic {name:?} (same as {:?})",
                    tactic.name()
                )));
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_derived_values() {
        let results = TestResults::new(300, 240, 180);
        assert_eq!(results.not_tested, 60);
        assert_eq!(results.failed, 60);
        assert_eq!(results.success_rate, 75.0);
        assert_eq!(results.coverage_rate, 80.0);
    }

    #[test]
    fn test_results_zero_denominators() {
        let results = TestResults::new(0, 0, 0);
        assert_eq!(results.success_rate, 0.0);
        assert_eq!(results.coverage_rate, 0.0);
    }

    #[test]
    fn tactic_rate_rounds_to_one_decimal() {
        assert_eq!(MitreTactic::new(Tactic::Discovery, 8, 3).success_rate, 37.5);
        assert_eq!(MitreTactic::new(Tactic::Discovery, 3, 1).success_rate, 33.3);
        assert_eq!(MitreTactic::new(Tactic::Discovery, 0, 0).success_rate, 0.0);
    }

    #[test]
    fn tactic_lookup_accepts_names_and_ids() {
        assert_eq!(Tactic::from_name("command and control"), Some(Tactic::CommandAndControl));
        assert_eq!(Tactic::from_name("TA0040"), Some(Tactic::Impact));
        assert_eq!(Tactic::from_name("Reconnaissance"), None);
        assert_eq!(Tactic::all().len(), 12);
    }

    #[test]
    fn criticality_aliases_are_bilingual() {
        assert_eq!(Criticality::from_label("Kritik"), Some(Criticality::Critical));
        assert_eq!(Criticality::from_label("yüksek"), Some(Criticality::High));
        assert_eq!(Criticality::from_label(" Orta "), Some(Criticality::Medium));
        assert_eq!(Criticality::from_label("Düşük"), Some(Criticality::Low));
        assert_eq!(Criticality::from_label("severe"), None);
    }

    #[test]
    fn validation_flags_count_ordering() {
        let mut assessment = Assessment::new();
        assessment.general.company_name = "Acme".into();
        assessment.general.report_date = "2025-01-01".into();
        assessment.test_results = TestResults::new(100, 150, 10);
        assessment.set_tactic(Tactic::Execution, 2, 5);

        let issues = assessment.validate_all();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].entity, "test_results");
        assert_eq!(issues[1].entity, "Execution");
    }

    #[test]
    fn validation_requires_general_fields() {
        let issues = Assessment::new().validate_all();
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert!(messages.contains(&"Company name is required"));
        assert!(messages.contains(&"Report date is required"));
    }

    #[test]
    fn triggered_rule_confidence_bounds() {
        let rule = TriggeredRule {
            name: "Suspicious PowerShell".into(),
            mitre_id: "T1059.001".into(),
            tactic: "Execution".into(),
            confidence: 120,
        };
        assert_eq!(rule.validate().len(), 1);
    }

    #[test]
    fn recommendations_are_numbered_by_entry_order() {
        let mut assessment = Assessment::new();
        assessment.add_recommendation(RecommendationCategory::LogSources, "Enable Sysmon");
        assessment.add_recommendation(RecommendationCategory::NewRules, "Detect LSASS access");
        assessment.add_recommendation(RecommendationCategory::Training, "SOC drills");
        assessment.recommendations.remove(0);
        assessment.renumber_recommendations();
        let priorities: Vec<_> = assessment
            .recommendations
            .iter()
            .map(|r| r.priority.as_str())
            .collect();
        assert_eq!(priorities, vec!["P1", "P2"]);
    }

    #[test]
    fn tactics_sort_worst_first() {
        let mut assessment = Assessment::new();
        assessment.set_tactic(Tactic::InitialAccess, 10, 9);
        assessment.set_tactic(Tactic::Execution, 10, 3);
        assessment.set_tactic(Tactic::Persistence, 10, 6);
        let order: Vec<_> = assessment
            .tactics_by_success_rate()
            .iter()
            .map(|t| t.tactic)
            .collect();
        assert_eq!(
            order,
            vec![Tactic::Execution, Tactic::Persistence, Tactic::InitialAccess]
        );
    }

    #[test]
    fn critical_average_uses_entered_tactics_only() {
        let mut assessment = Assessment::new();
        assert_eq!(assessment.critical_tactic_average(), None);
        assessment.set_tactic(Tactic::InitialAccess, 10, 8);
        assessment.set_tactic(Tactic::Execution, 10, 4);
        assessment.set_tactic(Tactic::Impact, 10, 0);
        assert_eq!(assessment.critical_tactic_average(), Some(60.0));
    }

    #[test]
    fn confidence_accepts_strings() {
        let rule: TriggeredRule =
            serde_json::from_str(r#"{"name":"a","mitre":"T1003","tactic":"x","confidence":"95%"}"#)
                .unwrap();
        assert_eq!(rule.confidence, 95);
        let rule: TriggeredRule =
            serde_json::from_str(r#"{"name":"a","mitre":"T1003","tactic":"x","confidence":88}"#)
                .unwrap();
        assert_eq!(rule.confidence, 88);
        assert!(serde_json::from_str::<TriggeredRule>(
            r#"{"name":"a","mitre":"T1003","tactic":"x","confidence":"high"}"#
        )
        .is_err());
    }

    #[test]
    fn tactic_map_uses_canonical_keys() {
        let mut assessment = Assessment::new();
        assessment.set_tactic(Tactic::CommandAndControl, 4, 1);
        let value = serde_json::to_value(&assessment).unwrap();
        assert_eq!(value["mitre_tactics"]["Command and Control"]["test"], 4);
        assert_eq!(value["mitre_tactics"]["Command and Control"]["rate"], 25.0);
    }
}

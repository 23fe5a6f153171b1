// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for idca-report.
//!
//! Embeds all artifact strings as compile-time static tables, scanned
//! linearly on lookup.
//!
//! ## Adding a new key
//!
//! 1. Add the English entry to `EN`
//! 2. Add the Turkish entry to `TR` (missing keys fall back to English)

use serde::{Deserialize, Serialize};

/// Output language for artifact labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Tr,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Tr => "tr",
        }
    }

    /// Parse an ISO 639-1 code. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "tr" => Some(Lang::Tr),
            _ => None,
        }
    }

    /// All supported languages, in display order.
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Tr]
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Translation Lookup ─────────────────────────────────────────────

/// Look up a translation key in the specified language.
///
/// Falls back to English when the key is missing in the requested language,
/// and to the key itself when it is missing everywhere.
///
/// # Examples
///
/// ```
/// use idca_report::i18n::{t, Lang};
/// assert_eq!(t(Lang::En, "table5.title"), "Table 5: Recommended Correlation Rules");
/// assert_eq!(t(Lang::Tr, "level.critical"), "Kritik");
/// ```
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    if let Some(value) = lookup(catalog_for(lang), key) {
        return value;
    }
    if lang != Lang::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    key
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
}

fn catalog_for(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::Tr => TR,
    }
}

// ─── English (source language, all keys defined here) ──────────────

const EN: &[(&str, &str)] = &[
    // Shared labels
    ("label.rules", "rules"),
    ("label.success_rate", "Success Rate"),
    ("label.total", "Total"),
    // Figure 1
    ("fig1.title", "Figure 1: Test Coverage Analysis"),
    ("fig1.tested", "Tested"),
    ("fig1.not_tested", "Not Tested"),
    ("fig1.total_rules", "Total Rules"),
    ("fig1.no_data", "No data available"),
    ("stats.tested", "Tested"),
    ("stats.triggered", "Triggered"),
    ("stats.failed", "Failed"),
    ("stats.not_tested", "Not tested"),
    // Figure 2
    ("fig2.title", "Figure 2: Test Status Overview"),
    ("fig2.distribution", "Test Results Distribution"),
    ("fig2.triggered", "Triggered"),
    ("fig2.failed", "Failed"),
    ("fig2.rule_count", "Rule Count"),
    ("fig2.lowest", "Lowest Performing Tactics"),
    ("fig2.axis", "Success Rate (%)"),
    ("fig2.min_target", "Minimum target 50%"),
    ("fig2.ideal_target", "Ideal target 70%"),
    ("fig2.no_tactics", "No MITRE data"),
    // Table 1
    ("table1.title", "Table 1: Assessment Summary"),
    ("table1.metric", "Metric"),
    ("table1.value", "Value"),
    ("table1.target", "Target"),
    ("table1.status", "Status"),
    ("table1.description", "Description"),
    ("table1.total_rules", "Total Rules"),
    ("table1.total_rules_desc", "Coverage assessment"),
    ("table1.tested_rules", "Tested Rules"),
    ("table1.tested_rules_desc", "Test coverage"),
    ("table1.success_rate", "Success Rate"),
    ("table1.success_rate_desc", "Detection capability"),
    ("table1.not_tested", "Not Tested"),
    ("table1.not_tested_desc", "Out of scope"),
    ("table1.critical_avg", "Critical Tactic Average"),
    ("table1.critical_avg_desc", "IA, EX, PE average"),
    ("table1.legend", "PASS: on target | CAUTION: needs attention | FAIL: critical"),
    ("status.pass", "PASS"),
    ("status.caution", "CAUTION"),
    ("status.fail", "FAIL"),
    // Table 2
    ("table2.title", "Table 2: MITRE ATT&CK Coverage Analysis"),
    ("table2.tactic", "Tactic"),
    ("table2.tested", "Tested"),
    ("table2.triggered", "Triggered"),
    ("table2.success", "Success %"),
    ("table2.risk", "Risk Level"),
    ("table2.average", "Average Success Rate"),
    ("table2.total_tested", "Total Tested"),
    ("table2.total_triggered", "Total Triggered"),
    ("risk.critical", "Critical"),
    ("risk.medium", "Medium"),
    ("risk.low", "Low"),
    // Table 3
    ("table3.title", "Table 3: Triggered Correlation Rules"),
    ("table3.id", "ID"),
    ("table3.name", "Rule Name"),
    ("table3.mitre", "MITRE ID"),
    ("table3.tactic", "Tactic"),
    ("table3.confidence", "Confidence"),
    ("table3.avg_confidence", "Average Confidence"),
    // Table 4
    ("table4.title", "Table 4: Undetected MITRE Techniques"),
    ("table4.mitre", "MITRE ID"),
    ("table4.name", "Technique Name"),
    ("table4.tactic", "Tactic"),
    ("table4.criticality", "Criticality"),
    ("table4.priority", "Priority"),
    ("table4.attention", "require immediate attention"),
    ("level.critical", "Critical"),
    ("level.high", "High"),
    ("level.medium", "Medium"),
    ("level.low", "Low"),
    // Table 5
    ("table5.title", "Table 5: Recommended Correlation Rules"),
    ("table5.priority", "Priority"),
    ("table5.category", "Category"),
    ("table5.text", "Recommendation"),
    ("table5.impact", "Impact"),
    ("table5.recommendations", "recommendations"),
    ("impact.high", "High"),
    ("impact.medium", "Medium"),
    ("impact.normal", "Normal"),
    ("category.log_sources", "Log Sources"),
    ("category.rule_optimization", "Rule Optimization"),
    ("category.new_rules", "New Rules"),
    ("category.ueba_siem", "UEBA/SIEM"),
    ("category.testing_cycle", "Testing Cycle"),
    ("category.training", "Training"),
    ("category.automation", "Automation"),
    ("category.other", "Other"),
];

// ─── Turkish ────────────────────────────────────────────────────────

const TR: &[(&str, &str)] = &[
    ("label.rules", "kural"),
    ("label.success_rate", "Başarı Oranı"),
    ("label.total", "Toplam"),
    ("fig1.title", "Figure 1: Analiz Edilen Korelasyonların Test Uygunluk Grafiği"),
    ("fig1.tested", "Test Edilmiş"),
    ("fig1.not_tested", "Test Edilmemiş"),
    ("fig1.total_rules", "Toplam Kural"),
    ("fig1.no_data", "Veri yok"),
    ("stats.tested", "Test Edilen"),
    ("stats.triggered", "Tetiklenen"),
    ("stats.failed", "Başarısız"),
    ("stats.not_tested", "Test Edilmeyen"),
    ("fig2.title", "Figure 2: Test Edilen Korelasyonların Durumu"),
    ("fig2.distribution", "Test Sonuç Dağılımı"),
    ("fig2.triggered", "Tetiklenen"),
    ("fig2.failed", "Başarısız"),
    ("fig2.rule_count", "Kural Sayısı"),
    ("fig2.lowest", "En Düşük Performanslı Taktikler"),
    ("fig2.axis", "Başarı Oranı (%)"),
    ("fig2.min_target", "Minimum Hedef %50"),
    ("fig2.ideal_target", "İdeal Hedef %70"),
    ("fig2.no_tactics", "MITRE verisi yok"),
    ("table1.title", "Table 1: Sonuç Değerlendirme Tablosu"),
    ("table1.metric", "Metrik"),
    ("table1.value", "Değer"),
    ("table1.target", "Hedef"),
    ("table1.status", "Durum"),
    ("table1.description", "Açıklama"),
    ("table1.total_rules", "Toplam Kural Sayısı"),
    ("table1.total_rules_desc", "Kural kapsam değerlendirmesi"),
    ("table1.tested_rules", "Test Edilen Kural"),
    ("table1.tested_rules_desc", "Test kapsam değerlendirmesi"),
    ("table1.success_rate", "Başarı Oranı"),
    ("table1.success_rate_desc", "Genel tespit yeteneği"),
    ("table1.not_tested", "Test Edilmeyen"),
    ("table1.not_tested_desc", "Kapsam dışı kural sayısı"),
    ("table1.critical_avg", "Kritik Taktik Ortalaması"),
    ("table1.critical_avg_desc", "IA, EX, PE ortalaması"),
    ("table1.legend", "BAŞARILI | DİKKAT: dikkat gerekli | KRİTİK"),
    ("status.pass", "BAŞARILI"),
    ("status.caution", "DİKKAT"),
    ("status.fail", "KRİTİK"),
    ("table2.title", "Table 2: MITRE ATT&CK Kapsama Analizi"),
    ("table2.tactic", "Taktik"),
    ("table2.tested", "Test"),
    ("table2.triggered", "Tetiklenen"),
    ("table2.success", "Başarı %"),
    ("table2.risk", "Risk Seviyesi"),
    ("table2.average", "Ortalama Başarı"),
    ("table2.total_tested", "Toplam Test"),
    ("table2.total_triggered", "Toplam Başarılı"),
    ("risk.critical", "Kritik"),
    ("risk.medium", "Orta"),
    ("risk.low", "Düşük"),
    ("table3.title", "Table 3: Tetiklenen Korelasyon Kuralları"),
    ("table3.id", "No"),
    ("table3.name", "Kural Adı"),
    ("table3.mitre", "MITRE ID"),
    ("table3.tactic", "Taktik"),
    ("table3.confidence", "Güven"),
    ("table3.avg_confidence", "Ortalama Güven"),
    ("table4.title", "Table 4: Algılanamayan MITRE Teknikleri"),
    ("table4.mitre", "MITRE ID"),
    ("table4.name", "Teknik Adı"),
    ("table4.tactic", "Taktik"),
    ("table4.criticality", "Kritiklik"),
    ("table4.priority", "Öncelik"),
    ("table4.attention", "acil müdahale gerektiriyor"),
    ("level.critical", "Kritik"),
    ("level.high", "Yüksek"),
    ("level.medium", "Orta"),
    ("level.low", "Düşük"),
    ("table5.title", "Table 5: Önerilen Korelasyon Kuralları"),
    ("table5.priority", "Öncelik"),
    ("table5.category", "Kategori"),
    ("table5.text", "Öneri"),
    ("table5.impact", "Etki"),
    ("table5.recommendations", "öneri"),
    ("impact.high", "Yüksek"),
    ("impact.medium", "Orta"),
    ("impact.normal", "Normal"),
    ("category.log_sources", "Log Kaynakları"),
    ("category.rule_optimization", "Kural Optimizasyonu"),
    ("category.new_rules", "Yeni Kurallar"),
    ("category.ueba_siem", "UEBA/SIEM"),
    ("category.testing_cycle", "Test Döngüsü"),
    ("category.training", "Eğitim"),
    ("category.automation", "Otomasyon"),
    ("category.other", "Diğer"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keys_all_resolve() {
        for &(key, _) in EN {
            assert!(lookup(EN, key).is_some_and(|v| !v.is_empty()), "EN key '{}' is blank", key);
        }
    }

    #[test]
    fn turkish_catalog_covers_english_keys() {
        for &(key, _) in EN {
            assert!(
                lookup(TR, key).is_some(),
                "TR catalog is missing key '{}'",
                key
            );
        }
        assert_eq!(TR.len(), EN.len(), "TR catalog key count mismatch");
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(t(Lang::Tr, "nonexistent.key"), "nonexistent.key");
        assert_eq!(t(Lang::En, ""), "");
    }

    #[test]
    fn lang_roundtrip() {
        for lang in Lang::all() {
            let parsed = Lang::from_code(lang.code()).expect("should parse");
            assert_eq!(*lang, parsed);
        }
        assert_eq!(Lang::from_code("TR"), Some(Lang::Tr));
        assert_eq!(Lang::from_code("de"), None);
    }
}

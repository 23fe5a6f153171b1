// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation for rendered artifacts.
//!
//! Every title, header and footer string drawn into an artifact comes from
//! the catalog, keyed by dotted names (`"table2.title"`, `"level.high"`).
//! Lookups fall back to English, then to the key itself, so a missing
//! translation degrades to readable text instead of failing a render.
//!
//! | Code | Language | Native name |
//! |------|----------|-------------|
//! | en   | English  | English     |
//! | tr   | Turkish  | Türkçe      |

mod catalog;

pub use catalog::{t, Lang};

use crate::types::{Criticality, RecommendationCategory};

/// `75.0%` in English, `%75.0` in Turkish.
pub fn format_percent(lang: Lang, value: f64) -> String {
    match lang {
        Lang::En => format!("{value:.1}%"),
        Lang::Tr => format!("%{value:.1}"),
    }
}

pub fn criticality_label(lang: Lang, level: Criticality) -> &'static str {
    let key = match level {
        Criticality::Critical => "level.critical",
        Criticality::High => "level.high",
        Criticality::Medium => "level.medium",
        Criticality::Low => "level.low",
    };
    t(lang, key)
}

pub fn category_label(lang: Lang, category: RecommendationCategory) -> &'static str {
    let key = match category {
        RecommendationCategory::LogSources => "category.log_sources",
        RecommendationCategory::RuleOptimization => "category.rule_optimization",
        RecommendationCategory::NewRules => "category.new_rules",
        RecommendationCategory::UebaSiem => "category.ueba_siem",
        RecommendationCategory::TestingCycle => "category.testing_cycle",
        RecommendationCategory::Training => "category.training",
        RecommendationCategory::Automation => "category.automation",
        RecommendationCategory::Other => "category.other",
    };
    t(lang, key)
}

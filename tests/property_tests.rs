// SPDX-License-Identifier: PMPL-1.0-or-later

//! Property tests over derived values and classification scales

use idca_report::theme::{classify_performance, classify_status, SemanticRole};
use idca_report::types::{Assessment, MitreTactic, Tactic, TestResults};
use idca_report::validate::validate_test_counts;
use proptest::prelude::*;

fn ordered_counts() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..100_000).prop_flat_map(|total| {
        (0..=total).prop_flat_map(move |tested| (Just(total), Just(tested), 0..=tested))
    })
}

proptest! {
    #[test]
    fn derived_counts_partition_totals((total, tested, triggered) in ordered_counts()) {
        let results = TestResults::new(total, tested, triggered);
        prop_assert_eq!(results.not_tested + results.tested_rules, total);
        prop_assert_eq!(results.failed + results.triggered_rules, tested);
        prop_assert!((0.0..=100.0).contains(&results.success_rate));
        prop_assert!((0.0..=100.0).contains(&results.coverage_rate));
        prop_assert!(validate_test_counts(total, tested, triggered).is_ok());
        prop_assert!(results.validate().is_empty());
    }

    #[test]
    fn recompute_is_idempotent(
        (total, tested, triggered) in ordered_counts(),
        test in 0u32..500,
        hits in 0u32..500,
    ) {
        let mut assessment = Assessment::new();
        assessment.test_results.total_rules = total;
        assessment.test_results.tested_rules = tested;
        assessment.test_results.triggered_rules = triggered;
        assessment.set_tactic(Tactic::Collection, test, hits);
        assessment.recompute_all();
        let once = assessment.clone();
        assessment.recompute_all();
        prop_assert_eq!(assessment, once);
    }

    #[test]
    fn invalid_orderings_are_reported(total in 0u32..1000, extra in 1u32..1000) {
        prop_assert!(validate_test_counts(total, total + extra, 0).is_err());
        prop_assert!(validate_test_counts(total + extra, total, total + extra).is_err());
    }

    #[test]
    fn tactic_rate_has_one_decimal(test in 1u32..10_000, hits in 0u32..10_000) {
        let hits = hits.min(test);
        let rate = MitreTactic::new(Tactic::Impact, test, hits).success_rate;
        prop_assert!((rate * 10.0 - (rate * 10.0).round()).abs() < 1e-9);
        prop_assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn four_tier_scale_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let rank = |role: SemanticRole| match role {
            SemanticRole::Danger => 0,
            SemanticRole::Warning => 1,
            SemanticRole::Accent => 2,
            SemanticRole::Success => 3,
            _ => 99,
        };
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify_performance(low)) <= rank(classify_performance(high)));
        prop_assert_ne!(classify_status(low), SemanticRole::Accent);
    }
}

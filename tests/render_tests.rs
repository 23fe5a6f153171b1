// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end render runs against a temporary output directory

use idca_report::i18n::Lang;
use idca_report::report::{render_all, render_all_with_progress, ArtifactOutcome, PreconditionError};
use idca_report::theme::{self, DEFAULT_THEME};
use idca_report::types::{
    Assessment, Criticality, RecommendationCategory, Tactic, TestResults, UndetectedTechnique,
};
use idca_report::{Artifact, RenderSettings, SkipReason};
use tempfile::TempDir;

fn small_settings() -> RenderSettings {
    RenderSettings {
        width: 4.0,
        height: 3.0,
        dpi: 100,
        transparent_background: true,
        lang: Lang::En,
    }
}

fn sample_assessment() -> Assessment {
    let mut assessment = Assessment::new();
    assessment.general.company_name = "Acme Bank".into();
    assessment.general.report_date = "2025-04-01".into();
    assessment.general.prepared_by = "SOC Team".into();
    assessment.test_results = TestResults::new(320, 240, 168);
    assessment.set_tactic(Tactic::InitialAccess, 20, 18);
    assessment.set_tactic(Tactic::Execution, 30, 12);
    assessment.set_tactic(Tactic::CredentialAccess, 15, 9);
    assessment.undetected_techniques.push(UndetectedTechnique {
        mitre_id: "T1003.001".into(),
        name: "LSASS Memory".into(),
        tactic: "Credential Access".into(),
        criticality: Criticality::Critical,
    });
    assessment.add_recommendation(RecommendationCategory::LogSources, "Forward Sysmon event 10");
    assessment
}

#[test]
fn test_empty_triggered_rules_skip_only_table3() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");
    let report = render_all(&sample_assessment(), DEFAULT_THEME, &small_settings(), &out).unwrap();

    assert_eq!(report.outcomes.len(), 7);
    assert!(matches!(
        report.get(Artifact::Table3TriggeredRules),
        Some(ArtifactOutcome::Skipped(SkipReason::NoTriggeredRules))
    ));
    for artifact in Artifact::all() {
        if *artifact == Artifact::Table3TriggeredRules {
            continue;
        }
        match report.get(*artifact) {
            Some(ArtifactOutcome::Success(path)) => {
                assert!(path.exists(), "{} should be written", path.display());
                assert_eq!(path.file_name().unwrap().to_str().unwrap(), artifact.file_name());
            }
            other => panic!("{artifact} should render, got {other:?}"),
        }
    }
    assert_eq!(report.succeeded(), 6);
    assert!(!report.all_attempted_failed());
}

#[test]
fn test_written_png_has_settings_dimensions() {
    let dir = TempDir::new().unwrap();
    let report = render_all(&sample_assessment(), "Klasik", &small_settings(), dir.path()).unwrap();
    let Some(ArtifactOutcome::Success(path)) = report.get(Artifact::Table1Summary) else {
        panic!("table 1 should render");
    };
    let image = image::open(path).unwrap();
    assert_eq!((image.width(), image.height()), (400, 300));
}

#[test]
fn test_preconditions_block_the_run() {
    let dir = TempDir::new().unwrap();
    let mut assessment = sample_assessment();
    assessment.general.company_name = "  ".into();
    let result = render_all(&assessment, DEFAULT_THEME, &small_settings(), dir.path());
    assert!(matches!(result, Err(PreconditionError::MissingCompanyName)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_progress_visits_catalogue_in_order() {
    let dir = TempDir::new().unwrap();
    let palette = theme::resolve("Modern");
    let mut seen = Vec::new();
    render_all_with_progress(
        &sample_assessment(),
        &palette,
        &small_settings(),
        dir.path(),
        |index, total, artifact| {
            assert_eq!(total, 7);
            seen.push((index, artifact));
        },
    )
    .unwrap();
    let order: Vec<_> = seen.iter().map(|(_, artifact)| *artifact).collect();
    assert_eq!(order, Artifact::all().to_vec());
    assert_eq!(seen.last().unwrap().0, 6);
}

#[test]
fn test_write_failure_is_isolated_per_artifact() {
    let dir = TempDir::new().unwrap();
    // a directory squatting on the PNG path makes that one write fail
    std::fs::create_dir(dir.path().join(Artifact::Table1Summary.file_name())).unwrap();
    let report = render_all(&sample_assessment(), DEFAULT_THEME, &small_settings(), dir.path()).unwrap();
    assert!(matches!(
        report.get(Artifact::Table1Summary),
        Some(ArtifactOutcome::Failed(_))
    ));
    assert!(report.get(Artifact::Table2MitreCoverage).unwrap().is_success());
    assert_eq!(report.failed(), 1);
}

#[test]
fn test_render_does_not_mutate_input() {
    let dir = TempDir::new().unwrap();
    let mut assessment = sample_assessment();
    assessment.test_results.failed = 12345;
    let before = assessment.clone();
    render_all(&assessment, DEFAULT_THEME, &small_settings(), dir.path()).unwrap();
    assert_eq!(assessment, before);
}

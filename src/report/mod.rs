// SPDX-License-Identifier: PMPL-1.0-or-later

//! Render orchestration: the fixed artifact catalogue, one pass.
//!
//! [`render_all`] snapshots the assessment, recomputes derived values,
//! checks the blocking preconditions once, and then renders every artifact in
//! catalogue order. A failing artifact is recorded and the loop moves on.

pub mod formatter;

use crate::render::{self, Artifact, ArtifactError, RenderSettings, Rendered, SkipReason};
use crate::theme::{Palette, ThemeRegistry};
use crate::types::Assessment;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use formatter::ReportFormatter;

/// Blocking condition checked before the render loop starts.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("company name is required before rendering")]
    MissingCompanyName,
    #[error("total rules must be greater than zero before rendering")]
    MissingTotalRules,
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub enum ArtifactOutcome {
    Success(PathBuf),
    Skipped(SkipReason),
    Failed(ArtifactError),
}

impl ArtifactOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ArtifactOutcome::Success(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ArtifactOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ArtifactOutcome::Failed(_))
    }
}

/// Per-artifact outcomes of one run, keyed in catalogue order.
#[derive(Debug)]
pub struct RenderReport {
    pub output_dir: PathBuf,
    pub outcomes: BTreeMap<Artifact, ArtifactOutcome>,
}

impl RenderReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_failed()).count()
    }

    /// True when at least one artifact was attempted and none succeeded.
    pub fn all_attempted_failed(&self) -> bool {
        let attempted = self.outcomes.len() - self.skipped();
        attempted > 0 && self.failed() == attempted
    }

    pub fn get(&self, artifact: Artifact) -> Option<&ArtifactOutcome> {
        self.outcomes.get(&artifact)
    }
}

pub fn check_preconditions(assessment: &Assessment) -> Result<(), PreconditionError> {
    if assessment.general.company_name.trim().is_empty() {
        return Err(PreconditionError::MissingCompanyName);
    }
    if assessment.test_results.total_rules == 0 {
        return Err(PreconditionError::MissingTotalRules);
    }
    Ok(())
}

/// Resolves `theme_name` against the built-in themes and renders the whole
/// catalogue into `output_dir`.
pub fn render_all(
    assessment: &Assessment,
    theme_name: &str,
    settings: &RenderSettings,
    output_dir: &Path,
) -> Result<RenderReport, PreconditionError> {
    let palette = ThemeRegistry::new().resolve(theme_name);
    render_all_with_progress(assessment, &palette, settings, output_dir, |_, _, _| {})
}

/// Like [`render_all`] with an already resolved palette. `progress` runs
/// before each artifact with `(index, total, artifact)`.
pub fn render_all_with_progress<F>(
    assessment: &Assessment,
    palette: &Palette,
    settings: &RenderSettings,
    output_dir: &Path,
    mut progress: F,
) -> Result<RenderReport, PreconditionError>
where
    F: FnMut(usize, usize, Artifact),
{
    let mut snapshot = assessment.clone();
    snapshot.recompute_all();
    check_preconditions(&snapshot)?;

    let issues = snapshot.validate_all();
    if !issues.is_empty() {
        log::warn!("rendering with {} validation issue(s)", issues.len());
        for issue in &issues {
            log::warn!("  {issue}");
        }
    }

    fs::create_dir_all(output_dir).map_err(|source| PreconditionError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let catalogue = Artifact::all();
    let mut outcomes = BTreeMap::new();
    for (index, artifact) in catalogue.iter().copied().enumerate() {
        progress(index, catalogue.len(), artifact);
        log::debug!("rendering {artifact}");
        let outcome = render_one(artifact, &snapshot, palette, settings, output_dir);
        match &outcome {
            ArtifactOutcome::Success(path) => log::info!("{artifact} -> {}", path.display()),
            ArtifactOutcome::Skipped(reason) => log::warn!("{artifact}: {reason}"),
            ArtifactOutcome::Failed(err) => log::warn!("{artifact} failed: {err}"),
        }
        outcomes.insert(artifact, outcome);
    }

    Ok(RenderReport {
        output_dir: output_dir.to_path_buf(),
        outcomes,
    })
}

fn render_one(
    artifact: Artifact,
    assessment: &Assessment,
    palette: &Palette,
    settings: &RenderSettings,
    output_dir: &Path,
) -> ArtifactOutcome {
    match render::render_artifact(artifact, assessment, palette, settings) {
        Ok(Rendered::Image(image)) => {
            let path = output_dir.join(artifact.file_name());
            match render::save_png(&image, &path) {
                Ok(()) => ArtifactOutcome::Success(path),
                Err(err) => ArtifactOutcome::Failed(err),
            }
        }
        Ok(Rendered::Skipped(reason)) => ArtifactOutcome::Skipped(reason),
        Err(err) => ArtifactOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestResults;

    #[test]
    fn test_preconditions() {
        let mut assessment = Assessment::new();
        assert!(matches!(
            check_preconditions(&assessment),
            Err(PreconditionError::MissingCompanyName)
        ));
        assessment.general.company_name = "Acme".into();
        assert!(matches!(
            check_preconditions(&assessment),
            Err(PreconditionError::MissingTotalRules)
        ));
        assessment.test_results = TestResults::new(10, 0, 0);
        assert!(check_preconditions(&assessment).is_ok());
    }

    #[test]
    fn test_report_counts() {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(
            Artifact::Table3TriggeredRules,
            ArtifactOutcome::Skipped(SkipReason::NoTriggeredRules),
        );
        outcomes.insert(
            Artifact::Table1Summary,
            ArtifactOutcome::Failed(ArtifactError::TooLarge { width: 1, height: 1 }),
        );
        let report = RenderReport {
            output_dir: PathBuf::from("out"),
            outcomes,
        };
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.all_attempted_failed());
    }
}

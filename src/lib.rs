// SPDX-License-Identifier: PMPL-1.0-or-later

//! IDCA report engine: detection-coverage assessment reports.
//!
//! This crate turns a structured security-testing assessment (rule-coverage
//! counters, per-tactic MITRE ATT&CK counters, triggered rules, undetected
//! techniques and recommendations) into a fixed catalogue of seven themed
//! PNG artifacts.
//!
//! ENGINE PILLARS:
//! 1. **Types**: The assessment aggregate, its derived values and advisory
//!    validation.
//! 2. **Theme**: Named palettes threaded explicitly through every render
//!    call, plus the performance colour scales.
//! 3. **Render / Report**: Two charts and five tables, orchestrated one
//!    artifact at a time with per-artifact failure isolation.

pub mod config;
pub mod i18n;
pub mod render;
pub mod report;
pub mod storage;
pub mod theme;
pub mod types;
pub mod validate;

pub use render::{Artifact, ArtifactError, RenderSettings, Rendered, SkipReason};
pub use report::{render_all, render_all_with_progress, ArtifactOutcome, PreconditionError, RenderReport};
pub use theme::{classify_performance, classify_status, list_theme_names, resolve, Palette};
pub use types::{Assessment, ValidationIssue};
pub use validate::{validate_tactic_counts, validate_test_counts};

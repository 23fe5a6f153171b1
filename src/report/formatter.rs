// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output for render runs and validation

use super::{ArtifactOutcome, RenderReport};
use crate::theme::ThemeRegistry;
use crate::types::{Assessment, ValidationIssue};
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_assessment(&self, assessment: &Assessment) {
        let general = &assessment.general;
        let results = &assessment.test_results;

        println!("\n{}", "=== IDCA SECURITY ASSESSMENT ===".bold().cyan());
        println!("  Company: {}", general.company_name);
        if !general.report_date.is_empty() {
            println!("  Date: {}", general.report_date);
        }
        if !general.prepared_by.is_empty() {
            println!("  Prepared by: {}", general.prepared_by);
        }
        println!();

        println!("{}", "TEST RESULTS".bold().yellow());
        println!("    Total rules: {}", results.total_rules);
        println!(
            "    Tested: {} ({:.1}% coverage)",
            results.tested_rules, results.coverage_rate
        );
        println!("    Triggered: {}", results.triggered_rules.to_string().green());
        println!("    Failed: {}", results.failed.to_string().red());
        println!("    Not tested: {}", results.not_tested);

        let rate_color = if results.success_rate >= 70.0 {
            "green"
        } else if results.success_rate >= 40.0 {
            "yellow"
        } else {
            "red"
        };
        println!(
            "    Success rate: {}",
            format!("{:.1}%", results.success_rate)
                .color(rate_color)
                .bold()
        );
        println!(
            "    Tactics: {}  Triggered rules: {}  Undetected: {}  Recommendations: {}",
            assessment.mitre_tactics.len(),
            assessment.triggered_rules.len(),
            assessment.undetected_techniques.len(),
            assessment.recommendations.len()
        );
    }

    pub fn print_issues(&self, issues: &[ValidationIssue]) {
        if issues.is_empty() {
            println!("{}", "No validation issues".green());
            return;
        }
        println!(
            "{} {}",
            "VALIDATION ISSUES".bold().yellow(),
            format!("({})", issues.len()).dimmed()
        );
        for (i, issue) in issues.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, issue.entity.bold(), issue.message);
        }
    }

    pub fn print_render_report(&self, report: &RenderReport) {
        println!("\n{}", "ARTIFACTS".bold().yellow());
        for (artifact, outcome) in &report.outcomes {
            match outcome {
                ArtifactOutcome::Success(path) => {
                    println!("  {} {:<32} {}", "OK".green().bold(), artifact, path.display())
                }
                ArtifactOutcome::Skipped(reason) => {
                    println!("  {} {:<32} {}", "--".yellow(), artifact, reason.to_string().dimmed())
                }
                ArtifactOutcome::Failed(err) => {
                    println!("  {} {:<32} {}", "!!".red().bold(), artifact, err.to_string().red())
                }
            }
        }
        println!();
        println!(
            "  {} generated, {} skipped, {} failed -> {}",
            report.succeeded().to_string().green().bold(),
            report.skipped(),
            if report.failed() > 0 {
                report.failed().to_string().red().bold()
            } else {
                report.failed().to_string().normal()
            },
            report.output_dir.display()
        );
    }

    pub fn print_themes(&self, registry: &ThemeRegistry, selected: &str) {
        println!("{}", "THEMES".bold().yellow());
        let active = registry.find(selected).map(|theme| theme.name.clone());
        for name in registry.list_theme_names() {
            let marker = if Some(&name) == active.as_ref() { "*" } else { " " };
            let kind = if ThemeRegistry::is_builtin(&name) {
                "built-in".dimmed()
            } else {
                "custom".cyan()
            };
            println!("  {} {:<20} {}", marker.green().bold(), name, kind);
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

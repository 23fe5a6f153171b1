// SPDX-License-Identifier: PMPL-1.0-or-later

//! idca-report: render detection-coverage assessment reports
//!
//! Loads an assessment JSON file, validates it, and renders the figure and
//! table catalogue to PNG under a selectable theme and language.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use idca_report::config::AppConfig;
use idca_report::i18n::Lang;
use idca_report::render::{self, Artifact, Rendered};
use idca_report::report::{self, ReportFormatter};
use idca_report::storage;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "idca-report")]
#[command(version)]
#[command(about = "Render detection-coverage assessment figures and tables")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Theme name (unknown names fall back to the default theme)
    #[arg(short, long)]
    theme: Option<String>,

    /// Label language
    #[arg(short, long, value_enum)]
    lang: Option<LangArg>,

    /// Width in inches
    #[arg(long)]
    width: Option<f32>,

    /// Height in inches
    #[arg(long)]
    height: Option<f32>,

    /// Output resolution (100-600)
    #[arg(long)]
    dpi: Option<u32>,

    /// Paint figure and table backgrounds instead of leaving them transparent
    #[arg(long)]
    opaque: bool,

    /// YAML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full artifact catalogue
    Render {
        /// Assessment JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        args: RenderArgs,
    },

    /// Render a single artifact (figure1, figure2, table1 .. table5)
    Preview {
        /// Assessment JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Artifact to render
        #[arg(value_name = "ARTIFACT")]
        artifact: String,

        /// Output PNG path (default: the artifact's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: RenderArgs,
    },

    /// Check an assessment against the data invariants
    Validate {
        /// Assessment JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// List available themes
    Themes {
        /// YAML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LangArg {
    En,
    Tr,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Lang::En,
            LangArg::Tr => Lang::Tr,
        }
    }
}

/// Config file values overridden by command-line flags.
fn resolve_config(args: &RenderArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if let Some(lang) = args.lang {
        config.lang = lang.into();
    }
    if let Some(width) = args.width {
        config.settings.width = width;
    }
    if let Some(height) = args.height {
        config.settings.height = height;
    }
    if let Some(dpi) = args.dpi {
        config.settings.dpi = dpi;
    }
    if args.opaque {
        config.settings.transparent_background = false;
    }
    let issues = config.validate();
    if !issues.is_empty() {
        return Err(anyhow!("invalid settings: {}", issues.join("; ")));
    }
    Ok(config)
}

fn run_render(input: &Path, out: Option<PathBuf>, args: &RenderArgs) -> Result<ExitCode> {
    let config = resolve_config(args)?;
    let assessment = storage::load_assessment(input)?;
    let formatter = ReportFormatter::new();
    formatter.print_assessment(&assessment);
    println!();
    formatter.print_issues(&assessment.validate_all());

    let registry = config.theme_registry()?;
    if registry.find(&config.theme).is_none() {
        log::warn!("theme {:?} not found, using the default theme", config.theme);
    }
    let palette = registry.resolve(&config.theme);
    let settings = config.render_settings();
    let output_dir = out.unwrap_or_else(|| config.output_dir.clone());

    let result = report::render_all_with_progress(
        &assessment,
        &palette,
        &settings,
        &output_dir,
        |index, total, artifact| {
            println!("  [{}/{}] {}", index + 1, total, artifact.to_string().dimmed());
        },
    );
    let rendered = match result {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("{} {}", "Cannot render:".red().bold(), err);
            return Ok(ExitCode::FAILURE);
        }
    };

    formatter.print_render_report(&rendered);
    if rendered.all_attempted_failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_preview(
    input: &Path,
    artifact: &str,
    output: Option<PathBuf>,
    args: &RenderArgs,
) -> Result<ExitCode> {
    let artifact = Artifact::from_name(artifact).ok_or_else(|| {
        let names: Vec<_> = Artifact::all().iter().map(|a| a.short_name()).collect();
        anyhow!("unknown artifact {:?} (expected one of {})", artifact, names.join(", "))
    })?;
    let config = resolve_config(args)?;
    let assessment = storage::load_assessment(input)?;
    let palette = config.theme_registry()?.resolve(&config.theme);

    match render::render_artifact(artifact, &assessment, &palette, &config.render_settings())? {
        Rendered::Image(image) => {
            let path = output.unwrap_or_else(|| PathBuf::from(artifact.file_name()));
            render::save_png(&image, &path)?;
            println!("{} {}", "Preview saved to:".green(), path.display());
            Ok(ExitCode::SUCCESS)
        }
        Rendered::Skipped(reason) => {
            println!("{} {}", artifact, reason.to_string().yellow());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_validate(input: &Path) -> Result<ExitCode> {
    let assessment = storage::load_assessment(input)
        .with_context(|| format!("validating {}", input.display()))?;
    let issues = assessment.validate_all();
    ReportFormatter::new().print_issues(&issues);
    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_themes(config: Option<&Path>) -> Result<ExitCode> {
    let config = AppConfig::load_or_default(config)?;
    let registry = config.theme_registry()?;
    ReportFormatter::new().print_themes(&registry, &config.theme);
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { input, out, args } => run_render(&input, out, &args),
        Commands::Preview {
            input,
            artifact,
            output,
            args,
        } => run_preview(&input, &artifact, output, &args),
        Commands::Validate { input } => run_validate(&input),
        Commands::Themes { config } => run_themes(config.as_deref()),
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Artifact renderer: two charts and five tables rasterised to PNG.
//!
//! Every render function is a pure function of an assessment snapshot, a
//! resolved [`Palette`] and [`RenderSettings`]; none of them touch the
//! filesystem. [`save_png`] is the single write path.

pub mod canvas;
mod charts;
pub mod tables;

use crate::i18n::Lang;
use crate::theme::Palette;
use crate::types::Assessment;
use canvas::{Align, Canvas, Rect, TextStyle};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_DPI: u32 = 100;
pub const MAX_DPI: u32 = 600;
/// Upper bound on `width × height` pixels for one artifact.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Output geometry and background mode shared by all artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Inches.
    pub width: f32,
    /// Inches.
    pub height: f32,
    pub dpi: u32,
    pub transparent_background: bool,
    /// Label language; set from the application config, not the settings block.
    #[serde(skip)]
    pub lang: Lang,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 8.0,
            dpi: 300,
            transparent_background: true,
            lang: Lang::En,
        }
    }
}

impl RenderSettings {
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f32| ((inches * self.dpi as f32).round().max(1.0)) as u32;
        (px(self.width), px(self.height))
    }

    /// Human-readable problems with these settings; empty when usable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            issues.push(format!(
                "DPI must be between {MIN_DPI} and {MAX_DPI} (got {})",
                self.dpi
            ));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            issues.push(format!("Width must be positive (got {})", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            issues.push(format!("Height must be positive (got {})", self.height));
        }
        issues
    }
}

/// The fixed catalogue, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Artifact {
    Figure1TestCoverage,
    Figure2TestStatus,
    Table1Summary,
    Table2MitreCoverage,
    Table3TriggeredRules,
    Table4UndetectedTechniques,
    Table5Recommendations,
}

impl Artifact {
    pub fn all() -> &'static [Artifact] {
        &[
            Artifact::Figure1TestCoverage,
            Artifact::Figure2TestStatus,
            Artifact::Table1Summary,
            Artifact::Table2MitreCoverage,
            Artifact::Table3TriggeredRules,
            Artifact::Table4UndetectedTechniques,
            Artifact::Table5Recommendations,
        ]
    }

    pub fn stem(&self) -> &'static str {
        match self {
            Artifact::Figure1TestCoverage => "Figure_1_Test_Coverage",
            Artifact::Figure2TestStatus => "Figure_2_Test_Status",
            Artifact::Table1Summary => "Table_1_Summary",
            Artifact::Table2MitreCoverage => "Table_2_MITRE_Coverage",
            Artifact::Table3TriggeredRules => "Table_3_Triggered_Rules",
            Artifact::Table4UndetectedTechniques => "Table_4_Undetected_Techniques",
            Artifact::Table5Recommendations => "Table_5_Recommendations",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem())
    }

    /// Short CLI name: `figure1`, `figure2`, `table1` .. `table5`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Artifact::Figure1TestCoverage => "figure1",
            Artifact::Figure2TestStatus => "figure2",
            Artifact::Table1Summary => "table1",
            Artifact::Table2MitreCoverage => "table2",
            Artifact::Table3TriggeredRules => "table3",
            Artifact::Table4UndetectedTechniques => "table4",
            Artifact::Table5Recommendations => "table5",
        }
    }

    /// Accepts the short name, `fig1`/`fig2`, or the file stem (any case).
    pub fn from_name(value: &str) -> Option<Artifact> {
        let wanted = value.trim().to_lowercase();
        let wanted = wanted.trim_end_matches(".png");
        Artifact::all().iter().copied().find(|artifact| {
            artifact.short_name() == wanted
                || artifact.stem().to_lowercase() == wanted
                || artifact.short_name().replace("figure", "fig") == wanted
        })
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.stem())
    }
}

/// Why an artifact produced no image. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NoTactics,
    NoTriggeredRules,
    NoUndetectedTechniques,
    NoRecommendations,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            SkipReason::NoTactics => "no MITRE tactics entered",
            SkipReason::NoTriggeredRules => "no triggered rules",
            SkipReason::NoUndetectedTechniques => "no undetected techniques",
            SkipReason::NoRecommendations => "no recommendations",
        };
        write!(f, "skipped, {what}")
    }
}

#[derive(Debug)]
pub enum Rendered {
    Image(RgbaImage),
    Skipped(SkipReason),
}

impl Rendered {
    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            Rendered::Image(image) => Some(image),
            Rendered::Skipped(_) => None,
        }
    }
}

/// An artifact that could not be produced.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("invalid render settings: {0}")]
    Settings(String),
    #[error("canvas {width}x{height} exceeds the {} pixel limit", MAX_PIXELS)]
    TooLarge { width: u32, height: u32 },
    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Renders one artifact into memory.
pub fn render_artifact(
    artifact: Artifact,
    assessment: &Assessment,
    palette: &Palette,
    settings: &RenderSettings,
) -> Result<Rendered, ArtifactError> {
    let issues = settings.validate();
    if !issues.is_empty() {
        return Err(ArtifactError::Settings(issues.join("; ")));
    }
    let (width, height) = settings.pixel_size();
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(ArtifactError::TooLarge { width, height });
    }

    let rendered = match artifact {
        Artifact::Figure1TestCoverage => {
            Rendered::Image(render_figure1(assessment, palette, settings))
        }
        Artifact::Figure2TestStatus => Rendered::Image(render_figure2(assessment, palette, settings)),
        Artifact::Table1Summary => Rendered::Image(render_table1(assessment, palette, settings)),
        Artifact::Table2MitreCoverage => render_table2(assessment, palette, settings),
        Artifact::Table3TriggeredRules => render_table3(assessment, palette, settings),
        Artifact::Table4UndetectedTechniques => render_table4(assessment, palette, settings),
        Artifact::Table5Recommendations => render_table5(assessment, palette, settings),
    };
    Ok(rendered)
}

pub fn render_figure1(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> RgbaImage {
    charts::figure1(assessment, palette, settings).into_image()
}

pub fn render_figure2(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> RgbaImage {
    charts::figure2(assessment, palette, settings).into_image()
}

pub fn render_table1(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> RgbaImage {
    let layout = tables::build_table1(assessment, settings.lang);
    tables::paint(&layout, palette, settings).into_image()
}

pub fn render_table2(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Rendered {
    match tables::build_table2(assessment, settings.lang) {
        Some(layout) => Rendered::Image(tables::paint(&layout, palette, settings).into_image()),
        None => Rendered::Skipped(SkipReason::NoTactics),
    }
}

pub fn render_table3(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Rendered {
    match tables::build_table3(assessment, settings.lang) {
        Some(layout) => Rendered::Image(tables::paint(&layout, palette, settings).into_image()),
        None => Rendered::Skipped(SkipReason::NoTriggeredRules),
    }
}

pub fn render_table4(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Rendered {
    match tables::build_table4(assessment, settings.lang) {
        Some(layout) => Rendered::Image(tables::paint(&layout, palette, settings).into_image()),
        None => Rendered::Skipped(SkipReason::NoUndetectedTechniques),
    }
}

pub fn render_table5(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Rendered {
    match tables::build_table5(assessment, settings.lang) {
        Some(layout) => Rendered::Image(tables::paint(&layout, palette, settings).into_image()),
        None => Rendered::Skipped(SkipReason::NoRecommendations),
    }
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ArtifactError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Figure surface: `dark` when opaque, nothing when transparent.
fn blank_canvas(palette: &Palette, settings: &RenderSettings) -> Canvas {
    let (width, height) = settings.pixel_size();
    let background = (!settings.transparent_background).then(|| palette.background());
    Canvas::new(width, height, background)
}

fn draw_title(canvas: &mut Canvas, palette: &Palette, title: &str) {
    let rect = canvas.bounds().sub(0.03, 0.02, 0.94, 0.08);
    let scale = canvas.scale_for(0.045);
    canvas.text_in(
        title,
        rect,
        TextStyle::new(palette.text, scale).bold().align(Align::Center),
        0,
    );
}

/// Centred caption lines stacked upward from the bottom edge.
fn draw_footer(canvas: &mut Canvas, palette: &Palette, lines: &[String]) {
    let height = canvas.height();
    let line_h = (height as f32 * 0.045).round() as u32;
    let scale = canvas.scale_for(0.024);
    let width = canvas.width();
    let mut y = height as i32 - (height as f32 * 0.02) as i32 - (line_h * lines.len() as u32) as i32;
    for line in lines {
        canvas.text_in(
            line,
            Rect::new(0, y, width, line_h),
            TextStyle::new(palette.text_secondary, scale).align(Align::Center),
            (width / 150).max(2),
        );
        y += line_h as i32;
    }
}

/// `company - other`, dropping the separator when `other` is blank.
fn company_caption(assessment: &Assessment, other: &str) -> String {
    let company = assessment.general.company_name.trim();
    match other.trim() {
        "" => company.to_string(),
        other => format!("{company} - {other}"),
    }
}

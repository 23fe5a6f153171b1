// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tables 1–5.
//!
//! Each `build_table*` function is a pure projection of an [`Assessment`]
//! onto a [`TableLayout`]: row selection, ordering, truncation and status
//! colours are decided here, so they can be tested without rasterising.
//! [`paint`] then draws any layout the same way.

use super::canvas::{Align, Canvas, Rect, TextStyle};
use super::{blank_canvas, company_caption, draw_title, RenderSettings};
use crate::i18n::{category_label, criticality_label, format_percent, t, Lang};
use crate::theme::{Color, Palette, SemanticRole};
use crate::types::{Assessment, Criticality};

pub const MAX_TRIGGERED_ROWS: usize = 20;
pub const MAX_UNDETECTED_ROWS: usize = 20;
pub const MAX_RECOMMENDATION_ROWS: usize = 15;

const RULE_NAME_LIMIT: usize = 40;
const TECHNIQUE_NAME_LIMIT: usize = 35;
const RECOMMENDATION_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    /// Background role; `None` draws the plain surface.
    pub fill: Option<SemanticRole>,
    /// Foreground role for unfilled cells; `None` uses `text`.
    pub color: Option<SemanticRole>,
    pub bold: bool,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fill: None,
            color: None,
            bold: false,
        }
    }

    pub fn filled(text: impl Into<String>, role: SemanticRole) -> Self {
        Self {
            fill: Some(role),
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn colored(text: impl Into<String>, role: SemanticRole) -> Self {
        Self {
            color: Some(role),
            ..Self::plain(text)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterLine {
    pub text: String,
    pub role: SemanticRole,
}

impl FooterLine {
    fn caption(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: SemanticRole::TextSecondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub title: String,
    pub headers: Vec<String>,
    /// Column widths as fractions of the table width.
    pub col_widths: Vec<f32>,
    pub rows: Vec<Vec<Cell>>,
    pub footer: Vec<FooterLine>,
}

impl TableLayout {
    /// Text of column `col` for every row.
    pub fn column(&self, col: usize) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.get(col))
            .map(|cell| cell.text.as_str())
            .collect()
    }
}

/// First `limit` characters plus `...` when longer.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

fn company_line(assessment: &Assessment, other: &str) -> FooterLine {
    FooterLine::caption(company_caption(assessment, other))
}

/// Pass/caution/fail cell for a metric where larger is better.
fn status_at_least(lang: Lang, value: f64, pass: f64, caution: f64) -> Cell {
    if value >= pass {
        Cell::filled(t(lang, "status.pass"), SemanticRole::Success)
    } else if value >= caution {
        Cell::filled(t(lang, "status.caution"), SemanticRole::Warning)
    } else {
        Cell::filled(t(lang, "status.fail"), SemanticRole::Danger)
    }
}

/// Pass/caution/fail cell for a metric where smaller is better.
fn status_below(lang: Lang, value: f64, pass: f64, caution: f64) -> Cell {
    if value < pass {
        Cell::filled(t(lang, "status.pass"), SemanticRole::Success)
    } else if value < caution {
        Cell::filled(t(lang, "status.caution"), SemanticRole::Warning)
    } else {
        Cell::filled(t(lang, "status.fail"), SemanticRole::Danger)
    }
}

pub fn build_table1(assessment: &Assessment, lang: Lang) -> TableLayout {
    let results = &assessment.test_results;
    let row = |key: &str, value: String, target: String, status: Cell| {
        vec![
            Cell::plain(t(lang, &format!("table1.{key}"))).bold(),
            Cell::plain(value),
            Cell::plain(target),
            status,
            Cell::colored(t(lang, &format!("table1.{key}_desc")), SemanticRole::TextSecondary),
        ]
    };

    let mut rows = vec![
        row(
            "total_rules",
            results.total_rules.to_string(),
            "300+".into(),
            status_at_least(lang, f64::from(results.total_rules), 300.0, 200.0),
        ),
        row(
            "tested_rules",
            results.tested_rules.to_string(),
            "200+".into(),
            status_at_least(lang, f64::from(results.tested_rules), 200.0, 100.0),
        ),
        row(
            "success_rate",
            format_percent(lang, results.success_rate),
            format!("{}+", format_percent(lang, 70.0)),
            status_at_least(lang, results.success_rate, 70.0, 50.0),
        ),
        row(
            "not_tested",
            results.not_tested.to_string(),
            "<50".into(),
            status_below(lang, f64::from(results.not_tested), 50.0, 100.0),
        ),
    ];
    if let Some(average) = assessment.critical_tactic_average() {
        rows.push(row(
            "critical_avg",
            format_percent(lang, average),
            format!("{}+", format_percent(lang, 60.0)),
            status_at_least(lang, average, 60.0, 40.0),
        ));
    }

    TableLayout {
        title: t(lang, "table1.title").to_string(),
        headers: ["metric", "value", "target", "status", "description"]
            .iter()
            .map(|key| t(lang, &format!("table1.{key}")).to_string())
            .collect(),
        col_widths: vec![0.26, 0.14, 0.14, 0.16, 0.30],
        rows,
        footer: vec![
            FooterLine::caption(t(lang, "table1.legend")),
            company_line(assessment, &assessment.general.report_date),
        ],
    }
}

/// Risk level from a tactic's success rate: <40 critical, <60 medium, else low.
pub fn tactic_risk(rate: f64) -> (&'static str, SemanticRole) {
    if rate < 40.0 {
        ("risk.critical", SemanticRole::Danger)
    } else if rate < 60.0 {
        ("risk.medium", SemanticRole::Warning)
    } else {
        ("risk.low", SemanticRole::Success)
    }
}

pub fn build_table2(assessment: &Assessment, lang: Lang) -> Option<TableLayout> {
    let tactics = assessment.tactics_by_success_rate();
    if tactics.is_empty() {
        return None;
    }

    let rows = tactics
        .iter()
        .map(|tactic| {
            let (risk_key, role) = tactic_risk(tactic.success_rate);
            vec![
                Cell::plain(tactic.name()),
                Cell::plain(tactic.test_count.to_string()),
                Cell::plain(tactic.triggered_count.to_string()),
                Cell::colored(format_percent(lang, tactic.success_rate), role).bold(),
                Cell::filled(t(lang, risk_key), role),
            ]
        })
        .collect();

    let average = assessment.mean_tactic_success_rate().unwrap_or(0.0);
    let total_tested: u64 = tactics.iter().map(|t| u64::from(t.test_count)).sum();
    let total_triggered: u64 = tactics.iter().map(|t| u64::from(t.triggered_count)).sum();

    Some(TableLayout {
        title: t(lang, "table2.title").to_string(),
        headers: ["tactic", "tested", "triggered", "success", "risk"]
            .iter()
            .map(|key| t(lang, &format!("table2.{key}")).to_string())
            .collect(),
        col_widths: vec![0.34, 0.14, 0.16, 0.16, 0.20],
        rows,
        footer: vec![
            FooterLine::caption(format!(
                "{}: {} | {}: {} | {}: {}",
                t(lang, "table2.average"),
                format_percent(lang, average),
                t(lang, "table2.total_tested"),
                total_tested,
                t(lang, "table2.total_triggered"),
                total_triggered
            )),
            company_line(assessment, ""),
        ],
    })
}

/// Confidence colour: ≥90 success, ≥80 warning, else danger.
pub fn confidence_role(confidence: u32) -> SemanticRole {
    if confidence >= 90 {
        SemanticRole::Success
    } else if confidence >= 80 {
        SemanticRole::Warning
    } else {
        SemanticRole::Danger
    }
}

pub fn build_table3(assessment: &Assessment, lang: Lang) -> Option<TableLayout> {
    if assessment.triggered_rules.is_empty() {
        return None;
    }

    let rows = assessment
        .triggered_rules
        .iter()
        .take(MAX_TRIGGERED_ROWS)
        .enumerate()
        .map(|(idx, rule)| {
            vec![
                Cell::plain((idx + 1).to_string()),
                Cell::plain(truncate(&rule.name, RULE_NAME_LIMIT)),
                Cell::plain(rule.mitre_id.clone()),
                Cell::plain(rule.tactic.clone()),
                Cell::filled(
                    format_percent(lang, f64::from(rule.confidence)),
                    confidence_role(rule.confidence),
                ),
            ]
        })
        .collect();

    let average = assessment.average_confidence().unwrap_or(0.0);
    Some(TableLayout {
        title: t(lang, "table3.title").to_string(),
        headers: ["id", "name", "mitre", "tactic", "confidence"]
            .iter()
            .map(|key| t(lang, &format!("table3.{key}")).to_string())
            .collect(),
        col_widths: vec![0.07, 0.43, 0.14, 0.22, 0.14],
        rows,
        footer: vec![FooterLine::caption(format!(
            "{}: {} {} | {}: {} | {}",
            t(lang, "label.total"),
            assessment.triggered_rules.len(),
            t(lang, "label.rules"),
            t(lang, "table3.avg_confidence"),
            format_percent(lang, average),
            assessment.general.company_name.trim()
        ))],
    })
}

fn criticality_cell(lang: Lang, level: Criticality) -> Cell {
    let label = criticality_label(lang, level);
    match level {
        Criticality::Critical => Cell::filled(label, SemanticRole::Danger),
        Criticality::High => Cell::filled(label, SemanticRole::Warning),
        Criticality::Medium | Criticality::Low => Cell::filled(label, SemanticRole::Secondary),
    }
}

pub fn build_table4(assessment: &Assessment, lang: Lang) -> Option<TableLayout> {
    if assessment.undetected_techniques.is_empty() {
        return None;
    }

    let rows = assessment
        .undetected_by_criticality()
        .into_iter()
        .take(MAX_UNDETECTED_ROWS)
        .enumerate()
        .map(|(idx, technique)| {
            vec![
                Cell::plain(technique.mitre_id.clone()).bold(),
                Cell::plain(truncate(&technique.name, TECHNIQUE_NAME_LIMIT)),
                Cell::plain(technique.tactic.clone()),
                criticality_cell(lang, technique.criticality),
                Cell::plain(format!("P{}", idx + 1)),
            ]
        })
        .collect();

    let critical = assessment.criticality_count(Criticality::Critical);
    let high = assessment.criticality_count(Criticality::High);
    Some(TableLayout {
        title: t(lang, "table4.title").to_string(),
        headers: ["mitre", "name", "tactic", "criticality", "priority"]
            .iter()
            .map(|key| t(lang, &format!("table4.{key}")).to_string())
            .collect(),
        col_widths: vec![0.14, 0.40, 0.20, 0.14, 0.12],
        rows,
        footer: vec![FooterLine {
            text: format!(
                "{} {}, {} {}: {}",
                critical,
                criticality_label(lang, Criticality::Critical),
                high,
                criticality_label(lang, Criticality::High),
                t(lang, "table4.attention")
            ),
            role: SemanticRole::Warning,
        }],
    })
}

/// Impact by position: first three high, next four medium, rest normal.
pub fn recommendation_impact(index: usize) -> (&'static str, Option<SemanticRole>) {
    match index {
        0..=2 => ("impact.high", Some(SemanticRole::Danger)),
        3..=6 => ("impact.medium", Some(SemanticRole::Warning)),
        _ => ("impact.normal", None),
    }
}

pub fn build_table5(assessment: &Assessment, lang: Lang) -> Option<TableLayout> {
    if assessment.recommendations.is_empty() {
        return None;
    }

    let rows = assessment
        .recommendations
        .iter()
        .take(MAX_RECOMMENDATION_ROWS)
        .enumerate()
        .map(|(idx, recommendation)| {
            let (impact_key, role) = recommendation_impact(idx);
            let priority = match role {
                Some(role) => Cell::filled(recommendation.priority.clone(), role),
                None => Cell::plain(recommendation.priority.clone()).bold(),
            };
            vec![
                priority,
                Cell::plain(category_label(lang, recommendation.category)),
                Cell::plain(truncate(&recommendation.text, RECOMMENDATION_LIMIT)),
                Cell::plain(t(lang, impact_key)),
            ]
        })
        .collect();

    Some(TableLayout {
        title: t(lang, "table5.title").to_string(),
        headers: ["priority", "category", "text", "impact"]
            .iter()
            .map(|key| t(lang, &format!("table5.{key}")).to_string())
            .collect(),
        col_widths: vec![0.10, 0.20, 0.56, 0.14],
        rows,
        footer: vec![
            FooterLine::caption(format!(
                "{}: {} {}",
                t(lang, "label.total"),
                assessment.recommendations.len(),
                t(lang, "table5.recommendations")
            )),
            company_line(assessment, &assessment.general.prepared_by),
        ],
    })
}

/// Rasterises a table with the shared header/body/footer layout.
pub fn paint(layout: &TableLayout, palette: &Palette, settings: &RenderSettings) -> Canvas {
    let mut canvas = blank_canvas(palette, settings);
    let (width, height) = (canvas.width(), canvas.height());
    let stroke = canvas.stroke();
    draw_title(&mut canvas, palette, &layout.title);

    let footer_line = (height as f32 * 0.045).round() as u32;
    let footer_height = footer_line * layout.footer.len() as u32;
    let table_top = (height as f32 * 0.13).round() as i32;
    let table_bottom = height as i32 - footer_height as i32 - (height as f32 * 0.04) as i32;
    let table_x = (width as f32 * 0.04).round() as i32;
    let table_w = (width as f32 * 0.92).round() as u32;
    let lines = layout.rows.len() as u32 + 1;
    let available = (table_bottom - table_top).max(lines as i32) as u32;
    let row_h = (available / lines).min((height as f32 * 0.09) as u32).max(1);
    let cell_scale = canvas.scale_for(0.026).min((row_h * 6 / 10 / 8).max(1));
    let padding = (width / 150).max(2);

    let columns = column_rects(table_x, table_w, &layout.col_widths);

    let header_y = table_top;
    for (col, header) in layout.headers.iter().enumerate() {
        let Some(&(x, w)) = columns.get(col) else { break };
        let rect = Rect::new(x, header_y, w, row_h);
        canvas.fill_rect(rect, palette.accent_secondary);
        canvas.text_in(
            header,
            rect,
            TextStyle::new(Color::WHITE, cell_scale).bold().align(Align::Center),
            padding,
        );
    }

    for (idx, row) in layout.rows.iter().enumerate() {
        let y = header_y + row_h as i32 * (idx as i32 + 1);
        let surface = if idx % 2 == 0 {
            palette.surface()
        } else {
            palette.surface().mix(palette.secondary, 0.5)
        };
        for (col, cell) in row.iter().enumerate() {
            let Some(&(x, w)) = columns.get(col) else { break };
            let rect = Rect::new(x, y, w, row_h);
            let text_color = match cell.fill {
                Some(role) => {
                    canvas.fill_rect(rect, palette.get(role));
                    Color::WHITE
                }
                None => {
                    if !settings.transparent_background {
                        canvas.fill_rect(rect, surface);
                    }
                    cell.color.map(|role| palette.get(role)).unwrap_or(palette.text)
                }
            };
            let mut style = TextStyle::new(text_color, cell_scale).align(Align::Center);
            if cell.bold {
                style = style.bold();
            }
            canvas.text_in(&cell.text, rect, style, padding);
            canvas.stroke_rect(rect, palette.gray, stroke);
        }
    }

    let mut footer_y = header_y + (row_h * lines) as i32 + (height as f32 * 0.03) as i32;
    let footer_scale = canvas.scale_for(0.024);
    for line in &layout.footer {
        canvas.text_in(
            &line.text,
            Rect::new(0, footer_y, width, footer_line),
            TextStyle::new(palette.get(line.role), footer_scale).align(Align::Center),
            padding,
        );
        footer_y += footer_line as i32;
    }

    canvas
}

fn column_rects(x: i32, width: u32, fractions: &[f32]) -> Vec<(i32, u32)> {
    let total: f32 = fractions.iter().sum::<f32>().max(f32::EPSILON);
    let mut rects = Vec::with_capacity(fractions.len());
    let mut cursor = x;
    for (idx, fraction) in fractions.iter().enumerate() {
        let w = if idx + 1 == fractions.len() {
            (x + width as i32 - cursor).max(0) as u32
        } else {
            (width as f32 * fraction / total).round() as u32
        };
        rects.push((cursor, w));
        cursor += w as i32;
    }
    rects
}

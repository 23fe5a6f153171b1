// SPDX-License-Identifier: PMPL-1.0-or-later

//! Figure 1 (coverage donut) and Figure 2 (status bars).

use super::canvas::{Align, Canvas, Rect, TextStyle, GLYPH};
use super::{blank_canvas, company_caption, draw_footer, draw_title, RenderSettings};
use crate::i18n::{format_percent, t};
use crate::theme::{classify_performance, classify_status, Color, Palette};
use crate::types::{percentage, Assessment};

/// Tactics shown in the right-hand panel of Figure 2.
pub const LOWEST_TACTICS: usize = 6;

/// Radial offset of the exploded "tested" slice, as a fraction of the radius.
const EXPLODE: f32 = 0.05;

/// Unit vector for an angle measured counter-clockwise from 12 o'clock.
fn direction(degrees: f32) -> (f32, f32) {
    let radians = degrees.to_radians();
    (-radians.sin(), -radians.cos())
}

pub fn figure1(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Canvas {
    let lang = settings.lang;
    let results = &assessment.test_results;
    let mut canvas = blank_canvas(palette, settings);
    let bounds = canvas.bounds();
    draw_title(&mut canvas, palette, t(lang, "fig1.title"));

    let footer = [company_caption(assessment, &assessment.general.report_date)];
    if results.total_rules == 0 {
        let scale = canvas.scale_for(0.05);
        canvas.text_in(
            t(lang, "fig1.no_data"),
            bounds.sub(0.0, 0.4, 1.0, 0.2),
            TextStyle::new(palette.text_secondary, scale).align(Align::Center),
            0,
        );
        draw_footer(&mut canvas, palette, &footer);
        return canvas;
    }

    let (w, h) = (bounds.w as f32, bounds.h as f32);
    let (cx, cy) = (w * 0.36, h * 0.54);
    let radius = (h * 0.32).min(w * 0.26);
    let inner = radius * 0.6;

    let tested = results.tested_rules.min(results.total_rules);
    let not_tested = results.total_rules - tested;
    let sweep = 360.0 * tested as f32 / results.total_rules as f32;
    let (ex, ey) = direction(sweep / 2.0);
    let (ex, ey) = (ex * radius * EXPLODE, ey * radius * EXPLODE);

    if !settings.transparent_background {
        let shadow = palette.background().mix(Color::BLACK, 0.6);
        let offset = radius * 0.03;
        canvas.fill_ring_sector(cx + offset, cy + offset, radius, inner, 0.0, 360.0, shadow);
    }
    canvas.fill_ring_sector(cx, cy, radius, inner, sweep, 360.0 - sweep, palette.gray);
    canvas.fill_ring_sector(cx + ex, cy + ey, radius, inner, 0.0, sweep, palette.accent_secondary);

    // slice percentages on the ring
    let label_scale = canvas.scale_for(0.028);
    let label_r = (radius + inner) / 2.0;
    for (start, span, count) in [(0.0, sweep, tested), (sweep, 360.0 - sweep, not_tested)] {
        if span < 18.0 {
            continue;
        }
        let (dx, dy) = direction(start + span / 2.0);
        let text = format_percent(lang, percentage(count, results.total_rules));
        canvas.text(
            &text,
            (cx + dx * label_r) as i32,
            (cy + dy * label_r) as i32 - (GLYPH * label_scale / 2) as i32,
            TextStyle::new(Color::WHITE, label_scale).bold().align(Align::Center),
        );
    }

    // centre: total, label, success rate
    let hole = Rect::new(
        (cx - inner * 0.85) as i32,
        (cy - inner * 0.7) as i32,
        (inner * 1.7) as u32,
        (inner * 1.4) as u32,
    );
    let total_scale = canvas.scale_for(0.07);
    canvas.text_in(
        &results.total_rules.to_string(),
        hole.sub(0.0, 0.0, 1.0, 0.4),
        TextStyle::new(palette.text, total_scale).bold().align(Align::Center),
        0,
    );
    canvas.text_in(
        t(lang, "fig1.total_rules"),
        hole.sub(0.0, 0.38, 1.0, 0.2),
        TextStyle::new(palette.text_secondary, canvas.scale_for(0.026)).align(Align::Center),
        0,
    );
    let success_color = palette.get(classify_performance(results.success_rate));
    canvas.text_in(
        &format!(
            "{} {}",
            t(lang, "label.success_rate"),
            format_percent(lang, results.success_rate)
        ),
        hole.sub(0.0, 0.62, 1.0, 0.3),
        TextStyle::new(success_color, canvas.scale_for(0.032)).bold().align(Align::Center),
        0,
    );

    // legend and statistics, right of the ring
    let panel = bounds.sub(0.66, 0.2, 0.31, 0.62);
    let line_h = (h * 0.06) as u32;
    let text_scale = canvas.scale_for(0.026);
    let swatch = (line_h / 2).max(2);
    let legend = [
        (palette.accent_secondary, t(lang, "fig1.tested"), tested),
        (palette.gray, t(lang, "fig1.not_tested"), not_tested),
    ];
    for (idx, (color, label, count)) in legend.iter().enumerate() {
        let y = panel.y + (idx as u32 * line_h) as i32;
        canvas.fill_rect(
            Rect::new(panel.x, y + (line_h.saturating_sub(swatch) / 2) as i32, swatch, swatch),
            *color,
        );
        let text = format!(
            "{label}: {count} {} ({})",
            t(lang, "label.rules"),
            format_percent(lang, percentage(*count, results.total_rules))
        );
        canvas.text_in(
            &text,
            Rect::new(panel.x + (swatch * 2) as i32, y, panel.w.saturating_sub(swatch * 2), line_h),
            TextStyle::new(palette.text, text_scale),
            0,
        );
    }

    let stats = panel.sub(0.0, 0.3, 1.0, 0.7);
    if !settings.transparent_background {
        canvas.fill_rect(stats, palette.surface());
    }
    canvas.stroke_rect(stats, palette.accent, canvas.stroke());
    let stat_lines = [
        (t(lang, "stats.tested"), results.tested_rules.to_string(), palette.text),
        (t(lang, "stats.triggered"), results.triggered_rules.to_string(), palette.success),
        (t(lang, "stats.failed"), results.failed.to_string(), palette.danger),
        (t(lang, "stats.not_tested"), results.not_tested.to_string(), palette.gray),
        (
            t(lang, "label.success_rate"),
            format_percent(lang, results.success_rate),
            success_color,
        ),
    ];
    let row_h = stats.h / stat_lines.len() as u32;
    let padding = (stats.w / 12).max(2);
    for (idx, (label, value, color)) in stat_lines.iter().enumerate() {
        let row = Rect::new(stats.x, stats.y + (idx as u32 * row_h) as i32, stats.w, row_h);
        canvas.text_in(label, row, TextStyle::new(palette.text_secondary, text_scale), padding);
        canvas.text_in(
            value,
            row,
            TextStyle::new(*color, text_scale).bold().align(Align::Right),
            padding,
        );
    }

    draw_footer(&mut canvas, palette, &footer);
    canvas
}

pub fn figure2(assessment: &Assessment, palette: &Palette, settings: &RenderSettings) -> Canvas {
    let lang = settings.lang;
    let mut canvas = blank_canvas(palette, settings);
    let bounds = canvas.bounds();
    let stroke = canvas.stroke();
    draw_title(&mut canvas, palette, t(lang, "fig2.title"));

    let left = bounds.sub(0.04, 0.13, 0.40, 0.74);
    let right = bounds.sub(0.48, 0.13, 0.48, 0.74);
    for panel in [left, right] {
        if !settings.transparent_background {
            canvas.fill_rect(panel, palette.surface());
        }
        canvas.stroke_rect(panel, palette.gray, stroke);
    }

    let heading_scale = canvas.scale_for(0.032);
    let text_scale = canvas.scale_for(0.024);
    for (panel, key) in [(left, "fig2.distribution"), (right, "fig2.lowest")] {
        canvas.text_in(
            t(lang, key),
            panel.sub(0.0, 0.02, 1.0, 0.1),
            TextStyle::new(palette.text, heading_scale).bold().align(Align::Center),
            0,
        );
    }

    draw_status_bars(&mut canvas, assessment, palette, settings, left, text_scale);
    draw_lowest_tactics(&mut canvas, assessment, palette, settings, right, text_scale);

    let footer = [company_caption(assessment, &assessment.general.prepared_by)];
    draw_footer(&mut canvas, palette, &footer);
    canvas
}

fn draw_status_bars(
    canvas: &mut Canvas,
    assessment: &Assessment,
    palette: &Palette,
    settings: &RenderSettings,
    panel: Rect,
    text_scale: u32,
) {
    let lang = settings.lang;
    let results = &assessment.test_results;
    let plot = panel.sub(0.12, 0.2, 0.80, 0.62);
    let peak = results.triggered_rules.max(results.failed).max(1) as f32;

    canvas.text_in(
        t(lang, "fig2.rule_count"),
        panel.sub(0.02, 0.12, 0.6, 0.06),
        TextStyle::new(palette.text_secondary, text_scale),
        0,
    );

    let bars = [
        (t(lang, "fig2.triggered"), results.triggered_rules, palette.success),
        (t(lang, "fig2.failed"), results.failed, palette.danger),
    ];
    let bar_w = (plot.w as f32 * 0.3) as u32;
    for (idx, (label, value, color)) in bars.iter().enumerate() {
        let x = plot.x + (plot.w as f32 * (0.12 + 0.46 * idx as f32)) as i32;
        let bar_h = (plot.h as f32 * 0.9 * *value as f32 / peak) as u32;
        let bar = Rect::new(x, plot.bottom() - bar_h as i32, bar_w, bar_h);
        canvas.fill_rect(bar, *color);
        let label_h = GLYPH * text_scale;
        canvas.text(
            &value.to_string(),
            bar.center_x(),
            bar.y - (label_h + label_h / 2) as i32,
            TextStyle::new(palette.text, text_scale).bold().align(Align::Center),
        );
        canvas.text_in(
            label,
            Rect::new(x - (bar_w / 4) as i32, plot.bottom() + 4, bar_w + bar_w / 2, label_h * 2),
            TextStyle::new(palette.text, text_scale).align(Align::Center),
            0,
        );
    }
    canvas.hline(plot.x, plot.right(), plot.bottom(), palette.text_secondary, canvas.stroke());
}

fn draw_lowest_tactics(
    canvas: &mut Canvas,
    assessment: &Assessment,
    palette: &Palette,
    settings: &RenderSettings,
    panel: Rect,
    text_scale: u32,
) {
    let lang = settings.lang;
    let tactics: Vec<_> = assessment
        .tactics_by_success_rate()
        .into_iter()
        .take(LOWEST_TACTICS)
        .collect();
    if tactics.is_empty() {
        canvas.text_in(
            t(lang, "fig2.no_tactics"),
            panel.sub(0.0, 0.4, 1.0, 0.2),
            TextStyle::new(palette.text_secondary, canvas.scale_for(0.032)).align(Align::Center),
            0,
        );
        return;
    }

    let labels = panel.sub(0.02, 0.14, 0.33, 0.56);
    let plot = panel.sub(0.37, 0.14, 0.45, 0.56);
    let row_h = plot.h / tactics.len() as u32;
    let bar_h = (row_h * 6 / 10).max(1);
    let stroke = canvas.stroke();

    for (idx, tactic) in tactics.iter().enumerate() {
        let row_y = plot.y + (idx as u32 * row_h) as i32;
        let role = classify_status(tactic.success_rate);
        let bar_w = (plot.w as f64 * tactic.success_rate.clamp(0.0, 100.0) / 100.0) as u32;
        let bar = Rect::new(plot.x, row_y + (row_h.saturating_sub(bar_h) / 2) as i32, bar_w, bar_h);
        canvas.fill_rect(bar, palette.get(role));
        canvas.text_in(
            tactic.name(),
            Rect::new(labels.x, row_y, labels.w, row_h),
            TextStyle::new(palette.text, text_scale).align(Align::Right),
            0,
        );
        let value = format_percent(lang, tactic.success_rate);
        canvas.text(
            &value,
            bar.right() + (GLYPH * text_scale / 2) as i32,
            bar.center_y() - (GLYPH * text_scale / 2) as i32,
            TextStyle::new(palette.text, text_scale).bold(),
        );
    }

    let dash = (plot.h / 30).max(2);
    for (threshold, color) in [(50.0, palette.warning), (70.0, palette.success)] {
        let x = plot.x + (plot.w as f32 * threshold / 100.0) as i32;
        canvas.dashed_vline(x, plot.y, plot.bottom(), color, stroke + 1, dash);
    }
    canvas.hline(plot.x, plot.x + plot.w as i32, plot.bottom(), palette.text_secondary, stroke);
    canvas.text_in(
        t(lang, "fig2.axis"),
        Rect::new(plot.x, plot.bottom() + 2, plot.w, GLYPH * text_scale * 2),
        TextStyle::new(palette.text_secondary, text_scale).align(Align::Center),
        0,
    );

    // legend in header style
    let legend = panel.sub(0.1, 0.8, 0.8, 0.16);
    canvas.fill_rect(legend, palette.accent_secondary);
    let entries = [
        (palette.warning, t(lang, "fig2.min_target")),
        (palette.success, t(lang, "fig2.ideal_target")),
    ];
    let entry_h = legend.h / entries.len() as u32;
    let sample_w = legend.w / 8;
    for (idx, (color, label)) in entries.iter().enumerate() {
        let y = legend.y + (idx as u32 * entry_h) as i32;
        let x = legend.x + (legend.w / 20) as i32;
        canvas.dashed_hline(x, x + sample_w as i32, y + (entry_h / 2) as i32, *color, stroke + 1, dash);
        let text_x = x + sample_w as i32 + (legend.w / 30) as i32;
        let text_w = (legend.right() - text_x).max(0) as u32;
        let scale = text_scale.min((entry_h * 6 / 10 / GLYPH).max(1));
        canvas.text_in(
            label,
            Rect::new(text_x, y, text_w, entry_h),
            TextStyle::new(Color::WHITE, scale).bold(),
            0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::theme;
    use crate::types::{Tactic, TestResults};

    fn settings() -> RenderSettings {
        RenderSettings {
            width: 6.0,
            height: 4.0,
            dpi: 100,
            transparent_background: false,
            lang: Lang::En,
        }
    }

    fn has_color(canvas: Canvas, color: Color) -> bool {
        canvas
            .into_image()
            .pixels()
            .any(|p| p.0 == [color.r, color.g, color.b, 255])
    }

    #[test]
    fn test_direction_points_up_at_zero() {
        let (dx, dy) = direction(0.0);
        assert!(dx.abs() < 1e-6 && (dy + 1.0).abs() < 1e-6);
        let (dx, _) = direction(90.0);
        assert!((dx + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_figure1_draws_both_slices() {
        let mut assessment = Assessment::new();
        assessment.test_results = TestResults::new(300, 240, 180);
        let palette = theme::resolve("Modern");
        assert!(has_color(figure1(&assessment, &palette, &settings()), palette.accent_secondary));
        assert!(has_color(figure1(&assessment, &palette, &settings()), palette.gray));
    }

    fn hole_has_color(canvas: Canvas, color: Color) -> bool {
        let image = canvas.into_image();
        let (w, h) = (image.width() as f32, image.height() as f32);
        let (cx, cy) = (w * 0.36, h * 0.54);
        let inner = (h * 0.32).min(w * 0.26) * 0.6 * 0.95;
        image.enumerate_pixels().any(|(x, y, p)| {
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            dx * dx + dy * dy < inner * inner && p.0 == [color.r, color.g, color.b, 255]
        })
    }

    #[test]
    fn test_figure1_centre_rate_follows_performance_scale() {
        let palette = theme::resolve("Klasik");
        let mut assessment = Assessment::new();
        assessment.test_results = TestResults::new(100, 100, 90);
        let strong = figure1(&assessment, &palette, &settings());
        assert!(hole_has_color(strong, palette.success));

        assessment.test_results = TestResults::new(100, 100, 10);
        let weak = figure1(&assessment, &palette, &settings());
        assert!(hole_has_color(weak, palette.danger));
        let weak = figure1(&assessment, &palette, &settings());
        assert!(!hole_has_color(weak, palette.success));
    }

    #[test]
    fn test_figure1_without_rules_draws_notice_only() {
        let assessment = Assessment::new();
        let palette = theme::resolve("Modern");
        assert!(!has_color(figure1(&assessment, &palette, &settings()), palette.accent_secondary));
    }

    #[test]
    fn test_figure2_colours_tactic_bars_by_status() {
        let mut assessment = Assessment::new();
        assessment.test_results = TestResults::new(100, 80, 20);
        assessment.set_tactic(Tactic::Discovery, 10, 1);
        let palette = theme::resolve("Klasik");
        assert!(has_color(figure2(&assessment, &palette, &settings()), palette.danger));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Raster primitives over an [`image::RgbaImage`].
//!
//! Text uses the 8×8 bitmap glyphs from `font8x8`, scaled by an integer
//! factor. Coordinates are signed so shapes may hang off the edge; every
//! write is clipped.

use crate::theme::Color;
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgba, RgbaImage};

/// Side of one unscaled glyph cell, in pixels.
pub const GLYPH: u32 = 8;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn center_x(&self) -> i32 {
        self.x + (self.w / 2) as i32
    }

    pub fn center_y(&self) -> i32 {
        self.y + (self.h / 2) as i32
    }

    /// Fractional sub-rectangle: `fx`, `fy`, `fw`, `fh` are in `0..=1` of
    /// this rectangle's size.
    pub fn sub(&self, fx: f32, fy: f32, fw: f32, fh: f32) -> Rect {
        Rect::new(
            self.x + (self.w as f32 * fx).round() as i32,
            self.y + (self.h as f32 * fy).round() as i32,
            (self.w as f32 * fw).round().max(0.0) as u32,
            (self.h as f32 * fh).round().max(0.0) as u32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub scale: u32,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn new(color: Color, scale: u32) -> Self {
        Self {
            color,
            scale: scale.max(1),
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// `None` leaves every pixel fully transparent.
    pub fn new(width: u32, height: u32, background: Option<Color>) -> Self {
        let fill = background.map(opaque).unwrap_or(TRANSPARENT);
        Self {
            image: RgbaImage::from_pixel(width, height, fill),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Glyph scale whose cell height is `fraction` of the canvas height.
    pub fn scale_for(&self, fraction: f32) -> u32 {
        ((self.height() as f32 * fraction / GLYPH as f32).round() as u32).max(1)
    }

    /// Line thickness proportional to the canvas height.
    pub fn stroke(&self) -> u32 {
        (self.height() / 400).max(1)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width() as i32);
        let y1 = rect.bottom().min(self.height() as i32);
        let pixel = opaque(color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        let t = thickness.max(1).min(rect.w).min(rect.h);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t as i32, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t as i32, rect.y, t, rect.h), color);
    }

    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Color, thickness: u32) {
        let half = (thickness / 2) as i32;
        self.fill_rect(
            Rect::new(x0, y - half, (x1 - x0).max(0) as u32, thickness.max(1)),
            color,
        );
    }

    pub fn dashed_hline(&mut self, x0: i32, x1: i32, y: i32, color: Color, thickness: u32, dash: u32) {
        let dash = dash.max(1) as i32;
        let half = (thickness / 2) as i32;
        let mut x = x0;
        let mut on = true;
        while x < x1 {
            let len = dash.min(x1 - x);
            if on {
                self.fill_rect(Rect::new(x, y - half, len as u32, thickness.max(1)), color);
            }
            x += len;
            on = !on;
        }
    }

    pub fn dashed_vline(&mut self, x: i32, y0: i32, y1: i32, color: Color, thickness: u32, dash: u32) {
        let dash = dash.max(1) as i32;
        let half = (thickness / 2) as i32;
        let mut y = y0;
        let mut on = true;
        while y < y1 {
            let len = dash.min(y1 - y);
            if on {
                self.fill_rect(Rect::new(x - half, y, thickness.max(1), len as u32), color);
            }
            y += len;
            on = !on;
        }
    }

    /// Fills the part of the annulus `inner..outer` that lies between
    /// `start` and `start + sweep` degrees, counter-clockwise from 12 o'clock.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_ring_sector(
        &mut self,
        cx: f32,
        cy: f32,
        outer: f32,
        inner: f32,
        start: f32,
        sweep: f32,
        color: Color,
    ) {
        if sweep <= 0.0 || outer <= 0.0 {
            return;
        }
        let x0 = (cx - outer).floor().max(0.0) as u32;
        let y0 = (cy - outer).floor().max(0.0) as u32;
        let x1 = ((cx + outer).ceil().max(0.0) as u32).min(self.width());
        let y1 = ((cy + outer).ceil().max(0.0) as u32).min(self.height());
        let pixel = opaque(color);
        let (outer2, inner2) = (outer * outer, inner * inner);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 > outer2 || d2 < inner2 {
                    continue;
                }
                if sweep >= 360.0 || angle_within(ccw_from_top(dx, dy), start, sweep) {
                    self.image.put_pixel(x, y, pixel);
                }
            }
        }
    }

    /// Draws one line of text. `x` is the anchor `style.align` refers to,
    /// `y` the top of the glyph cells.
    pub fn text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) {
        let width = text_width(text, style.scale) as i32;
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2,
            Align::Right => x - width,
        };
        let advance = (GLYPH * style.scale) as i32;
        let bold_offset = (style.scale as i32 / 2).max(1);
        for (idx, ch) in text.chars().enumerate() {
            let gx = left + idx as i32 * advance;
            self.glyph(ch, gx, y, style.color, style.scale);
            if style.bold {
                self.glyph(ch, gx + bold_offset, y, style.color, style.scale);
            }
        }
    }

    /// Text vertically centred in `rect`, shrunk and then ellipsised so it
    /// stays inside `rect` minus `padding` on each side.
    pub fn text_in(&mut self, text: &str, rect: Rect, style: TextStyle, padding: u32) {
        let available = rect.w.saturating_sub(2 * padding);
        let scale = fit_scale(text, style.scale, available);
        let shown = ellipsize(text, scale, available);
        let y = rect.center_y() - (GLYPH * scale / 2) as i32;
        let x = match style.align {
            Align::Left => rect.x + padding as i32,
            Align::Center => rect.center_x(),
            Align::Right => rect.right() - padding as i32,
        };
        self.text(&shown, x, y, TextStyle { scale, ..style });
    }

    fn glyph(&mut self, ch: char, x: i32, y: i32, color: Color, scale: u32) {
        let rows = glyph_rows(ch);
        let step = scale as i32;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH as i32 {
                if bits & (1 << col) != 0 {
                    self.fill_rect(
                        Rect::new(x + col * step, y + row as i32 * step, scale, scale),
                        color,
                    );
                }
            }
        }
    }
}

pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale.max(1)
}

/// Largest scale `<= desired` at which `text` fits in `max_width`, never
/// below 1.
pub fn fit_scale(text: &str, desired: u32, max_width: u32) -> u32 {
    let mut scale = desired.max(1);
    while scale > 1 && text_width(text, scale) > max_width {
        scale -= 1;
    }
    scale
}

/// Cuts `text` with a trailing `...` when it is wider than `max_width`.
pub fn ellipsize(text: &str, scale: u32, max_width: u32) -> String {
    if text_width(text, scale) <= max_width {
        return text.to_string();
    }
    let max_chars = (max_width / (GLYPH * scale.max(1))) as usize;
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

/// Degrees counter-clockwise from 12 o'clock; screen `dy` grows downward.
fn ccw_from_top(dx: f32, dy: f32) -> f32 {
    ((-dy).atan2(dx).to_degrees() - 90.0).rem_euclid(360.0)
}

fn angle_within(angle: f32, start: f32, sweep: f32) -> bool {
    (angle - start).rem_euclid(360.0) < sweep
}

fn glyph_rows(ch: char) -> [u8; 8] {
    let ch = match ch {
        'ı' => 'i',
        'İ' => 'I',
        'ş' => 's',
        'Ş' => 'S',
        'ğ' => 'g',
        'Ğ' => 'G',
        '−' | '–' | '—' => '-',
        other => other,
    };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn opaque(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

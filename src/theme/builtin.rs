// SPDX-License-Identifier: PMPL-1.0-or-later

//! Built-in palettes.

use super::{Color, Palette, Theme};

pub const DEFAULT_THEME: &str = "Varsayılan";

const fn hex(value: u32) -> Color {
    Color::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Roles in declaration order: primary, secondary, accent, accent_secondary,
/// success, warning, danger, dark, light, gray, text, text_secondary.
const fn palette(c: [u32; 12]) -> Palette {
    Palette {
        primary: hex(c[0]),
        secondary: hex(c[1]),
        accent: hex(c[2]),
        accent_secondary: hex(c[3]),
        success: hex(c[4]),
        warning: hex(c[5]),
        danger: hex(c[6]),
        dark: hex(c[7]),
        light: hex(c[8]),
        gray: hex(c[9]),
        text: hex(c[10]),
        text_secondary: hex(c[11]),
    }
}

const BUILTIN: &[(&str, &str, Palette)] = &[
    (
        DEFAULT_THEME,
        "Dark professional theme",
        palette([
            0x0F172A, 0x1E293B, 0x00D9FF, 0x7C3AED, 0x10B981, 0xF59E0B, 0xEF4444, 0x020617,
            0xF8FAFC, 0x64748B, 0xFFFFFF, 0xCBD5E1,
        ]),
    ),
    (
        "Profesyonel",
        "Navy and magenta corporate theme",
        palette([
            0x1A1A2E, 0x16213E, 0x0F3460, 0x533483, 0x53C653, 0xE94560, 0xFF1744, 0x0F0F0F,
            0xEAEAEA, 0x7A7A7A, 0xFFFFFF, 0xCCCCCC,
        ]),
    ),
    (
        "Modern",
        "Flat slate theme with mint accents",
        palette([
            0x2D3436, 0x636E72, 0x00B894, 0x6C5CE7, 0x55EFC4, 0xFDCB6E, 0xFF7675, 0x2D3436,
            0xDFE6E9, 0xB2BEC3, 0xFFFFFF, 0xDFE6E9,
        ]),
    ),
    (
        "Klasik",
        "Classic midnight blue theme",
        palette([
            0x2C3E50, 0x34495E, 0x3498DB, 0x9B59B6, 0x2ECC71, 0xF39C12, 0xE74C3C, 0x1A1A1A,
            0xECF0F1, 0x95A5A6, 0xFFFFFF, 0xECF0F1,
        ]),
    ),
    (
        "Açık",
        "Light theme for printed reports",
        palette([
            0xFFFFFF, 0xF5F5F5, 0x2196F3, 0x673AB7, 0x4CAF50, 0xFF9800, 0xF44336, 0xFFFFFF,
            0x212121, 0x757575, 0x212121, 0x757575,
        ]),
    ),
    (
        "Koyu Mavi",
        "Deep blue theme",
        palette([
            0x0C1A2B, 0x1E3A8A, 0x3B82F6, 0x8B5CF6, 0x10B981, 0xF59E0B, 0xEF4444, 0x030712,
            0xF1F5F9, 0x64748B, 0xFFFFFF, 0xCBD5E1,
        ]),
    ),
    (
        "Yeşil Tema",
        "Forest green theme",
        palette([
            0x0F2419, 0x166534, 0x22C55E, 0x84CC16, 0x15803D, 0xF59E0B, 0xDC2626, 0x052E16,
            0xF0FDF4, 0x6B7280, 0xFFFFFF, 0xD1FAE5,
        ]),
    ),
];

pub fn builtin_themes() -> Vec<Theme> {
    BUILTIN
        .iter()
        .map(|(name, description, palette)| Theme {
            name: name.to_string(),
            palette: *palette,
            description: description.to_string(),
        })
        .collect()
}

pub(super) fn default_palette() -> Palette {
    BUILTIN[0].2
}

pub(super) fn is_builtin_name(name: &str) -> bool {
    BUILTIN.iter().any(|(builtin, _, _)| *builtin == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_first() {
        let themes = builtin_themes();
        assert_eq!(themes.len(), 7);
        assert_eq!(themes[0].name, DEFAULT_THEME);
        assert_eq!(themes[0].palette.accent, Color::rgb(0x00, 0xD9, 0xFF));
    }
}

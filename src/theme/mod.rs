// SPDX-License-Identifier: PMPL-1.0-or-later

//! Named colour palettes and performance colour classification.
//!
//! Palettes are plain values: callers resolve a theme once and thread the
//! [`Palette`] through every render call. There is no process-wide "current
//! theme".

mod builtin;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use builtin::{builtin_themes, DEFAULT_THEME};

/// Alternative names that resolve to [`DEFAULT_THEME`].
const DEFAULT_ALIASES: &[&str] = &["default", "dark professional", "dark-professional"];

/// 24-bit sRGB colour, serialised as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB` (any case).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear blend toward `other`; `amount` is clamped to `0..=1`.
    pub fn mix(&self, other: Color, amount: f32) -> Color {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Color::rgb(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour {value:?}, expected #RRGGBB"))
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Closed set of colour roles every palette defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    Primary,
    Secondary,
    Accent,
    AccentSecondary,
    Success,
    Warning,
    Danger,
    Dark,
    Light,
    Gray,
    Text,
    TextSecondary,
}

impl SemanticRole {
    pub fn all() -> &'static [SemanticRole] {
        &[
            SemanticRole::Primary,
            SemanticRole::Secondary,
            SemanticRole::Accent,
            SemanticRole::AccentSecondary,
            SemanticRole::Success,
            SemanticRole::Warning,
            SemanticRole::Danger,
            SemanticRole::Dark,
            SemanticRole::Light,
            SemanticRole::Gray,
            SemanticRole::Text,
            SemanticRole::TextSecondary,
        ]
    }
}

/// Role → colour mapping. `dark` doubles as the figure background and
/// `primary` as the plot/table surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub dark: Color,
    pub light: Color,
    pub gray: Color,
    pub text: Color,
    pub text_secondary: Color,
}

impl Palette {
    pub fn get(&self, role: SemanticRole) -> Color {
        match role {
            SemanticRole::Primary => self.primary,
            SemanticRole::Secondary => self.secondary,
            SemanticRole::Accent => self.accent,
            SemanticRole::AccentSecondary => self.accent_secondary,
            SemanticRole::Success => self.success,
            SemanticRole::Warning => self.warning,
            SemanticRole::Danger => self.danger,
            SemanticRole::Dark => self.dark,
            SemanticRole::Light => self.light,
            SemanticRole::Gray => self.gray,
            SemanticRole::Text => self.text,
            SemanticRole::TextSecondary => self.text_secondary,
        }
    }

    pub fn background(&self) -> Color {
        self.dark
    }

    pub fn surface(&self) -> Color {
        self.primary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(rename = "colors")]
    pub palette: Palette,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("cannot replace or remove built-in theme {0:?}")]
    BuiltIn(String),
    #[error("theme {0:?} not found")]
    NotFound(String),
    #[error("theme name must not be empty")]
    EmptyName,
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    themes: Vec<Theme>,
}

/// Built-in themes followed by custom themes, in insertion order.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    /// Looks up `name` exactly, then case-insensitively, then through the
    /// default aliases; anything else resolves to the default palette.
    pub fn resolve(&self, name: &str) -> Palette {
        self.find(name)
            .map(|theme| theme.palette)
            .unwrap_or_else(|| self.default_palette())
    }

    pub fn find(&self, name: &str) -> Option<&Theme> {
        let wanted = name.trim();
        let lowered = wanted.to_lowercase();
        self.themes
            .iter()
            .find(|theme| theme.name == wanted)
            .or_else(|| {
                self.themes
                    .iter()
                    .find(|theme| theme.name.to_lowercase() == lowered)
            })
            .or_else(|| {
                if DEFAULT_ALIASES.contains(&lowered.as_str()) {
                    self.themes.iter().find(|theme| theme.name == DEFAULT_THEME)
                } else {
                    None
                }
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.iter().any(|theme| theme.name == name)
    }

    pub fn list_theme_names(&self) -> Vec<String> {
        self.themes.iter().map(|theme| theme.name.clone()).collect()
    }

    pub fn is_builtin(name: &str) -> bool {
        builtin::is_builtin_name(name)
    }

    /// Adds or replaces a custom theme. Built-in names are refused.
    pub fn add_custom(&mut self, theme: Theme) -> std::result::Result<(), ThemeError> {
        if theme.name.trim().is_empty() {
            return Err(ThemeError::EmptyName);
        }
        if Self::is_builtin(&theme.name) {
            return Err(ThemeError::BuiltIn(theme.name));
        }
        match self.themes.iter_mut().find(|existing| existing.name == theme.name) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
        Ok(())
    }

    pub fn remove_custom(&mut self, name: &str) -> std::result::Result<Theme, ThemeError> {
        if Self::is_builtin(name) {
            return Err(ThemeError::BuiltIn(name.to_string()));
        }
        let idx = self
            .themes
            .iter()
            .position(|theme| theme.name == name)
            .ok_or_else(|| ThemeError::NotFound(name.to_string()))?;
        Ok(self.themes.remove(idx))
    }

    pub fn custom_themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter().filter(|theme| !Self::is_builtin(&theme.name))
    }

    /// Merges custom themes from a `{"themes": [...]}` JSON file and returns
    /// how many were added. Entries shadowing built-ins are skipped.
    pub fn load_custom_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading theme file {}", path.display()))?;
        let file: ThemeFile = serde_json::from_str(&content)
            .with_context(|| format!("parsing theme file {}", path.display()))?;
        let mut added = 0;
        for theme in file.themes {
            let name = theme.name.clone();
            match self.add_custom(theme) {
                Ok(()) => added += 1,
                Err(err) => log::warn!("skipping theme {name:?} from {}: {err}", path.display()),
            }
        }
        Ok(added)
    }

    pub fn save_custom_file(&self, path: &Path) -> Result<()> {
        let file = ThemeFile {
            themes: self.custom_themes().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json).with_context(|| format!("writing theme file {}", path.display()))?;
        Ok(())
    }

    fn default_palette(&self) -> Palette {
        builtin::default_palette()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a built-in theme by name; unknown names fall back to the default.
pub fn resolve(name: &str) -> Palette {
    ThemeRegistry::new().resolve(name)
}

pub fn list_theme_names() -> Vec<String> {
    ThemeRegistry::new().list_theme_names()
}

/// Four-tier scale: ≥80 success, ≥60 accent, ≥40 warning, else danger.
pub fn classify_performance(percentage: f64) -> SemanticRole {
    if percentage >= 80.0 {
        SemanticRole::Success
    } else if percentage >= 60.0 {
        SemanticRole::Accent
    } else if percentage >= 40.0 {
        SemanticRole::Warning
    } else {
        SemanticRole::Danger
    }
}

/// Three-tier scale used for tactic and status colouring: ≥70 success,
/// ≥40 warning, else danger.
pub fn classify_status(percentage: f64) -> SemanticRole {
    if percentage >= 70.0 {
        SemanticRole::Success
    } else if percentage >= 40.0 {
        SemanticRole::Warning
    } else {
        SemanticRole::Danger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_theme(name: &str) -> Theme {
        Theme {
            name: name.to_string(),
            palette: resolve(DEFAULT_THEME),
            description: String::new(),
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Color::from_hex("#00d9ff").unwrap();
        assert_eq!(color, Color::rgb(0x00, 0xD9, 0xFF));
        assert_eq!(color.to_hex(), "#00D9FF");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn test_builtin_palettes_survive_hex_round_trip() {
        for theme in builtin_themes() {
            for &role in SemanticRole::all() {
                let color = theme.palette.get(role);
                assert_eq!(Color::from_hex(&color.to_hex()), Some(color), "{} {role:?}", theme.name);
            }
        }
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.resolve("no such theme"), registry.resolve(DEFAULT_THEME));
        assert_eq!(registry.resolve("Dark Professional"), registry.resolve(DEFAULT_THEME));
        assert_ne!(registry.resolve("Klasik"), registry.resolve(DEFAULT_THEME));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.resolve("modern"), registry.resolve("Modern"));
    }

    #[test]
    fn test_builtin_themes_cannot_be_removed() {
        let mut registry = ThemeRegistry::new();
        assert_eq!(
            registry.remove_custom("Klasik"),
            Err(ThemeError::BuiltIn("Klasik".to_string()))
        );
        assert!(registry.contains("Klasik"));
        assert_eq!(
            registry.add_custom(sample_theme("Modern")),
            Err(ThemeError::BuiltIn("Modern".to_string()))
        );
    }

    #[test]
    fn test_custom_theme_lifecycle() {
        let mut registry = ThemeRegistry::new();
        let before = registry.list_theme_names().len();
        registry.add_custom(sample_theme("Corporate")).unwrap();
        assert_eq!(registry.list_theme_names().len(), before + 1);
        assert_eq!(registry.list_theme_names().last().unwrap(), "Corporate");
        registry.remove_custom("Corporate").unwrap();
        assert_eq!(registry.list_theme_names().len(), before);
        assert_eq!(
            registry.remove_custom("Corporate"),
            Err(ThemeError::NotFound("Corporate".to_string()))
        );
    }

    #[test]
    fn test_four_tier_breakpoints() {
        assert_eq!(classify_performance(85.0), SemanticRole::Success);
        assert_eq!(classify_performance(80.0), SemanticRole::Success);
        assert_eq!(classify_performance(65.0), SemanticRole::Accent);
        assert_eq!(classify_performance(45.0), SemanticRole::Warning);
        assert_eq!(classify_performance(10.0), SemanticRole::Danger);
    }

    #[test]
    fn test_three_tier_breakpoints() {
        assert_eq!(classify_status(75.0), SemanticRole::Success);
        assert_eq!(classify_status(70.0), SemanticRole::Success);
        assert_eq!(classify_status(50.0), SemanticRole::Warning);
        assert_eq!(classify_status(20.0), SemanticRole::Danger);
    }

    #[test]
    fn test_palette_role_lookup() {
        let palette = resolve("Açık");
        assert_eq!(palette.get(SemanticRole::Text), Color::from_hex("#212121").unwrap());
        assert_eq!(palette.background(), palette.dark);
        assert_eq!(palette.surface(), palette.primary);
    }
}

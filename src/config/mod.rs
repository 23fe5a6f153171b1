// SPDX-License-Identifier: PMPL-1.0-or-later

//! Application configuration loading.

use crate::i18n::Lang;
use crate::render::RenderSettings;
use crate::theme::{Theme, ThemeRegistry, DEFAULT_THEME};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "IDCA_Reports";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: String,
    pub lang: Lang,
    pub output_dir: PathBuf,
    pub settings: RenderSettings,
    /// Extra palettes declared inline.
    pub custom_themes: Vec<Theme>,
    /// `{"themes": [...]}` JSON file merged after `custom_themes`.
    pub theme_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            lang: Lang::En,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            settings: RenderSettings::default(),
            custom_themes: Vec::new(),
            theme_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml config {}", path.display())),
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display())),
            _ => Err(anyhow!("unsupported config extension for {}", path.display())),
        }
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Render settings carrying the configured language.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            lang: self.lang,
            ..self.settings.clone()
        }
    }

    /// Built-in themes plus every custom theme this config declares.
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::new();
        for theme in &self.custom_themes {
            if let Err(err) = registry.add_custom(theme.clone()) {
                log::warn!("skipping custom theme {:?}: {err}", theme.name);
            }
        }
        if let Some(path) = &self.theme_file {
            let added = registry.load_custom_file(path)?;
            log::debug!("loaded {added} theme(s) from {}", path.display());
        }
        Ok(registry)
    }

    /// Settings problems and an empty theme name.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.settings.validate();
        if self.theme.trim().is_empty() {
            issues.push("Theme name must not be empty".to_string());
        }
        issues
    }
}

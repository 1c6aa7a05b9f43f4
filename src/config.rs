//! Gallery configuration.
//!
//! Handles loading, validating, and layering `gallery.toml`. Values resolve
//! in three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  →  gallery.toml  →  command-line flags (--data, --img-base)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_url = "/data/characters.json"      # JSON item list (URL or path)
//! img_base = "/assets/hi3/characters/"    # Prefix for <slug>.<ext> portraits
//! placeholder = "/assets/placeholder.png" # Shown when no portrait loads
//! title = "Valkyries"                     # Page title
//!
//! [theme]
//! card_min_width = "160px"  # Minimum grid column width
//! grid_gap = "1rem"         # Gap between cards
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Tag line, captions
//! border = "#e0e0e0"
//! accent = "#3d7bd9"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#7fb0ff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DATA_URL: &str = "/data/characters.json";
pub const DEFAULT_IMG_BASE: &str = "/assets/hi3/characters/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// JSON data source: `http(s)` URL, site-absolute path, or file path.
    pub data_url: String,
    /// URL prefix under which `<slug>.<ext>` portraits live.
    pub img_base: String,
    /// Image shown when no candidate loads.
    pub placeholder: String,
    /// Page title.
    pub title: String,
    /// Grid layout.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            img_base: DEFAULT_IMG_BASE.to_string(),
            placeholder: crate::resolve::DEFAULT_PLACEHOLDER.to_string(),
            title: "Valkyries".to_string(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_url.trim().is_empty() {
            return Err(ConfigError::Validation("data_url must not be empty".into()));
        }
        if self.img_base.trim().is_empty() {
            return Err(ConfigError::Validation("img_base must not be empty".into()));
        }
        if self.placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "placeholder must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Grid layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Minimum column width; the grid fits as many columns as it can.
    pub card_min_width: String,
    /// Gap between cards (CSS value).
    pub grid_gap: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            card_min_width: "160px".to_string(),
            grid_gap: "1rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted text (tag line, lightbox caption).
    pub text_muted: String,
    pub border: String,
    /// Focus ring and hover outline.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#3d7bd9".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#7fb0ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, layering, and validation
// =============================================================================

/// Command-line values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_url: Option<String>,
    pub img_base: Option<String>,
}

impl Overrides {
    fn to_value(&self) -> toml::Value {
        let mut table = toml::map::Map::new();
        if let Some(data_url) = &self.data_url {
            table.insert("data_url".into(), toml::Value::String(data_url.clone()));
        }
        if let Some(img_base) = &self.img_base {
            table.insert("img_base".into(), toml::Value::String(img_base.clone()));
        }
        toml::Value::Table(table)
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Layer stock defaults, the optional file, and command-line overrides, then
/// deserialize and validate.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<GalleryConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    if let Some(file) = load_raw_config(path)? {
        merged = merge_toml(merged, file);
    }
    merged = merge_toml(merged, overrides.to_value());
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Valkyrie Gallery Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# --data and --img-base on the command line override the values here.

# JSON list of {"slug", "en", "zh"} records.
# An http(s) URL, a site-absolute path (resolved against --site-root),
# or a plain file path.
data_url = "/data/characters.json"

# Portraits are looked up as <img_base><slug>.<ext>, trying
# webp, png, jpg, jpeg, avif in that order.
img_base = "/assets/hi3/characters/"

# Shown when none of the candidates load.
placeholder = "/assets/placeholder.png"

# Page title.
title = "Valkyries"

# ---------------------------------------------------------------------------
# Grid layout
# ---------------------------------------------------------------------------
[theme]
# Minimum column width; the grid fits as many columns as it can.
card_min_width = "160px"

# Gap between cards (CSS value).
grid_gap = "1rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Tag line, captions
border = "#e0e0e0"
accent = "#3d7bd9"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#7fb0ff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --card-min-width: {card_min_width};
    --grid-gap: {grid_gap};
}}"#,
        card_min_width = theme.card_min_width,
        grid_gap = theme.grid_gap,
    )
}

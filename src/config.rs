//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The portfolio
//! *content* lives in `config.json` (see [`crate::types::Portfolio`]); this file
//! only controls how the page is built: gallery behaviour, probing, layout and
//! colors. Stock defaults are overridden by whatever keys the user sets.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.json              # Portfolio document (name, bio, projects)
//! ├── config.toml              # Build settings (optional)
//! ├── assets/                  # Copied verbatim to the output root
//! └── images/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "assets"         # Copied verbatim into the output
//!
//! [gallery]
//! center_thumbnails_max = 4     # Center the thumbnail strip up to this many images
//! probe_timeout_ms = 5000       # Per-image probe bound, 0 = wait forever
//! trust_remote = true           # Accept http(s) images without fetching them
//! lazy_loading = true           # loading="lazy" on carousel slides
//!
//! [theme]
//! card_gap = "2rem"
//! content_width = "1200px"
//!
//! [colors.light]
//! background = "#f7f8fc"
//! surface = "#ffffff"
//! text = "#1d1f2b"
//! text_muted = "#5f6478"
//! accent = "#5b5bd6"
//! border = "#e1e4ee"
//!
//! [colors.dark]
//! # same keys, dark values
//!
//! [processing]
//! max_processes = 4             # Probe worker threads (default: all cores)
//! ```
//!
//! ## Validation
//!
//! Unknown keys are rejected at parse time. Value checks happen in
//! [`SiteConfig::validate`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the content root) copied verbatim to the output.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Carousel and probing behaviour.
    pub gallery: GalleryConfig,
    /// Layout settings.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel probing settings.
    pub processing: ProcessingConfig,
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            gallery: GalleryConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reject values that parse but cannot drive a build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        if Path::new(&self.assets_dir).is_absolute() || self.assets_dir.contains("..") {
            return Err(ConfigError::Validation(
                "assets_dir must be a path inside the content root".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Gallery and probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Thumbnail strips with at most this many images are centered.
    pub center_thumbnails_max: usize,
    /// Upper bound for a single image probe in milliseconds. `0` disables it.
    pub probe_timeout_ms: u64,
    /// Whether remote (`http://`, `https://`) images count as loadable.
    /// The builder has no network access, so they are either trusted or dropped.
    pub trust_remote: bool,
    /// Emit `loading="lazy"` on carousel slides.
    pub lazy_loading: bool,
}

impl GalleryConfig {
    /// The probe bound, or `None` when probing may wait indefinitely.
    pub fn probe_timeout(&self) -> Option<Duration> {
        (self.probe_timeout_ms > 0).then(|| Duration::from_millis(self.probe_timeout_ms))
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            center_thumbnails_max: 4,
            probe_timeout_ms: 5000,
            trust_remote: true,
            lazy_loading: true,
        }
    }
}

/// Layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Gap between project cards (CSS value).
    pub card_gap: String,
    /// Maximum width of the page content (CSS value).
    pub content_width: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            card_gap: "2rem".to_string(),
            content_width: "1200px".to_string(),
        }
    }
}

/// Palettes for `prefers-color-scheme: light` and `dark`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
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

/// One palette, emitted as `--color-*` custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and modal surface.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (bio, descriptions, counters).
    pub text_muted: String,
    /// Links, badges, active thumbnail outline.
    pub accent: String,
    /// Border color.
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7f8fc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1d1f2b".to_string(),
            text_muted: "#5f6478".to_string(),
            accent: "#5b5bd6".to_string(),
            border: "#e1e4ee".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f1117".to_string(),
            surface: "#181b24".to_string(),
            text: "#eceef5".to_string(),
            text_muted: "#9aa0b4".to_string(),
            accent: "#8b8cf2".to_string(),
            border: "#2a2e3b".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Parallel probing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of probe worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Number of probe workers: `max_processes` capped at the core count, or
/// every core when unset.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    config.max_processes.map_or(cores, |n| n.min(cores))
}

// =============================================================================
// Loading
// =============================================================================

/// Name of the optional build settings file inside the content root.
pub const CONFIG_FILE: &str = "config.toml";

/// The stock defaults as a TOML table, the base every user file merges onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Overlay `overrides` onto `base`.
///
/// Nested tables merge per key. Scalars and arrays in `overrides` replace
/// whatever `base` held.
pub fn merge_toml(base: toml::Value, overrides: toml::Value) -> toml::Value {
    match (base, overrides) {
        (toml::Value::Table(mut table), toml::Value::Table(changes)) => {
            for (key, value) in changes {
                let value = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, value);
            }
            toml::Value::Table(table)
        }
        (_, replacement) => replacement,
    }
}

fn read_user_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(toml::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load [`CONFIG_FILE`] from the content root on top of the stock defaults.
///
/// A missing file yields the defaults. The merged table must still
/// deserialize (unknown keys are rejected) and pass [`SiteConfig::validate`].
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    if let Some(user) = read_user_config(&root.join(CONFIG_FILE))? {
        merged = merge_toml(merged, user);
    }
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.
#
# Portfolio content (name, bio, projects) lives in config.json next to
# this file; config.toml only controls how the page is built.

# Directory copied verbatim into the output (favicons, fonts, resume.pdf).
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Project galleries
# ---------------------------------------------------------------------------
[gallery]
# Thumbnail strips with at most this many images are centered.
center_thumbnails_max = 4

# Upper bound for probing one image, in milliseconds.
# A probe that exceeds it counts as a missing image. 0 waits forever.
probe_timeout_ms = 5000

# Remote images (http, https) cannot be probed offline.
# true keeps them in galleries, false drops them.
trust_remote = true

# Add loading="lazy" to carousel slides.
lazy_loading = true

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
# Gap between project cards (CSS value).
card_gap = "2rem"

# Maximum width of the page content (CSS value).
content_width = "1200px"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7f8fc"
surface = "#ffffff"
text = "#1d1f2b"
text_muted = "#5f6478"
accent = "#5b5bd6"
border = "#e1e4ee"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f1117"
surface = "#181b24"
text = "#eceef5"
text_muted = "#9aa0b4"
accent = "#8b8cf2"
border = "#2a2e3b"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel probe workers.
# Omit to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("accent", &scheme.accent),
        ("border", &scheme.border),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --card-gap: {card_gap};
    --content-width: {content_width};
}}"#,
        card_gap = theme.card_gap,
        content_width = theme.content_width,
    )
}

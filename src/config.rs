//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are the base layer; a `config.toml` in the config directory (by default
//! the content directory) is merged over them key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! slugs_file = "slugs.json"       # Slug layout document
//! pages_file = "pages.json"       # Page document
//! navigation_page = "navigation"  # Page whose tree becomes the nav bar
//! home_page = "home"              # Page rendered at `/`, if present
//!
//! [navigation]
//! variant = "default"             # "default" or "glass"
//! mobile_breakpoint = 762         # Sidebar below this width (px)
//!
//! [hero]
//! headline = "Nuclear is "
//! words = ["clean.", "safe."]     # Rotating words after the headline
//! interval_ms = 2000
//! emphasis_ms = 1500              # Extra hold on the last word
//! letter_delay_ms = 50
//!
//! [carousel]                      # Multi-coin showcase carousel
//! coin_count = 5
//! loop_duration = 10.0
//! showcase_duration = 1.5
//! easing = "power1.inOut"
//!
//! [velocity]                      # Single-coin tilted carousel
//! fast_velocity = 0.2
//! slow_velocity = 0.05
//! tilt_angle = 20.0
//!
//! [colors]
//! primary = "#477977"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::{ShowcaseConfig, VelocityConfig};
use crate::gradient::{GradientOptions, build_gradient};
use crate::navbar::NavVariant;
use crate::rotation::RotationSchedule;
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

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the content documents live and which pages play special roles.
    pub content: ContentConfig,
    /// Nav bar presentation.
    pub navigation: NavigationConfig,
    /// Home page hero.
    pub hero: HeroConfig,
    /// Showcase carousel options.
    pub carousel: ShowcaseConfig,
    /// Velocity carousel options.
    pub velocity: VelocityConfig,
    /// Theme color tokens.
    pub colors: ThemeColors,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.slugs_file.is_empty() || self.content.pages_file.is_empty() {
            return Err(ConfigError::Validation(
                "content.slugs_file and content.pages_file must not be empty".into(),
            ));
        }
        if self.navigation.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "navigation.mobile_breakpoint must be non-zero".into(),
            ));
        }
        self.carousel
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        self.velocity
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        hero_gradients(&self.colors)
            .iter()
            .try_for_each(|options| build_gradient(options).map(drop))
            .map_err(|e| ConfigError::Validation(format!("colors: {e}")))?;
        Ok(())
    }
}

/// Content document locations and special page ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Slug layout document, relative to the content directory.
    pub slugs_file: String,
    /// Page document, relative to the content directory.
    pub pages_file: String,
    /// Page id whose content tree is turned into the nav bar.
    pub navigation_page: String,
    /// Page id rendered at `/`. The built-in hero is used when absent.
    pub home_page: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            slugs_file: "slugs.json".to_string(),
            pages_file: "pages.json".to_string(),
            navigation_page: "navigation".to_string(),
            home_page: "home".to_string(),
        }
    }
}

/// Nav bar presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Starting visual variant.
    pub variant: NavVariant,
    /// Viewport width (px) below which the sidebar replaces the desktop bar.
    pub mobile_breakpoint: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            variant: NavVariant::Default,
            mobile_breakpoint: 762,
        }
    }
}

/// Home page hero: a headline followed by rotating words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub headline: String,
    pub words: Vec<String>,
    pub description: String,
    pub interval_ms: u64,
    /// Extra hold on the last word.
    pub emphasis_ms: u64,
    pub letter_delay_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            headline: "Nuclear is ".to_string(),
            words: [
                "clean.",
                "safe.",
                "cheap.",
                "reliable.",
                "efficient.",
                "the future.",
            ]
            .map(String::from)
            .to_vec(),
            description: "The most reliable carbon-free energy with minimal footprint, \
                          powering communities and industries worldwide."
                .to_string(),
            interval_ms: 2000,
            emphasis_ms: 1500,
            letter_delay_ms: 50,
        }
    }
}

impl HeroConfig {
    pub fn schedule(&self) -> RotationSchedule {
        RotationSchedule::new(self.words.iter().cloned())
            .with_interval(Duration::from_millis(self.interval_ms))
            .with_emphasis(Duration::from_millis(self.emphasis_ms))
            .with_letter_delay(Duration::from_millis(self.letter_delay_ms))
    }
}

/// Theme color tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    /// Page background.
    pub primary_bg: String,
    /// Cards, dropdowns, sidebar.
    pub secondary_bg: String,
    pub primary_text: String,
    /// Muted text (captions, column titles).
    pub secondary_text: String,
    pub light_green: String,
    pub green: String,
    pub dark_green: String,
    pub blue: String,
    pub dark_blue: String,
    pub light_gray: String,
    pub dark_gray: String,
    pub off_white: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#477977".to_string(),
            secondary: "#295982".to_string(),
            primary_bg: "#FFFFFF".to_string(),
            secondary_bg: "#F2F2F7".to_string(),
            primary_text: "#000000".to_string(),
            secondary_text: "#8E8E93".to_string(),
            light_green: "#c2e06e".to_string(),
            green: "#6aa242".to_string(),
            dark_green: "#09614e".to_string(),
            blue: "#3749a3".to_string(),
            dark_blue: "#264549".to_string(),
            light_gray: "#F5F5F5".to_string(),
            dark_gray: "#8E8E93".to_string(),
            off_white: "#D7F0E9".to_string(),
        }
    }
}

/// The hero's three background layers: base fill, radial glow, and
/// diagonal highlight.
pub fn hero_gradients(colors: &ThemeColors) -> [GradientOptions; 3] {
    [
        GradientOptions::new([&colors.dark_green, &colors.dark_green]),
        GradientOptions::new([
            &colors.dark_green,
            &colors.dark_green,
            &colors.green,
            &colors.green,
        ])
        .percentages(vec![0.2, 0.45, 0.56, 1.0])
        .radial(crate::gradient::DEFAULT_RADIAL_SHAPE)
        .opacity(0.8),
        GradientOptions::new([&colors.light_green, &colors.green, &colors.green])
            .percentages(vec![0.5, 0.7, 1.0])
            .opacity(0.6),
    ]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "config.toml";

/// Every `SiteConfig` default as a TOML table: the layer a site's
/// `config.toml` is laid over.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`.
///
/// Sections present in both are merged key by key, so a site can override
/// `[colors] primary` without restating the rest of `[colors]`. Any other
/// value in `overlay` (including arrays such as `[hero] words`) replaces
/// the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Parse `CONFIG_FILE` in a content root. A root without one yields
/// `Ok(None)` and the site runs on stock defaults.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&text)?))
}

/// Apply a site's overrides (if any) to `base`, then build and validate the
/// typed config. Unknown sections or keys fail here.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let layered = match overlay {
        Some(site) => merge_toml(base, site),
        None => base,
    };
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %root.display(), "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Copydeck Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content directory (or pass --config DIR).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Content documents
# ---------------------------------------------------------------------------
[content]
# Slug layout and page documents, relative to the content directory.
slugs_file = "slugs.json"
pages_file = "pages.json"

# Page whose content tree becomes the nav bar.
navigation_page = "navigation"

# Page rendered at "/". The built-in hero is used when it does not exist.
home_page = "home"

# ---------------------------------------------------------------------------
# Navigation bar
# ---------------------------------------------------------------------------
[navigation]
# Visual variant: "default" or "glass".
variant = "default"

# Viewport width (px) below which the sidebar replaces the desktop bar.
mobile_breakpoint = 762

# ---------------------------------------------------------------------------
# Home page hero
# ---------------------------------------------------------------------------
[hero]
headline = "Nuclear is "
words = ["clean.", "safe.", "cheap.", "reliable.", "efficient.", "the future."]
description = "The most reliable carbon-free energy with minimal footprint, powering communities and industries worldwide."

# Time each word stays on screen.
interval_ms = 2000

# Extra hold on the last word.
emphasis_ms = 1500

# Stagger between letters of the incoming word.
letter_delay_ms = 50

# ---------------------------------------------------------------------------
# Showcase carousel (several coins, keyframed)
# ---------------------------------------------------------------------------
[carousel]
coin_count = 5

# Seconds per full turn.
loop_duration = 10.0

# Seconds each coin spends in the emphasized window at the front.
showcase_duration = 1.5

autoplay = true

# CSS perspective of the container (px).
perspective = 1000.0

# Easing between keyframes: none, power1.in, power1.out, power1.inOut,
# power2.in, power2.out, power2.inOut, sine.inOut.
easing = "power1.inOut"

ellipse_width = 600.0
ellipse_height = 300.0
coin_size = 120.0

# Poses sampled per turn.
keyframes = 40

# ---------------------------------------------------------------------------
# Velocity carousel (one coin, tilted ellipse)
# ---------------------------------------------------------------------------
[velocity]
# Loop progress per second.
fast_velocity = 0.2
slow_velocity = 0.05

# Shares of the loop spent fast and slow. The rest is split evenly between
# the two transitions. Must not add up to more than 1.
fast_path_percent = 0.5
slow_path_percent = 0.2

# Tilt about the horizontal axis (degrees).
tilt_angle = 20.0

offset_x = 0.0
offset_y = 0.0
ellipse_width = 600.0
ellipse_height = 300.0
coin_size = 120.0

# ---------------------------------------------------------------------------
# Theme colors
# ---------------------------------------------------------------------------
[colors]
primary = "#477977"
secondary = "#295982"
primary_bg = "#FFFFFF"
secondary_bg = "#F2F2F7"
primary_text = "#000000"
secondary_text = "#8E8E93"
light_green = "#c2e06e"
green = "#6aa242"
dark_green = "#09614e"
blue = "#3749a3"
dark_blue = "#264549"
light_gray = "#F5F5F5"
dark_gray = "#8E8E93"
off_white = "#D7F0E9"
"##
}

/// Generate CSS custom properties from the theme colors.
pub fn generate_color_css(colors: &ThemeColors) -> String {
    let tokens = [
        ("primary", &colors.primary),
        ("secondary", &colors.secondary),
        ("primary-bg", &colors.primary_bg),
        ("secondary-bg", &colors.secondary_bg),
        ("primary-text", &colors.primary_text),
        ("secondary-text", &colors.secondary_text),
        ("light-green", &colors.light_green),
        ("green", &colors.green),
        ("dark-green", &colors.dark_green),
        ("blue", &colors.blue),
        ("dark-blue", &colors.dark_blue),
        ("light-gray", &colors.light_gray),
        ("dark-gray", &colors.dark_gray),
        ("off-white", &colors.off_white),
    ];
    let mut css = String::from(":root {\n");
    for (name, value) in tokens {
        css.push_str(&format!("    --color-{name}: {value};\n"));
    }
    css.push('}');
    css
}

/// Media query switching the desktop nav bar for the sidebar.
pub fn generate_breakpoint_css(navigation: &NavigationConfig) -> String {
    format!(
        r#"@media (max-width: {bp}px) {{
    .navbar-links {{ display: none; }}
    .hamburger {{ display: block; }}
}}

@media (min-width: {above}px) {{
    .sidebar {{ display: none; }}
}}"#,
        bp = navigation.mobile_breakpoint,
        above = navigation.mobile_breakpoint + 1,
    )
}

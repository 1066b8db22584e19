//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content root.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── assets/                  # Copied to <output>/assets/
//! ├── docs/
//! └── blogs/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = ""            # URL prefix when the site is not served from /
//! assets_dir = "assets"     # Directory under the content root copied verbatim
//!
//! [site]
//! title = "Project"
//! tagline = "Documentation and news"
//! intro = ""                # Paragraph under the home page heading
//! github_url = ""           # Navbar GitHub link (hidden when empty)
//!
//! [sections]
//! docs = "docs"             # Directory (and URL segment) of the docs
//! blogs = "blogs"           # Directory (and URL segment) of the blog
//! docs_title = "Documentation"
//! blogs_title = "Blogs"
//!
//! [blog]
//! latest_count = 4                  # Posts shown on the home page
//! home_description_limit = 100      # Characters before "..." on the home page
//! listing_description_limit = 200   # Characters before "... read more"
//! date_format = "%B %-d, %Y"        # chrono strftime format
//!
//! [reading]
//! words_per_minute = 200
//!
//! [colors.light]
//! background = "#ffffff"
//! # ... see `docsite gen-config` for every key
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [site]
//! title = "Godot MMORPG"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "config.toml";

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
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix for every generated link (`""` or `/something`).
    pub base_path: String,
    /// Directory under the content root copied to the same path under the output directory.
    pub assets_dir: String,
    /// Site identity shown in the navbar and on the home page.
    pub site: SiteInfo,
    /// Section directory names and titles.
    pub sections: SectionsConfig,
    /// Blog listing settings.
    pub blog: BlogConfig,
    /// Reading-time estimate settings.
    pub reading: ReadingConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            assets_dir: "assets".to_string(),
            site: SiteInfo::default(),
            sections: SectionsConfig::default(),
            blog: BlogConfig::default(),
            reading: ReadingConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_path(&self.base_path)?;
        for (key, dir) in [
            ("sections.docs", &self.sections.docs),
            ("sections.blogs", &self.sections.blogs),
        ] {
            if dir.is_empty() || dir.contains(['/', '\\']) || dir == "." || dir == ".." {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single directory name"
                )));
            }
        }
        if self.sections.docs == self.sections.blogs {
            return Err(ConfigError::Validation(
                "sections.docs and sections.blogs must differ".into(),
            ));
        }
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be positive".into(),
            ));
        }
        if StrftimeItems::new(&self.blog.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "blog.date_format is not a valid strftime format: {}",
                self.blog.date_format
            )));
        }
        Ok(())
    }
}

/// Check a base path: empty, or `/segment[/segment...]` without a trailing slash.
pub fn validate_base_path(base_path: &str) -> Result<(), ConfigError> {
    if base_path.is_empty() {
        return Ok(());
    }
    if !base_path.starts_with('/') || base_path.ends_with('/') || base_path.contains("//") {
        return Err(ConfigError::Validation(format!(
            "base_path must be empty or look like \"/path\" (got {base_path:?})"
        )));
    }
    Ok(())
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name in the navbar and page titles.
    pub title: String,
    /// Line under the home page heading.
    pub tagline: String,
    /// Optional paragraph on the home page.
    pub intro: String,
    /// GitHub link in the navbar; hidden when empty.
    pub github_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Project".to_string(),
            tagline: "Documentation and news".to_string(),
            intro: String::new(),
            github_url: String::new(),
        }
    }
}

/// Section directories (relative to the content root) and their titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionsConfig {
    pub docs: String,
    pub blogs: String,
    pub docs_title: String,
    pub blogs_title: String,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            docs: "docs".to_string(),
            blogs: "blogs".to_string(),
            docs_title: "Documentation".to_string(),
            blogs_title: "Blogs".to_string(),
        }
    }
}

/// Blog listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Number of posts shown on the home page.
    pub latest_count: usize,
    /// Description length on the home page before truncation.
    pub home_description_limit: usize,
    /// Description length on the blog listing before truncation.
    pub listing_description_limit: usize,
    /// `chrono` strftime format for release dates.
    pub date_format: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            latest_count: 4,
            home_description_limit: 100,
            listing_description_limit: 200,
            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

/// Reading-time estimate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Color configuration for light and dark modes.
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

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Sidebar, cards, and navbar background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted text (dates, reading time, hints).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Tag pill background.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f4f5".to_string(),
            text: "#18181b".to_string(),
            text_muted: "#71717a".to_string(),
            border: "#e4e4e7".to_string(),
            link: "#2563eb".to_string(),
            accent: "#dbeafe".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#18181b".to_string(),
            surface: "#27272a".to_string(),
            text: "#fafafa".to_string(),
            text_muted: "#a1a1aa".to_string(),
            border: "#3f3f46".to_string(),
            link: "#60a5fa".to_string(),
            accent: "#1e3a8a".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
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
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file at
# <content root>/config.toml. Unknown keys will cause an error.

# URL prefix for every generated link, for sites not served from the domain
# root (e.g. "/my-project" on GitHub Pages). Empty or "/path", no trailing slash.
base_path = ""

# Directory under the content root copied verbatim to the same path
# under the output directory.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Project"
tagline = "Documentation and news"
# Paragraph shown under the home page heading.
intro = ""
# Navbar GitHub link; hidden when empty.
github_url = ""

# ---------------------------------------------------------------------------
# Sections: directory names under the content root, also used as URL segments
# ---------------------------------------------------------------------------
[sections]
docs = "docs"
blogs = "blogs"
docs_title = "Documentation"
blogs_title = "Blogs"

# ---------------------------------------------------------------------------
# Blog listing
# ---------------------------------------------------------------------------
[blog]
# Number of latest posts on the home page.
latest_count = 4
# Description length (characters) before truncation.
home_description_limit = 100
listing_description_limit = 200
# Release date display format (chrono strftime syntax).
date_format = "%B %-d, %Y"

# ---------------------------------------------------------------------------
# Reading time estimate
# ---------------------------------------------------------------------------
[reading]
words_per_minute = 200

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f4f5"       # Sidebar, cards, navbar
text = "#18181b"
text_muted = "#71717a"    # Dates, reading time, hints
border = "#e4e4e7"
link = "#2563eb"
accent = "#dbeafe"        # Tag pills

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#18181b"
surface = "#27272a"
text = "#fafafa"
text_muted = "#a1a1aa"
border = "#3f3f46"
link = "#60a5fa"
accent = "#1e3a8a"
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
        ("border", &scheme.border),
        ("link", &scheme.link),
        ("accent", &scheme.accent),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.base_path, "");
        assert_eq!(config.sections.docs, "docs");
        assert_eq!(config.sections.blogs, "blogs");
        assert_eq!(config.blog.latest_count, 4);
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[site]
title = "Godot MMORPG"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Godot MMORPG");
        // Defaults preserved
        assert_eq!(config.site.tagline, "Documentation and news");
        assert_eq!(config.sections.docs, "docs");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg:",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
            "--color-border:",
            "--color-link:",
            "--color-accent:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Project");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
base_path = "/game"

[site]
github_url = "https://github.com/example"

[blog]
latest_count = 2
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.base_path, "/game");
        assert_eq!(config.site.github_url, "https://github.com/example");
        assert_eq!(config.blog.latest_count, 2);
        // Unspecified values should be defaults
        assert_eq!(config.blog.listing_description_limit, 200);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[blog]\nlatest = 3\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[blogz]\nlatest_count = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_path_shapes() {
        assert!(validate_base_path("").is_ok());
        assert!(validate_base_path("/site").is_ok());
        assert!(validate_base_path("/a/b").is_ok());
        assert!(validate_base_path("site").is_err());
        assert!(validate_base_path("/site/").is_err());
        assert!(validate_base_path("/").is_err());
        assert!(validate_base_path("/a//b").is_err());
    }

    #[test]
    fn validate_section_names() {
        let mut config = SiteConfig::default();
        config.sections.docs = "a/b".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.sections.blogs = "docs".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.sections.docs = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_words_per_minute() {
        let mut config = SiteConfig::default();
        config.reading.words_per_minute = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("words_per_minute"));
    }

    #[test]
    fn validate_date_format() {
        let mut config = SiteConfig::default();
        config.blog.date_format = "%Y-%Q".into();
        assert!(config.validate().is_err());
        config.blog.date_format = "%Y-%m-%d".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "base_path = \"docs/\"\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[blog]\nlatest_count = 4\ndate_format = \"%Y\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[blog]\nlatest_count = 2\n").unwrap();
        let merged = merge_toml(base, overlay);
        let blog = merged.get("blog").unwrap();
        assert_eq!(blog.get("latest_count").unwrap().as_integer(), Some(2));
        assert_eq!(blog.get("date_format").unwrap().as_str(), Some("%Y"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("base_path = \"\"").unwrap();
        let overlay: toml::Value = toml::from_str("base_path = \"/x\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("base_path").unwrap().as_str(), Some("/x"));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.title, defaults.site.title);
        assert_eq!(config.blog.date_format, defaults.blog.date_format);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
        assert_eq!(config.reading.words_per_minute, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in ["site", "sections", "blog", "reading", "colors"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}

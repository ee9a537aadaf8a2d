//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. One file, flat defaults:
//! user config is sparse and only overrides the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! version = "0.6.3"            # Asset cache-busting string
//! base_url = "/"               # URL prefix for first-party script tags
//!
//! [gallery]
//! display_size = "2048x2048"   # Rendition name for gallery <img> tags
//! lightbox_size = "2048x2048"  # Rendition name for lightbox URLs
//! newest_window_days = 30      # Age cutoff for the "newest images" filter
//!
//! [shortcodes]
//! email_marker_class = "pf-eml"            # Marker class the reveal script looks for
//! default_email_title = "Send me an email" # Title attribute when none is given
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Cache-busting string appended to first-party script URLs.
    #[serde(default = "default_version")]
    pub version: String,
    /// URL prefix under which first-party scripts are served.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Gallery presentation settings.
    pub gallery: GalleryConfig,
    /// Shortcode rendering settings.
    pub shortcodes: ShortcodeConfig,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_base_url() -> String {
    "/".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            base_url: default_base_url(),
            gallery: GalleryConfig::default(),
            shortcodes: ShortcodeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::Validation("version must not be empty".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "base_url must not be empty".into(),
            ));
        }
        if self.gallery.display_size.trim().is_empty()
            || self.gallery.lightbox_size.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "gallery sizes must not be empty".into(),
            ));
        }
        if self.gallery.newest_window_days < 1 {
            return Err(ConfigError::Validation(
                "gallery.newest_window_days must be at least 1".into(),
            ));
        }
        if self.shortcodes.email_marker_class.trim().is_empty() {
            return Err(ConfigError::Validation(
                "shortcodes.email_marker_class must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Gallery presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Rendition name requested for gallery `<img>` tags.
    pub display_size: String,
    /// Rendition name requested for lightbox URLs.
    pub lightbox_size: String,
    /// How many days back the "newest images" filter reaches.
    pub newest_window_days: i64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            display_size: "2048x2048".to_string(),
            lightbox_size: "2048x2048".to_string(),
            newest_window_days: 30,
        }
    }
}

/// Shortcode rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShortcodeConfig {
    /// Marker class on rendered email elements; the client-side reveal
    /// script selects on it, so the shipped script only matches the stock
    /// value.
    pub email_marker_class: String,
    /// `title` attribute used when the shortcode does not supply one.
    pub default_email_title: String,
}

impl Default for ShortcodeConfig {
    fn default() -> Self {
        Self {
            email_marker_class: "pf-eml".to_string(),
            default_email_title: "Send me an email".to_string(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from `config.toml` in the given directory.
///
/// A missing file yields the stock defaults. Partial files are topped up
/// field-by-field from the defaults, unknown keys are rejected, and the
/// result is validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> String {
    format!(
        r##"# Vernissage Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Cache-busting string appended to first-party script URLs (?ver=...).
version = "{version}"

# URL prefix under which first-party scripts are served.
base_url = "/"

# ---------------------------------------------------------------------------
# Gallery presentation
# ---------------------------------------------------------------------------
[gallery]
# Rendition name requested for gallery <img> tags. Falls back to the
# original upload when an attachment has no such rendition.
display_size = "2048x2048"

# Rendition name requested for lightbox URLs.
lightbox_size = "2048x2048"

# How many days back the "newest images" filter reaches (inclusive).
newest_window_days = 30

# ---------------------------------------------------------------------------
# Shortcodes
# ---------------------------------------------------------------------------
[shortcodes]
# Marker class on rendered email elements. The shipped reveal script
# selects on the stock value; change both together.
email_marker_class = "pf-eml"

# Title attribute used when the email shortcode does not supply one.
default_email_title = "Send me an email"
"##,
        version = default_version(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_gallery_sizes() {
        let config = SiteConfig::default();
        assert_eq!(config.gallery.display_size, "2048x2048");
        assert_eq!(config.gallery.lightbox_size, "2048x2048");
        assert_eq!(config.gallery.newest_window_days, 30);
    }

    #[test]
    fn default_config_has_shortcode_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.shortcodes.email_marker_class, "pf-eml");
        assert_eq!(config.shortcodes.default_email_title, "Send me an email");
    }

    #[test]
    fn default_version_matches_crate() {
        let config = SiteConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
newest_window_days = 14
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.gallery.newest_window_days, 14);
        // Default values preserved
        assert_eq!(config.gallery.display_size, "2048x2048");
        assert_eq!(config.shortcodes.email_marker_class, "pf-eml");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.gallery.display_size, "2048x2048");
        assert_eq!(config.base_url, "/");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
base_url = "/assets/"

[gallery]
display_size = "1600x1600"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.base_url, "/assets/");
        assert_eq!(config.gallery.display_size, "1600x1600");
        // Unspecified values should be defaults
        assert_eq!(config.gallery.lightbox_size, "2048x2048");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[gallery]
newest_window_days = 0
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[gallery]
display_sze = "2048x2048"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[galery]
display_size = "2048x2048"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
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
    fn validate_empty_version() {
        let mut config = SiteConfig::default();
        config.version = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn validate_empty_base_url() {
        let mut config = SiteConfig::default();
        config.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_size() {
        let mut config = SiteConfig::default();
        config.gallery.display_size = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_window_days_boundary() {
        let mut config = SiteConfig::default();
        config.gallery.newest_window_days = 1;
        assert!(config.validate().is_ok());

        config.gallery.newest_window_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_marker_class() {
        let mut config = SiteConfig::default();
        config.shortcodes.email_marker_class = String::new();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(&content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.gallery.display_size, "2048x2048");
        assert_eq!(config.gallery.newest_window_days, 30);
        assert_eq!(config.shortcodes.email_marker_class, "pf-eml");
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[gallery]"));
        assert!(content.contains("[shortcodes]"));
    }
}

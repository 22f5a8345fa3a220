//! Site configuration module.
//!
//! Handles loading, validating, and merging the `escale.toml` file. The file
//! is sparse: stock defaults are the base layer and the user file overrides
//! only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [navigation]
//! home_page = "index.html"  # Page identifier used when the path ends in "/"
//!
//! [slider]
//! interval_ms = 5000        # Autoplay period
//!
//! [theme]
//! storage_key = "theme"     # Preference store key
//! inject_toggle = true      # Create the toggle button when the page lacks one
//!
//! [forms]
//! message_max_chars = 800   # Reservation message limit
//! phone_min_chars = 6       # Shortest accepted phone number
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `escale.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Active-link resolution.
    pub navigation: NavigationConfig,
    /// Hero slider autoplay.
    pub slider: SliderConfig,
    /// Light/dark preference handling.
    pub theme: ThemeConfig,
    /// Form rule thresholds.
    pub forms: FormsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.navigation.home_page.trim().is_empty() {
            return Err(ConfigError::Validation(
                "navigation.home_page must not be empty".into(),
            ));
        }
        if self.slider.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slider.interval_ms must be greater than 0".into(),
            ));
        }
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        if self.forms.phone_min_chars == 0 {
            return Err(ConfigError::Validation(
                "forms.phone_min_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Identifier of the home page, matched against link `href`s.
    pub home_page: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home_page: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
}

impl SliderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Key the preference is stored under.
    pub storage_key: String,
    /// Build a toggle inside `.header .nav` when the page has none.
    pub inject_toggle: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            inject_toggle: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    /// Longest reservation message accepted, in characters.
    pub message_max_chars: usize,
    /// Shortest phone number accepted, in characters.
    pub phone_min_chars: usize,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            message_max_chars: 800,
            phone_min_chars: 6,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
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

/// Load config from the file at `path`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `escale.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Escale Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Page identifier used when the current path ends in "/" (the site root).
# Nav links whose href equals the current page identifier are marked active.
home_page = "index.html"

# ---------------------------------------------------------------------------
# Hero slider
# ---------------------------------------------------------------------------
[slider]
# Milliseconds between automatic advances. Hovering the slider pauses
# autoplay; leaving it restarts a full interval.
interval_ms = 5000

# ---------------------------------------------------------------------------
# Theme (light / dark)
# ---------------------------------------------------------------------------
[theme]
# Preference store key holding "light" or "dark".
storage_key = "theme"

# Create the toggle button inside `.header .nav` when a page does not
# include `#theme-toggle` in its markup.
inject_toggle = true

# ---------------------------------------------------------------------------
# Forms
# ---------------------------------------------------------------------------
[forms]
# Longest reservation message accepted, in characters.
message_max_chars = 800

# Shortest phone number accepted, in characters (digits, + ( ) - and spaces).
phone_min_chars = 6
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.navigation.home_page, "index.html");
        assert_eq!(config.slider.interval(), Duration::from_secs(5));
        assert_eq!(config.theme.storage_key, "theme");
        assert!(config.theme.inject_toggle);
        assert_eq!(config.forms.message_max_chars, 800);
        assert_eq!(config.forms.phone_min_chars, 6);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[slider]
interval_ms = 8000
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.slider.interval_ms, 8000);
        // Default values preserved
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.forms.message_max_chars, 800);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[slider]
interval = 8000
"#;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn merge_keeps_untouched_keys() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[theme]\ninject_toggle = false").unwrap();
        let merged = merge_toml(base, overlay);
        let config: SiteConfig = merged.try_into().unwrap();
        assert!(!config.theme.inject_toggle);
        assert_eq!(config.theme.storage_key, "theme");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("escale.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("escale.toml");
        fs::write(
            &path,
            r#"
[navigation]
home_page = "accueil.html"

[forms]
message_max_chars = 300
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.navigation.home_page, "accueil.html");
        assert_eq!(config.forms.message_max_chars, 300);
        // Unspecified values should be defaults
        assert_eq!(config.forms.phone_min_chars, 6);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("escale.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_interval_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("escale.toml");
        fs::write(&path, "[slider]\ninterval_ms = 0\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_storage_key_fails_validation() {
        let mut config = SiteConfig::default();
        config.theme.storage_key.clear();
        assert!(config.validate().is_err());
    }
}

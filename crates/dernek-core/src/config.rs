//! # Core Configuration
//!
//! Settings for collation and validation limits.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DERNEK_COLLATION_LOCALE=tr                                         │
//! │     DERNEK_CASE_SENSITIVE=false                                        │
//! │     DERNEK_MAX_AMOUNT_KURUS=99999999999                                │
//! │                                                                         │
//! │  2. TOML Config File (path supplied by the host app)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Turkish, case-insensitive, 999.999.999,99 ₺ ceiling                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # dernek.toml
//! [collation]
//! locale = "tr"
//! case_sensitive = false
//!
//! [validation]
//! max_amount_kurus = 99999999999
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Collation Settings
// =============================================================================

/// How text columns are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollationSettings {
    /// BCP-47 locale whose collation rules apply.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Distinguish "ayşe" from "Ayşe" when letters are otherwise equal.
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_locale() -> String {
    crate::DEFAULT_LOCALE.to_string()
}

impl Default for CollationSettings {
    fn default() -> Self {
        CollationSettings {
            locale: default_locale(),
            case_sensitive: false,
        }
    }
}

// =============================================================================
// Validation Settings
// =============================================================================

/// Limits applied by form validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Largest amount accepted by amount fields, in kuruş.
    #[serde(default = "default_max_amount")]
    pub max_amount_kurus: i64,
}

fn default_max_amount() -> i64 {
    crate::MAX_AMOUNT_KURUS
}

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            max_amount_kurus: default_max_amount(),
        }
    }
}

impl ValidationSettings {
    /// The amount ceiling as `Money`.
    pub fn max_amount(&self) -> Money {
        Money::from_kurus(self.max_amount_kurus)
    }
}

// =============================================================================
// Core Config
// =============================================================================

/// Complete dernek-core configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub collation: CollationSettings,

    #[serde(default)]
    pub validation: ValidationSettings,
}

impl CoreConfig {
    /// Creates a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration.
    ///
    /// ## Priority
    /// 1. Environment variables
    /// 2. Config file (if a path is given and it exists)
    /// 3. Defaults
    pub fn load(config_path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match config_path {
            Some(path) if path.exists() => {
                info!(?path, "Loading core config");
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load core config, using defaults");
            Self::default()
        })
    }

    /// Parses a TOML document without touching the environment.
    pub fn from_toml(contents: &str) -> CoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks value consistency.
    pub fn validate(&self) -> CoreResult<()> {
        if self.collation.locale.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "collation.locale must not be empty".to_string(),
            ));
        }

        if self.validation.max_amount_kurus <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "validation.max_amount_kurus must be positive, got {}",
                self.validation.max_amount_kurus
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `DERNEK_*` overrides from any key lookup.
    ///
    /// Unparsable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(locale) = lookup("DERNEK_COLLATION_LOCALE") {
            debug!(%locale, "Collation locale overridden from environment");
            self.collation.locale = locale;
        }

        if let Some(value) = lookup("DERNEK_CASE_SENSITIVE") {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.collation.case_sensitive = true,
                "0" | "false" | "no" => self.collation.case_sensitive = false,
                other => warn!(value = other, "Ignoring invalid DERNEK_CASE_SENSITIVE"),
            }
        }

        if let Some(value) = lookup("DERNEK_MAX_AMOUNT_KURUS") {
            match value.parse::<i64>() {
                Ok(max) => self.validation.max_amount_kurus = max,
                Err(_) => warn!(%value, "Ignoring invalid DERNEK_MAX_AMOUNT_KURUS"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::new();
        assert_eq!(config.collation.locale, "tr");
        assert!(!config.collation.case_sensitive);
        assert_eq!(config.validation.max_amount_kurus, 99_999_999_999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CoreConfig::from_toml(
            r#"
            [collation]
            case_sensitive = true
            "#,
        )
        .unwrap();

        assert_eq!(config.collation.locale, "tr");
        assert!(config.collation.case_sensitive);
        assert_eq!(config.validation, ValidationSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = CoreConfig::from_toml("[collation\nlocale = ").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn test_overrides_take_priority() {
        let env: HashMap<&str, &str> = [
            ("DERNEK_COLLATION_LOCALE", "tr-TR"),
            ("DERNEK_CASE_SENSITIVE", "yes"),
            ("DERNEK_MAX_AMOUNT_KURUS", "500000"),
        ]
        .into_iter()
        .collect();

        let mut config = CoreConfig::from_toml("[collation]\nlocale = \"en\"").unwrap();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.collation.locale, "tr-TR");
        assert!(config.collation.case_sensitive);
        assert_eq!(config.validation.max_amount_kurus, 500_000);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut config = CoreConfig::new();
        config.apply_overrides(|key| match key {
            "DERNEK_MAX_AMOUNT_KURUS" => Some("lots".to_string()),
            "DERNEK_CASE_SENSITIVE" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, CoreConfig::new());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CoreConfig::new();
        config.validation.max_amount_kurus = 0;
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));

        let mut config = CoreConfig::new();
        config.collation.locale = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("dernek-core-missing-config.toml");
        let config = CoreConfig::load_or_default(Some(&path));
        assert!(!config.collation.locale.is_empty());
    }
}

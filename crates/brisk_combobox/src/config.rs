//! Combobox configuration
//!
//! Static defaults for a combobox, usually shipped as a TOML table:
//!
//! ```toml
//! multiple = true
//! default_value = ["apple"]
//! aria_label = "Fruits"
//! id_prefix = "fruit"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// Serializable combobox defaults
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComboboxConfig {
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub default_open: bool,
    /// A string in single mode, a list in multiple mode
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub aria_label: Option<String>,
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

fn default_id_prefix() -> String {
    "combobox".to_string()
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            default_open: false,
            default_value: None,
            aria_label: None,
            id_prefix: default_id_prefix(),
        }
    }
}

impl ComboboxConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ComboboxConfig = toml::from_str(raw)?;
        if let Some(value) = &config.default_value {
            if value.mode().is_multiple() != config.multiple {
                tracing::warn!(
                    "default_value {:?} does not match multiple = {}; it will be migrated",
                    value,
                    config.multiple
                );
            }
        }
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComboboxError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ComboboxConfig::from_toml_str("").unwrap();
        assert_eq!(config, ComboboxConfig::default());
        assert_eq!(config.id_prefix, "combobox");
    }

    #[test]
    fn test_multiple_config() {
        let config = ComboboxConfig::from_toml_str(
            r#"
            multiple = true
            default_value = ["apple", "pear"]
            aria_label = "Fruits"
            "#,
        )
        .unwrap();
        assert!(config.multiple);
        assert_eq!(
            config.default_value,
            Some(Value::Multiple(vec!["apple".into(), "pear".into()]))
        );
        assert_eq!(config.aria_label.as_deref(), Some("Fruits"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = ComboboxConfig::from_toml_str("multiple = \"yes\"").unwrap_err();
        assert!(matches!(err, ComboboxError::Config(_)));
        assert!(err.to_string().starts_with("Invalid combobox configuration"));
    }

    #[test]
    fn test_serializes_back() {
        let config = ComboboxConfig {
            default_value: Some("Paris".into()),
            ..ComboboxConfig::default()
        };
        let raw = config.to_toml_string().unwrap();
        assert_eq!(ComboboxConfig::from_toml_str(&raw).unwrap(), config);
    }
}

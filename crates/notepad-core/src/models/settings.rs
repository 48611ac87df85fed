//! Application settings model

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Open-ended settings map; no schema is enforced on its contents.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// A scalar settings value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Free text
    Text(String),
}

impl SettingValue {
    /// Parse user input into the narrowest matching scalar.
    ///
    /// `true`/`false` become booleans, then integers, then floats; anything
    /// else is kept as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Integer(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() {
                return Self::Float(value);
            }
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picks_narrowest_scalar() {
        assert_eq!(SettingValue::parse("TRUE"), SettingValue::Bool(true));
        assert_eq!(SettingValue::parse("42"), SettingValue::Integer(42));
        assert_eq!(SettingValue::parse("1.5"), SettingValue::Float(1.5));
        assert_eq!(
            SettingValue::parse("JetBrains Mono"),
            SettingValue::Text("JetBrains Mono".to_string())
        );
        assert_eq!(
            SettingValue::parse("inf"),
            SettingValue::Text("inf".to_string())
        );
    }

    #[test]
    fn test_settings_map_json_shape() {
        let mut settings = SettingsMap::new();
        settings.insert("font_size".to_string(), SettingValue::Integer(16));
        settings.insert("dark_mode".to_string(), SettingValue::Bool(true));

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"dark_mode":true,"font_size":16}"#);

        let parsed: SettingsMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}

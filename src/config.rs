use serde::{Deserialize, Serialize};

/// Verbosity level for debug logging during fallback resolution
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// No debug logging
    Silent = 0,
    /// Log only when fallbacks are used (default)
    #[default]
    Normal = 1,
    /// Log detailed information about fallback resolution
    Verbose = 2,
}

/// Runtime settings for the resolver and its diagnostics
///
/// ```json
/// {
///     "default_locale": "en_us",
///     "verbosity": "verbose",
///     "record_missing_keys": true,
///     "record_missing_translations": false
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_locale: String,
    pub verbosity: VerbosityLevel,
    pub record_missing_keys: bool,
    pub record_missing_translations: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        I18nConfig {
            default_locale: "en".to_string(),
            verbosity: VerbosityLevel::Normal,
            record_missing_keys: true,
            record_missing_translations: true,
        }
    }
}

impl I18nConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = I18nConfig::default();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.verbosity, VerbosityLevel::Normal);
        assert!(config.record_missing_keys);
        assert!(config.record_missing_translations);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"verbosity": "silent", "record_missing_translations": false}"#;
        let config = I18nConfig::from_json_str(json).unwrap();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.verbosity, VerbosityLevel::Silent);
        assert!(config.record_missing_keys);
        assert!(!config.record_missing_translations);
    }

    #[test]
    fn test_invalid_json() {
        assert!(I18nConfig::from_json_str(r#"{"verbosity": "loud"}"#).is_err());
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(VerbosityLevel::Verbose > VerbosityLevel::Normal);
        assert!(VerbosityLevel::Normal > VerbosityLevel::Silent);
    }
}

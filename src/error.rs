/// Error types for translation lookup and table construction
///
/// Unresolved keys and translations are not errors: they fall back to the key
/// and are recorded by the diagnostics registry. Only structurally invalid
/// input or API misuse ends up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    /// The effective locale was the literal string "null"
    #[error("Locale is the 4 letter string 'null', which is invalid (key: {key:?})")]
    InvalidLocale { key: String },

    /// A bulk-insert entry has no text for the default locale
    #[error("No default translation for '{default_locale}' in entry {entry}")]
    MissingDefaultTranslation {
        default_locale: String,
        entry: String,
    },

    /// A versioned segment is not exactly one non-empty label and one non-empty text
    #[error("Invalid text version: {segment:?}")]
    MalformedVersionSegment { segment: String },

    /// Variant selection ran out of candidates
    #[error("No version found (modifier: {modifier}) in {text:?}")]
    NoMatchingVariant { modifier: String, text: String },

    /// Merge between stores with different default locales
    #[error("Can't merge translations with different default locales: '{left}' and '{right}'")]
    IncompatibleMerge { left: String, right: String },

    /// Empty locale, key or text passed to `add`
    #[error("Invalid {field}: value must not be empty")]
    InvalidFieldValue { field: &'static str },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

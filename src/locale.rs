//! Locale helpers: generality, language prefix and display ordering
//!
//! Locales are lowercase strings of the form `language` or `language_region`
//! (e.g. `"en"`, `"pt_br"`). A locale with no region part is called general.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Locale string that call sites produce when a null value is stringified
pub const NULL_LOCALE: &str = "null";

/// True if the locale names a language without a region (e.g. `"pt"`).
pub fn is_general(locale: &str) -> bool {
    locale.chars().count() == 2 && !locale.contains(['_', '-'])
}

/// The language prefix of a locale: its first two characters.
///
/// Callers pass locales of at least two characters. Shorter input is
/// returned whole.
pub fn language_of(locale: &str) -> &str {
    locale
        .char_indices()
        .nth(2)
        .map_or(locale, |(end, _)| &locale[..end])
}

pub fn is_null_locale(locale: &str) -> bool {
    locale == NULL_LOCALE
}

/// Canonical form of a locale string: lowercase, `_` as separator, no
/// trailing separators. `"pt-BR"` becomes `"pt_br"`.
pub fn normalize_locale(locale: &str) -> String {
    locale
        .trim()
        .to_lowercase()
        .replace('-', "_")
        .trim_end_matches('_')
        .to_string()
}

/// Build a locale from a language and an optional region.
///
/// An empty region yields the general locale: `compose_locale("en", "")` is
/// `"en"`.
pub fn compose_locale(language: &str, region: &str) -> String {
    normalize_locale(&format!("{}_{}", language, region))
}

/// A translation together with the locale it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslatedEntry {
    pub locale: String,
    pub text: String,
}

impl TranslatedEntry {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        TranslatedEntry {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Display ordering relative to a default locale.
    ///
    /// Entries in the default locale come first, then entries sharing the
    /// default's language, then everything else. Within a group entries are
    /// sorted alphabetically by locale.
    pub fn display_cmp(&self, other: &TranslatedEntry, default_locale: &str) -> Ordering {
        let rank = |entry: &TranslatedEntry| {
            if entry.locale == default_locale {
                0
            } else if language_of(&entry.locale) == language_of(default_locale) {
                1
            } else {
                2
            }
        };
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.locale.cmp(&other.locale))
    }
}

pub fn sort_for_display(entries: &mut [TranslatedEntry], default_locale: &str) {
    entries.sort_by(|a, b| a.display_cmp(b, default_locale));
}

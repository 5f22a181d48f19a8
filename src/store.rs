//! In-memory translation table
//!
//! The table is keyed by translation key and then by locale:
//!
//! ```text
//! table["Hello"]["en_us"] = "Hello"
//! table["Hello"]["pt_br"] = "Olá"
//! table["Hello"]["de"]    = "Hallo"
//! ```
//!
//! Both levels keep insertion order. Lookup fallback scans a key's locales in
//! that order, so the first locale added for a key wins among same-language
//! candidates.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{I18nError, I18nResult};
use crate::locale::{TranslatedEntry, normalize_locale, sort_for_display};
use crate::version;

/// Translations of a single key, keyed by locale
pub type LocaleTexts = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStore {
    default_locale: String,
    table: IndexMap<String, LocaleTexts>,
}

impl TranslationStore {
    /// Create an empty store. The default locale is the one whose texts are
    /// the keys themselves.
    pub fn new(default_locale: &str) -> Self {
        TranslationStore {
            default_locale: normalize_locale(default_locale),
            table: IndexMap::new(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Insert or overwrite the text of `key` in `locale`.
    ///
    /// # Errors
    /// `InvalidFieldValue` if any argument is empty. The store is not modified.
    pub fn add(&mut self, locale: &str, key: &str, text: &str) -> I18nResult<()> {
        let locale = validated_locale(locale)?;
        check_not_empty("key", key)?;
        check_not_empty("text", text)?;
        self.insert(locale, key.to_string(), text.to_string());
        Ok(())
    }

    /// Add all translations of one locale at once (locale-indexed entry point).
    ///
    /// The texts land in the same table as `add`, so `get` and `by_locale`
    /// both see them. Nothing is inserted if any key or text is empty.
    pub fn add_locale_map(
        &mut self,
        locale: &str,
        texts: &IndexMap<String, String>,
    ) -> I18nResult<()> {
        let locale = validated_locale(locale)?;
        for (key, text) in texts {
            check_not_empty("key", key)?;
            check_not_empty("text", text)?;
        }
        for (key, text) in texts {
            self.insert(locale.clone(), key.clone(), text.clone());
        }
        Ok(())
    }

    /// Add one entry given as locale → text. The default locale's text, with
    /// any version encoding stripped, becomes the key.
    ///
    /// # Errors
    /// - `MissingDefaultTranslation` if the map has no text for the default locale
    /// - `InvalidFieldValue` for empty locales or texts
    pub fn add_entry(&mut self, translations: &IndexMap<String, String>) -> I18nResult<()> {
        let prepared = self.prepare_entry(translations)?;
        self.insert_prepared(prepared);
        Ok(())
    }

    /// Bulk form of [`add_entry`](Self::add_entry). Every entry is validated
    /// before the first one is inserted.
    pub fn union_from_base_locale_map<'a, I>(&mut self, entries: I) -> I18nResult<()>
    where
        I: IntoIterator<Item = &'a IndexMap<String, String>>,
    {
        let prepared = entries
            .into_iter()
            .map(|entry| self.prepare_entry(entry))
            .collect::<I18nResult<Vec<_>>>()?;
        for entry in prepared {
            self.insert_prepared(entry);
        }
        Ok(())
    }

    /// Union another store into this one. Cells present in both take the
    /// other store's text.
    ///
    /// # Errors
    /// `IncompatibleMerge` if the stores have different default locales.
    pub fn merge(&mut self, other: &TranslationStore) -> I18nResult<()> {
        if self.default_locale != other.default_locale {
            return Err(I18nError::IncompatibleMerge {
                left: self.default_locale.clone(),
                right: other.default_locale.clone(),
            });
        }
        for (key, texts) in &other.table {
            for (locale, text) in texts {
                self.insert(locale.clone(), key.clone(), text.clone());
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&LocaleTexts> {
        self.table.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every locale with at least one text, in first-seen order
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = Vec::new();
        for texts in self.table.values() {
            for locale in texts.keys() {
                if !locales.contains(&locale.as_str()) {
                    locales.push(locale);
                }
            }
        }
        locales
    }

    /// The table transposed to locale → key → text
    pub fn by_locale(&self) -> IndexMap<String, IndexMap<String, String>> {
        let mut view: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        for (key, texts) in &self.table {
            for (locale, text) in texts {
                view.entry(locale.clone())
                    .or_default()
                    .insert(key.clone(), text.clone());
            }
        }
        view
    }

    /// Translations of `key` in display order: default locale first, then the
    /// default's language, then the rest alphabetically.
    pub fn translated_entries(&self, key: &str) -> Vec<TranslatedEntry> {
        let mut entries: Vec<TranslatedEntry> = self
            .get(key)
            .map(|texts| {
                texts
                    .iter()
                    .map(|(locale, text)| TranslatedEntry::new(locale.as_str(), text.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        sort_for_display(&mut entries, &self.default_locale);
        entries
    }

    fn insert(&mut self, locale: String, key: String, text: String) {
        self.table.entry(key).or_default().insert(locale, text);
    }

    fn prepare_entry(&self, translations: &IndexMap<String, String>) -> I18nResult<PreparedEntry> {
        let mut key = None;
        let mut texts = Vec::with_capacity(translations.len());
        for (locale, text) in translations {
            let locale = validated_locale(locale)?;
            check_not_empty("text", text)?;
            if locale == self.default_locale {
                key = Some(version::base_text(text).to_string());
            }
            texts.push((locale, text.clone()));
        }

        let key = key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| I18nError::MissingDefaultTranslation {
                default_locale: self.default_locale.clone(),
                entry: format!("{:?}", translations),
            })?;
        Ok(PreparedEntry { key, texts })
    }

    fn insert_prepared(&mut self, entry: PreparedEntry) {
        for (locale, text) in entry.texts {
            self.insert(locale, entry.key.clone(), text);
        }
    }
}

struct PreparedEntry {
    key: String,
    texts: Vec<(String, String)>,
}

fn check_not_empty(field: &'static str, value: &str) -> I18nResult<()> {
    if value.is_empty() {
        Err(I18nError::InvalidFieldValue { field })
    } else {
        Ok(())
    }
}

fn validated_locale(locale: &str) -> I18nResult<String> {
    let locale = normalize_locale(locale);
    check_not_empty("locale", &locale)?;
    Ok(locale)
}

impl fmt::Display for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Translations (default locale: {})", self.default_locale)?;
        for key in self.table.keys() {
            writeln!(f, "  key: {:?}", key)?;
            for entry in self.translated_entries(key) {
                writeln!(f, "    {} → {:?}", entry.locale, entry.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionedText;

    fn entry(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(locale, text)| (locale.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn test_add_and_get() {
        let mut store = TranslationStore::new("en_US");
        store.add("en_us", "Hello", "Hello").unwrap();
        store.add("PT-BR", "Hello", "Olá").unwrap();

        assert_eq!(store.default_locale(), "en_us");
        let texts = store.get("Hello").unwrap();
        assert_eq!(texts["pt_br"], "Olá");
        assert_eq!(texts.len(), 2);
        assert!(store.get("Bye").is_none());
    }

    #[test]
    fn test_add_overwrites() {
        let mut store = TranslationStore::new("en");
        store.add("de", "Hello", "Hallo").unwrap();
        store.add("de", "Hello", "Servus").unwrap();
        assert_eq!(store.get("Hello").unwrap()["de"], "Servus");
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut store = TranslationStore::new("en");
        store.add("de", "Hello", "Hallo").unwrap();
        let before = store.clone();

        assert_eq!(
            store.add("", "Hello", "Hallo"),
            Err(I18nError::InvalidFieldValue { field: "locale" })
        );
        assert_eq!(
            store.add("de", "", "Hallo"),
            Err(I18nError::InvalidFieldValue { field: "key" })
        );
        assert_eq!(
            store.add("de", "Bye", ""),
            Err(I18nError::InvalidFieldValue { field: "text" })
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_merge_requires_same_default() {
        let mut en = TranslationStore::new("en");
        let es = TranslationStore::new("es");
        assert_eq!(
            en.merge(&es),
            Err(I18nError::IncompatibleMerge {
                left: "en".to_string(),
                right: "es".to_string(),
            })
        );
    }

    #[test]
    fn test_merge_unions_cells() {
        let mut left = TranslationStore::new("en");
        left.add("de", "Hello", "Hallo").unwrap();
        left.add("fr", "Hello", "Salut").unwrap();

        let mut right = TranslationStore::new("en");
        right.add("fr", "Hello", "Bonjour").unwrap();
        right.add("es", "Bye", "Adiós").unwrap();

        left.merge(&right).unwrap();
        assert_eq!(left.len(), 2);
        assert_eq!(left.get("Hello").unwrap()["de"], "Hallo");
        assert_eq!(left.get("Hello").unwrap()["fr"], "Bonjour");
        assert_eq!(left.get("Bye").unwrap()["es"], "Adiós");
    }

    #[test]
    fn test_union_from_base_locale_map() {
        let mut store = TranslationStore::new("en_us");
        let apples = VersionedText::new("%d apples").one("one apple").encode();
        let macas = VersionedText::new("%d maçãs").one("uma maçã").encode();

        store
            .union_from_base_locale_map(&[
                entry(&[("en_us", "Hi"), ("pt_br", "Oi")]),
                entry(&[("en_us", apples.as_str()), ("pt_br", macas.as_str())]),
            ])
            .unwrap();

        assert_eq!(store.get("Hi").unwrap()["pt_br"], "Oi");
        // Versioned default text is keyed by its base
        let texts = store.get("%d apples").unwrap();
        assert_eq!(texts["en_us"], apples);
        assert_eq!(texts["pt_br"], macas);
    }

    #[test]
    fn test_union_requires_default_translation() {
        let mut store = TranslationStore::new("en_us");
        let result = store.union_from_base_locale_map(&[
            entry(&[("en_us", "Hi"), ("pt_br", "Oi")]),
            entry(&[("pt_br", "Tchau")]),
        ]);

        assert!(matches!(
            result,
            Err(I18nError::MissingDefaultTranslation { .. })
        ));
        // Validated up front, so the first entry was not inserted either
        assert!(store.is_empty());
    }

    #[test]
    fn test_locale_view_shares_table() {
        let mut store = TranslationStore::new("en");
        store.add("en", "Hello", "Hello").unwrap();
        store
            .add_locale_map("de", &entry(&[("Hello", "Hallo"), ("Bye", "Tschüss")]))
            .unwrap();

        assert_eq!(store.get("Bye").unwrap()["de"], "Tschüss");

        let view = store.by_locale();
        assert_eq!(view["de"]["Hello"], "Hallo");
        assert_eq!(view["en"]["Hello"], "Hello");
        assert_eq!(view.len(), 2);
        assert_eq!(store.locales(), vec!["en", "de"]);
    }

    #[test]
    fn test_add_locale_map_rejects_empty_text() {
        let mut store = TranslationStore::new("en");
        let result = store.add_locale_map("de", &entry(&[("Hello", "Hallo"), ("Bye", "")]));
        assert_eq!(result, Err(I18nError::InvalidFieldValue { field: "text" }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_translated_entries_display_order() {
        let mut store = TranslationStore::new("en_us");
        store.add("pt_br", "Hello", "Olá").unwrap();
        store.add("en_gb", "Hello", "Hello there").unwrap();
        store.add("en_us", "Hello", "Hello").unwrap();
        store.add("de", "Hello", "Hallo").unwrap();

        let locales: Vec<String> = store
            .translated_entries("Hello")
            .into_iter()
            .map(|e| e.locale)
            .collect();
        assert_eq!(locales, vec!["en_us", "en_gb", "de", "pt_br"]);
        assert!(store.translated_entries("Missing").is_empty());
    }

    #[test]
    fn test_display() {
        let mut store = TranslationStore::new("en");
        store.add("en", "Hello", "Hello").unwrap();
        store.add("de", "Hello", "Hallo").unwrap();

        let rendered = store.to_string();
        assert!(rendered.contains("default locale: en"));
        assert!(rendered.contains("key: \"Hello\""));
        assert!(rendered.contains("de → \"Hallo\""));
    }
}

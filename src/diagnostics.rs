//! Bookkeeping of missing keys and missing translations
//!
//! The registry is an ordinary value owned by whoever composes the
//! application (usually inside a [`Resolver`](crate::Resolver)). It has no
//! internal locking and never prunes itself; call [`DiagnosticsRegistry::clear`]
//! between test cases.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::config::I18nConfig;

/// A failed lookup: `key` could not be found (or translated) in `locale`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingRecord {
    pub locale: String,
    pub key: String,
}

impl MissingRecord {
    pub fn new(locale: impl Into<String>, key: impl Into<String>) -> Self {
        MissingRecord {
            locale: locale.into(),
            key: key.into(),
        }
    }
}

/// Hook invoked for every miss
pub type MissingCallback = Box<dyn Fn(&MissingRecord)>;

/// Snapshot of the recorded misses, suitable for dumping as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub missing_keys: Vec<MissingRecord>,
    pub missing_translations: Vec<MissingRecord>,
}

pub struct DiagnosticsRegistry {
    missing_keys: IndexSet<MissingRecord>,
    missing_translations: IndexSet<MissingRecord>,
    record_missing_keys: bool,
    record_missing_translations: bool,
    missing_key_callback: MissingCallback,
    missing_translation_callback: MissingCallback,
}

fn log_missing_key(record: &MissingRecord) {
    tracing::warn!(
        locale = %record.locale,
        "Translation-key in '{}' is missing: {:?}",
        record.locale,
        record.key
    );
}

fn log_missing_translation(record: &MissingRecord) {
    tracing::warn!(
        locale = %record.locale,
        "There are no translations in '{}' for {:?}",
        record.locale,
        record.key
    );
}

impl Default for DiagnosticsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsRegistry {
    /// A registry recording both kinds of misses and logging them through `tracing`
    pub fn new() -> Self {
        DiagnosticsRegistry {
            missing_keys: IndexSet::new(),
            missing_translations: IndexSet::new(),
            record_missing_keys: true,
            record_missing_translations: true,
            missing_key_callback: Box::new(log_missing_key),
            missing_translation_callback: Box::new(log_missing_translation),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        let mut registry = Self::new();
        registry
            .with_record_missing_keys(config.record_missing_keys)
            .with_record_missing_translations(config.record_missing_translations);
        registry
    }

    pub fn with_record_missing_keys(&mut self, enabled: bool) -> &mut Self {
        self.record_missing_keys = enabled;
        self
    }

    pub fn with_record_missing_translations(&mut self, enabled: bool) -> &mut Self {
        self.record_missing_translations = enabled;
        self
    }

    pub fn records_missing_keys(&self) -> bool {
        self.record_missing_keys
    }

    pub fn records_missing_translations(&self) -> bool {
        self.record_missing_translations
    }

    /// Replace the hook called when a key is missing entirely
    pub fn set_missing_key_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&MissingRecord) + 'static,
    {
        self.missing_key_callback = Box::new(callback);
        self
    }

    /// Replace the hook called when a key exists but not in the requested locale
    pub fn set_missing_translation_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&MissingRecord) + 'static,
    {
        self.missing_translation_callback = Box::new(callback);
        self
    }

    /// Restore the logging hooks
    pub fn reset_callbacks(&mut self) -> &mut Self {
        self.missing_key_callback = Box::new(log_missing_key);
        self.missing_translation_callback = Box::new(log_missing_translation);
        self
    }

    /// Record that `key` does not exist in the table.
    ///
    /// The record is kept only when missing-key recording is enabled; the
    /// callback always runs.
    pub fn record_missing_key(&mut self, locale: &str, key: &str) {
        let record = MissingRecord::new(locale, key);
        (self.missing_key_callback)(&record);
        if self.record_missing_keys {
            self.missing_keys.insert(record);
        }
    }

    /// Record that `key` has no text in `locale`. Does nothing while
    /// missing-translation recording is disabled.
    pub fn record_missing_translation(&mut self, locale: &str, key: &str) {
        if !self.record_missing_translations {
            return;
        }
        let record = MissingRecord::new(locale, key);
        (self.missing_translation_callback)(&record);
        self.missing_translations.insert(record);
    }

    pub fn missing_keys(&self) -> &IndexSet<MissingRecord> {
        &self.missing_keys
    }

    pub fn missing_translations(&self) -> &IndexSet<MissingRecord> {
        &self.missing_translations
    }

    /// Forget every recorded miss. Flags and callbacks are kept.
    pub fn clear(&mut self) {
        self.missing_keys.clear();
        self.missing_translations.clear();
    }

    pub fn report(&self) -> DiagnosticsReport {
        DiagnosticsReport {
            missing_keys: self.missing_keys.iter().cloned().collect(),
            missing_translations: self.missing_translations.iter().cloned().collect(),
        }
    }
}

impl fmt::Debug for DiagnosticsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticsRegistry")
            .field("missing_keys", &self.missing_keys)
            .field("missing_translations", &self.missing_translations)
            .field("record_missing_keys", &self.record_missing_keys)
            .field("record_missing_translations", &self.record_missing_translations)
            .finish_non_exhaustive()
    }
}

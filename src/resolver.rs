//! Translation lookup with locale fallback
//!
//! A lookup for `key` in locale `pt_br` tries, in order:
//!
//! 1. the exact locale (`pt_br`)
//! 2. the general language (`pt`), when the locale has a region
//! 3. the first stored locale of the same language (`pt_pt`, `pt_mo`, ...),
//!    in the order the locales were added for that key
//! 4. the key itself
//!
//! A key that is not in the table at all resolves to itself. Neither case is
//! an error; both are recorded in the [`DiagnosticsRegistry`].

use crate::config::{I18nConfig, VerbosityLevel};
use crate::diagnostics::DiagnosticsRegistry;
use crate::error::{I18nError, I18nResult};
use crate::locale::{is_general, is_null_locale, language_of, normalize_locale};
use crate::plural::select_plural_variant;
use crate::store::TranslationStore;
use crate::version::{DecodedVersions, decode_all, decode_variant};

/// Source of the application's current locale
pub trait LocaleProvider {
    fn current_locale(&self) -> Option<String>;
}

impl<F> LocaleProvider for F
where
    F: Fn() -> Option<String>,
{
    fn current_locale(&self) -> Option<String> {
        self()
    }
}

/// Provider that never knows a locale; lookups use the store's default
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocale;

impl LocaleProvider for NoLocale {
    fn current_locale(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl LocaleProvider for FixedLocale {
    fn current_locale(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Fills positional parameters into a resolved text
pub trait ParamFormatter {
    fn format(&self, template: &str, args: &[String]) -> String;
}

impl<F> ParamFormatter for F
where
    F: Fn(&str, &[String]) -> String,
{
    fn format(&self, template: &str, args: &[String]) -> String {
        self(template, args)
    }
}

pub struct Resolver {
    provider: Box<dyn LocaleProvider>,
    diagnostics: DiagnosticsRegistry,
    verbosity: VerbosityLevel,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// A resolver without a current-locale provider
    pub fn new() -> Self {
        Resolver {
            provider: Box::new(NoLocale),
            diagnostics: DiagnosticsRegistry::new(),
            verbosity: VerbosityLevel::Normal,
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Resolver {
            provider: Box::new(NoLocale),
            diagnostics: DiagnosticsRegistry::from_config(config),
            verbosity: config.verbosity,
        }
    }

    pub fn with_provider(&mut self, provider: impl LocaleProvider + 'static) -> &mut Self {
        self.provider = Box::new(provider);
        self
    }

    pub fn with_verbosity(&mut self, verbosity: VerbosityLevel) -> &mut Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_diagnostics(&mut self, diagnostics: DiagnosticsRegistry) -> &mut Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn get_verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn diagnostics(&self) -> &DiagnosticsRegistry {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticsRegistry {
        &mut self.diagnostics
    }

    /// Record a missing key on behalf of the caller. `locale` defaults to
    /// the empty string.
    pub fn record_missing_key(&mut self, key: &str, locale: Option<&str>) {
        self.diagnostics.record_missing_key(locale.unwrap_or_default(), key);
    }

    /// Resolve `key` to the best available text.
    ///
    /// The locale is `requested_locale` if given, otherwise the provider's
    /// current locale, otherwise the store's default locale.
    ///
    /// # Errors
    /// `InvalidLocale` if the effective locale is the string `"null"`.
    pub fn resolve(
        &mut self,
        store: &TranslationStore,
        key: &str,
        requested_locale: Option<&str>,
    ) -> I18nResult<String> {
        let Some(texts) = store.get(key) else {
            self.diagnostics.record_missing_key(store.default_locale(), key);
            return Ok(key.to_string());
        };

        let Some(locale) = self.effective_locale(store, requested_locale) else {
            // Nothing to resolve against yet, e.g. during start-up
            return Ok(key.to_string());
        };
        if is_null_locale(&locale) {
            return Err(I18nError::InvalidLocale {
                key: key.to_string(),
            });
        }

        if let Some(text) = texts.get(&locale) {
            return Ok(text.clone());
        }

        if locale != store.default_locale() {
            self.diagnostics.record_missing_translation(&locale, key);
        }

        let language = language_of(&locale);
        if !is_general(&locale) {
            if let Some(text) = texts.get(language) {
                self.log_fallback(key, &locale, language);
                return Ok(text.clone());
            }
        }

        if let Some((found, text)) = texts
            .iter()
            .find(|(candidate, _)| language_of(candidate) == language)
        {
            self.log_fallback(key, &locale, found);
            return Ok(text.clone());
        }

        if self.verbosity >= VerbosityLevel::Verbose {
            tracing::debug!(
                "[i18n] No message found for {:?} in locale '{}' or language '{}'",
                key,
                locale,
                language
            );
        }
        Ok(key.to_string())
    }

    /// Resolve `key` and pick the plural variant for `count`, replacing `%d`
    /// with the count.
    pub fn resolve_plural(
        &mut self,
        store: &TranslationStore,
        key: &str,
        count: i64,
        requested_locale: Option<&str>,
    ) -> I18nResult<String> {
        let text = self.resolve(store, key, requested_locale)?;
        select_plural_variant(count, &decode_all(&text)?)
    }

    /// Resolve `key` and pick the variant labelled `modifier`
    pub fn resolve_version(
        &mut self,
        store: &TranslationStore,
        key: &str,
        modifier: &str,
        requested_locale: Option<&str>,
    ) -> I18nResult<String> {
        let text = self.resolve(store, key, requested_locale)?;
        decode_variant(&text, modifier)
    }

    /// Resolve `key` and return every variant, the base text under `None`
    pub fn resolve_all_versions(
        &mut self,
        store: &TranslationStore,
        key: &str,
        requested_locale: Option<&str>,
    ) -> I18nResult<DecodedVersions> {
        let text = self.resolve(store, key, requested_locale)?;
        decode_all(&text)
    }

    /// Resolve `key` and hand the text to `formatter` with `args`
    pub fn resolve_fill(
        &mut self,
        store: &TranslationStore,
        key: &str,
        requested_locale: Option<&str>,
        formatter: &dyn ParamFormatter,
        args: &[String],
    ) -> I18nResult<String> {
        let text = self.resolve(store, key, requested_locale)?;
        Ok(formatter.format(&text, args))
    }

    fn effective_locale(
        &self,
        store: &TranslationStore,
        requested_locale: Option<&str>,
    ) -> Option<String> {
        let locale = match requested_locale {
            Some(locale) => normalize_locale(locale),
            None => match self.provider.current_locale() {
                Some(locale) => normalize_locale(&locale),
                None => store.default_locale().to_string(),
            },
        };
        if locale.is_empty() { None } else { Some(locale) }
    }

    fn log_fallback(&self, key: &str, requested: &str, used: &str) {
        if self.verbosity >= VerbosityLevel::Normal {
            tracing::debug!(
                "[i18n] Fallback: Using message {:?} from locale '{}' (requested: '{}')",
                key,
                used,
                requested
            );
        }
        if self.verbosity >= VerbosityLevel::Verbose {
            tracing::trace!(
                "[i18n] Fallback chain: {} -> {} -> same language -> key",
                requested,
                language_of(requested)
            );
        }
    }
}

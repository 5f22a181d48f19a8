//! Runtime translation lookup with locale fallback and versioned texts
//!
//! Translations live in a [`TranslationStore`], keyed by the text in the
//! default locale. A [`Resolver`] looks keys up, falling back from a regional
//! locale to its language and then to any region of the same language. Texts
//! may carry several variants (plural forms or custom modifiers) built with
//! [`VersionedText`].
//!
//! ```
//! use versioned_i18n::{Resolver, TranslationStore, VersionedText, VerbosityLevel};
//!
//! let mut store = TranslationStore::new("en_us");
//! store.add("pt", "Hello", "Olá").unwrap();
//! store
//!     .add(
//!         "pt_br",
//!         "%d apples",
//!         &VersionedText::new("%d maçãs").one("uma maçã").encode(),
//!     )
//!     .unwrap();
//!
//! let mut resolver = Resolver::new();
//! resolver.with_verbosity(VerbosityLevel::Silent);
//!
//! assert_eq!(resolver.resolve(&store, "Hello", Some("pt_br")).unwrap(), "Olá");
//! assert_eq!(
//!     resolver.resolve_plural(&store, "%d apples", 3, Some("pt_br")).unwrap(),
//!     "3 maçãs"
//! );
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod locale;
pub mod plural;
pub mod resolver;
pub mod store;
pub mod version;


pub use config::{I18nConfig, VerbosityLevel};
pub use diagnostics::{DiagnosticsRegistry, DiagnosticsReport, MissingCallback, MissingRecord};
pub use error::{I18nError, I18nResult};
pub use locale::{TranslatedEntry, compose_locale, is_general, language_of, normalize_locale};
pub use plural::select_plural_variant;
pub use resolver::{FixedLocale, LocaleProvider, NoLocale, ParamFormatter, Resolver};
pub use store::{LocaleTexts, TranslationStore};
pub use version::{DecodedVersions, VersionedText, decode_all, decode_variant, is_versioned};

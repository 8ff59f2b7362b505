//! glossa message resolution
//!
//! Resolves `domain:key` identifiers against per-locale catalogs:
//! - Catalogs come from pluggable [`DomainLoader`]s (files, memory, layered, cached).
//! - Templates separated by `|` are plural variants, selected by explicit
//!   numeric rules (`{0}`, `]0,10[`, `[11,Inf]`) or by the locale's CLDR
//!   plural category.
//! - Named arguments are substituted in one pass using a pluggable
//!   placeholder convention (`%name%` by default, or `:name`).
//!
//! Missing keys degrade to the identifier itself; loader and cache faults
//! degrade to "not found". Nothing on the translation path returns an error.

mod cache;
mod catalog;
mod error;
mod interval;
mod loader;
mod locale;
mod message;
mod params;
mod plural;
mod provider;
mod rules;
mod store;
mod translator;

pub use cache::{CacheStore, MemoryCache};
pub use catalog::{Catalog, CatalogNode};
pub use error::{CacheError, CatalogError, IntervalError};
pub use interval::{parse_condition, Condition, Interval};
pub use loader::{CachedLoader, DomainLoader, FileLoader, MemoryLoader, MultiLoader};
pub use locale::{normalize_locale, plural_language};
pub use message::{ArgValue, Message};
pub use params::{substitute, ParameterWrapper, WrapStyle};
pub use plural::{category_count, plural_category, CldrPluralization, Pluralization};
pub use provider::{CatalogProvider, TranslationProvider};
pub use rules::{PluralRule, RuleKind, RuleSet, VARIANT_SEPARATOR};
pub use store::DomainMessages;
pub use translator::{
    split_identifier, Translator, COUNT_PARAMETER, DEFAULT_DOMAIN, SEPARATOR_PARAMETER,
};

/// Convenience macro for building a [`Message`].
///
/// Examples:
/// - `t!("app:title")`
/// - `t!("app:comments", { count: 3, user: name })`
#[macro_export]
macro_rules! t {
    ($id:literal) => {
        $crate::Message::new($id)
    };
    ($id:literal, { $($name:ident : $value:expr),* $(,)? }) => {{
        let mut m = $crate::Message::new($id);
        $(
            m = m.arg(stringify!($name), $value);
        )*
        m
    }};
}

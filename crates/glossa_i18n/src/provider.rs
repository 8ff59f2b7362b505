use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::loader::DomainLoader;
use crate::plural::{CldrPluralization, Pluralization};
use crate::store::DomainMessages;

/// Resolves a message key to a template.
pub trait TranslationProvider: Send + Sync {
    /// Template for `key` in `(domain, locale)`, with a plural variant chosen
    /// when `number` is given. `None` means the key is unknown.
    fn get(&self, key: &str, domain: &str, locale: &str, number: Option<f64>) -> Option<String>;
}

impl<P: TranslationProvider + ?Sized> TranslationProvider for Arc<P> {
    fn get(&self, key: &str, domain: &str, locale: &str, number: Option<f64>) -> Option<String> {
        (**self).get(key, domain, locale, number)
    }
}

/// Provider backed by a [`DomainLoader`].
///
/// Each `(domain, locale)` pair is loaded, flattened and compiled on first
/// use and kept for the lifetime of the provider. Concurrent first lookups
/// of a pair load it once; lookups of loaded pairs only take a read lock.
pub struct CatalogProvider {
    loader: Box<dyn DomainLoader>,
    pluralization: Box<dyn Pluralization>,
    domains: RwLock<HashMap<(String, String), Arc<DomainMessages>>>,
    loading: Mutex<()>,
}

impl CatalogProvider {
    /// A provider using the built-in CLDR plural rules.
    pub fn new(loader: impl DomainLoader + 'static) -> Self {
        Self::with_pluralization(loader, CldrPluralization)
    }

    pub fn with_pluralization(
        loader: impl DomainLoader + 'static,
        pluralization: impl Pluralization + 'static,
    ) -> Self {
        Self {
            loader: Box::new(loader),
            pluralization: Box::new(pluralization),
            domains: RwLock::new(HashMap::new()),
            loading: Mutex::new(()),
        }
    }

    /// Whether `(domain, locale)` has been loaded already.
    pub fn is_loaded(&self, domain: &str, locale: &str) -> bool {
        self.cached(domain, locale).is_some()
    }

    fn cached(&self, domain: &str, locale: &str) -> Option<Arc<DomainMessages>> {
        let domains = self.domains.read().unwrap_or_else(PoisonError::into_inner);
        domains
            .get(&(domain.to_string(), locale.to_string()))
            .cloned()
    }

    /// Messages of `(domain, locale)`, loading them on first use.
    pub fn domain(&self, domain: &str, locale: &str) -> Arc<DomainMessages> {
        if let Some(messages) = self.cached(domain, locale) {
            return messages;
        }

        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(messages) = self.cached(domain, locale) {
            return messages;
        }

        let catalog = self.loader.load(domain, locale).unwrap_or_else(|e| {
            warn!(domain, locale, error = %e, "failed to load catalog");
            Catalog::new()
        });
        let messages = Arc::new(DomainMessages::from_catalog(&catalog));
        debug!(domain, locale, messages = messages.len(), "loaded catalog");

        self.domains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((domain.to_string(), locale.to_string()), messages.clone());
        messages
    }
}

impl TranslationProvider for CatalogProvider {
    fn get(&self, key: &str, domain: &str, locale: &str, number: Option<f64>) -> Option<String> {
        self.domain(domain, locale)
            .get(key, number, locale, self.pluralization.as_ref())
            .map(str::to_string)
    }
}

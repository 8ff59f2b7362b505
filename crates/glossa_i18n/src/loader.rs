//! Catalog sources.
//!
//! Loaders return an empty catalog for data that does not exist and reserve
//! errors for data that exists but cannot be used.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::catalog::Catalog;
use crate::error::CatalogError;

/// Source of raw catalogs keyed by `(domain, locale)`.
pub trait DomainLoader: Send + Sync {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError>;
}

impl<L: DomainLoader + ?Sized> DomainLoader for Arc<L> {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        (**self).load(domain, locale)
    }
}

impl<L: DomainLoader + ?Sized> DomainLoader for Box<L> {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        (**self).load(domain, locale)
    }
}

/// Reads `<dir>/<domain>/<locale><extension>` files.
///
/// `.yaml`/`.yml` files are parsed as YAML and `.json` files as JSON.
#[derive(Clone, Debug)]
pub struct FileLoader {
    dir: PathBuf,
    extension: String,
}

impl FileLoader {
    pub const DEFAULT_EXTENSION: &'static str = ".yaml";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, Self::DEFAULT_EXTENSION)
    }

    pub fn with_extension(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let mut extension = extension.into();
        if !extension.is_empty() && !extension.starts_with('.') {
            extension.insert(0, '.');
        }
        Self {
            dir: dir.into(),
            extension,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self, domain: &str, locale: &str) -> PathBuf {
        self.dir
            .join(domain)
            .join(format!("{locale}{}", self.extension))
    }

    fn parse(&self, path: &Path, src: &str) -> Result<Catalog, CatalogError> {
        let invalid = |msg: String| CatalogError::Invalid {
            path: path.to_path_buf(),
            msg,
        };
        match self.extension.as_str() {
            #[cfg(feature = "json")]
            ".json" => {
                let value: serde_json::Value =
                    serde_json::from_str(src).map_err(|source| CatalogError::Json {
                        path: path.to_path_buf(),
                        source,
                    })?;
                crate::catalog::json::to_catalog(&value).map_err(invalid)
            }
            #[cfg(feature = "yaml")]
            ".yaml" | ".yml" => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(src).map_err(|source| CatalogError::Yaml {
                        path: path.to_path_buf(),
                        source,
                    })?;
                crate::catalog::yaml::to_catalog(&value).map_err(invalid)
            }
            other => Err(invalid(format!("unsupported catalog extension `{other}`"))),
        }
    }
}

impl DomainLoader for FileLoader {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        let path = self.file_name(domain, locale);
        let src = match fs::read_to_string(&path) {
            Ok(src) => src,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                ) =>
            {
                debug!(path = %path.display(), "no catalog file");
                return Ok(Catalog::new());
            }
            Err(source) => return Err(CatalogError::Io { path, source }),
        };
        self.parse(&path, &src)
    }
}

/// Catalogs held in memory.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    catalogs: RwLock<HashMap<(String, String), Catalog>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the catalog for `(domain, locale)`.
    pub fn insert(&self, domain: impl Into<String>, locale: impl Into<String>, catalog: Catalog) {
        let mut catalogs = self
            .catalogs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        catalogs.insert((domain.into(), locale.into()), catalog);
    }

    pub fn with(
        self,
        domain: impl Into<String>,
        locale: impl Into<String>,
        catalog: Catalog,
    ) -> Self {
        self.insert(domain, locale, catalog);
        self
    }
}

impl DomainLoader for MemoryLoader {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        let catalogs = self
            .catalogs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(catalogs
            .get(&(domain.to_string(), locale.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Layers several loaders; later loaders override top-level keys of earlier ones.
pub struct MultiLoader {
    loaders: Vec<Arc<dyn DomainLoader>>,
}

impl MultiLoader {
    pub fn new(loader: Arc<dyn DomainLoader>) -> Self {
        Self {
            loaders: vec![loader],
        }
    }

    /// Append a loader. A loader already present (same allocation) is ignored.
    pub fn add_loader(&mut self, loader: Arc<dyn DomainLoader>) -> &mut Self {
        if !self.loaders.iter().any(|l| same_loader(l, &loader)) {
            self.loaders.push(loader);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

fn same_loader(a: &Arc<dyn DomainLoader>, b: &Arc<dyn DomainLoader>) -> bool {
    // Data pointers only; vtable pointers may differ across codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl DomainLoader for MultiLoader {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        let mut result = Catalog::new();
        for loader in &self.loaders {
            match loader.load(domain, locale) {
                Ok(catalog) => result.replace_from(catalog),
                Err(e) => warn!(domain, locale, error = %e, "skipping failed catalog layer"),
            }
        }
        Ok(result)
    }
}

/// Keeps raw catalogs of an inner loader in a [`CacheStore`].
///
/// Entries are stored under `prefix + domain + "_" + locale`. Cache failures
/// never reach the caller: a failed read is a miss and a failed write is
/// dropped.
pub struct CachedLoader<L> {
    loader: L,
    cache: Arc<dyn CacheStore>,
    prefix: String,
    ttl: Option<Duration>,
}

impl<L: DomainLoader> CachedLoader<L> {
    pub fn new(loader: L, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            loader,
            cache,
            prefix: String::new(),
            ttl: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn key(&self, domain: &str, locale: &str) -> String {
        format!("{}{domain}_{locale}", self.prefix)
    }
}

impl<L: DomainLoader> DomainLoader for CachedLoader<L> {
    fn load(&self, domain: &str, locale: &str) -> Result<Catalog, CatalogError> {
        let key = self.key(domain, locale);
        match self.cache.get(&key) {
            Ok(Some(catalog)) if !catalog.is_empty() => return Ok(catalog),
            Ok(_) => {}
            Err(e) => warn!(key = %key, error = %e, "catalog cache read failed"),
        }

        let catalog = self.loader.load(domain, locale)?;
        if let Err(e) = self.cache.set(&key, &catalog, self.ttl) {
            warn!(key = %key, error = %e, "catalog cache write failed");
        }
        Ok(catalog)
    }
}

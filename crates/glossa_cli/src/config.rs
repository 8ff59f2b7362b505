//! glossa configuration file handling

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use glossa_i18n::{
    CachedLoader, CatalogProvider, DomainLoader, FileLoader, MemoryCache, MultiLoader,
    Translator, WrapStyle,
};

pub const CONFIG_FILE_NAME: &str = "glossa.toml";

/// Top-level glossa configuration (glossa.toml)
#[derive(Debug, Default, Deserialize)]
pub struct GlossaConfig {
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Translator defaults
#[derive(Debug, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Placeholder convention: `percent` (`%name%`) or `colon` (`:name`)
    #[serde(default = "default_wrapper")]
    pub wrapper: String,
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_wrapper() -> String {
    "percent".to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            wrapper: default_wrapper(),
        }
    }
}

/// Catalog directories
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Layered in order; later directories override earlier ones
    #[serde(default = "default_dirs")]
    pub dirs: Vec<PathBuf>,
    /// Catalog file extension (`.yaml`, `.yml` or `.json`)
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("i18n")]
}

fn default_extension() -> String {
    FileLoader::DEFAULT_EXTENSION.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dirs: default_dirs(),
            extension: default_extension(),
        }
    }
}

/// In-process catalog cache
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

fn default_capacity() -> usize {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: default_capacity(),
            prefix: String::new(),
            ttl_secs: None,
        }
    }
}

impl GlossaConfig {
    /// Load configuration from a file or a directory containing glossa.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load glossa.toml from the working directory, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE_NAME).exists() => Self::load(Path::new(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: GlossaConfig = toml::from_str(content)?;
        Ok(config)
    }

    fn loader(&self) -> Result<Box<dyn DomainLoader>> {
        let mut dirs = self.catalog.dirs.iter();
        let Some(first) = dirs.next() else {
            anyhow::bail!("No catalog directories configured");
        };
        let file_loader = |dir: &PathBuf| -> Arc<dyn DomainLoader> {
            Arc::new(FileLoader::with_extension(dir, self.catalog.extension.as_str()))
        };

        let mut layers = MultiLoader::new(file_loader(first));
        for dir in dirs {
            layers.add_loader(file_loader(dir));
        }

        if !self.cache.enabled {
            return Ok(Box::new(layers));
        }
        let mut cached = CachedLoader::new(layers, Arc::new(MemoryCache::new(self.cache.capacity)))
            .with_prefix(self.cache.prefix.as_str());
        if let Some(secs) = self.cache.ttl_secs {
            cached = cached.with_ttl(Duration::from_secs(secs));
        }
        Ok(Box::new(cached))
    }

    /// Build a translator from this configuration
    pub fn translator(&self) -> Result<Translator> {
        let wrapper: WrapStyle = self
            .translator
            .wrapper
            .parse()
            .map_err(anyhow::Error::msg)?;
        let provider = CatalogProvider::new(self.loader()?);
        Ok(Translator::with_wrapper(
            &self.translator.default_locale,
            provider,
            wrapper,
        ))
    }
}

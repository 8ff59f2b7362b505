use std::path::PathBuf;

use thiserror::Error;

/// A catalog record could not be read or does not have a usable shape.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "yaml")]
    #[error("yaml catalog error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[cfg(feature = "json")]
    #[error("json catalog error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog {}: {msg}", path.display())]
    Invalid { path: PathBuf, msg: String },
}

/// Failure reported by a [`CacheStore`](crate::CacheStore) backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache lock poisoned")]
    Poisoned,
}

/// Why a plural fragment does not start with an explicit rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("fragment has no explicit rule prefix")]
    NoPrefix,

    #[error("malformed rule prefix at byte {offset}: {msg}")]
    Malformed { offset: usize, msg: &'static str },
}

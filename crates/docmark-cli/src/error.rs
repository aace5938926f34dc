//! CLI error types.

use std::path::PathBuf;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    /// Explicit config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Document store error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),
    /// Empty, absolute, or escaping the store root.
    #[error("Invalid page path: {0}")]
    InvalidPath(String),
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether another attempt could succeed.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Top-level CLI error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("failed to read '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

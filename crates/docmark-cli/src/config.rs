//! Configuration for the `docmark` binary.
//!
//! Settings come from an optional `docmark.toml`, discovered in the current
//! directory or any parent, with command-line flags applied on top:
//!
//! ```toml
//! [store]
//! root = "data/pages"   # relative to the config file
//! attempts = 3
//! backoff_ms = 1000
//!
//! [render]
//! diagram_lang = "scratch"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use docmark_core::render::DEFAULT_DIAGRAM_LANG;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::store::RetryPolicy;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmark.toml";

/// Command-line values that override the configuration file.
#[derive(Debug, Default)]
pub(crate) struct CliSettings {
    pub root: Option<PathBuf>,
    pub diagram_lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub store: StoreConfig,
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Where pages live and how hard to try reading them.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StoreConfig {
    pub root: PathBuf,
    /// Total read attempts per page, including the first.
    pub attempts: u32,
    /// Delay before the first retry; each further retry waits one more unit.
    pub backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data").join("pages"),
            attempts: 3,
            backoff_ms: 1000,
        }
    }
}

impl StoreConfig {
    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RenderConfig {
    /// Fence tag routed to the diagram renderer.
    pub diagram_lang: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            diagram_lang: DEFAULT_DIAGRAM_LANG.to_owned(),
        }
    }
}

impl Config {
    /// Load configuration, then apply `cli_settings`.
    ///
    /// An explicit `config_path` must exist. Without one, `docmark.toml` is
    /// searched for upward from the current directory, and defaults are used
    /// when none is found.
    pub(crate) fn load(
        config_path: Option<&Path>,
        cli_settings: &CliSettings,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.apply_cli_settings(cli_settings);
        config.validate()?;
        tracing::debug!(
            file = ?config.config_path,
            root = %config.store.root.display(),
            diagram_lang = %config.render.diagram_lang,
            "configuration ready"
        );
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.store.root.clone_from(root);
        }
        if let Some(lang) = &settings.diagram_lang {
            self.render.diagram_lang.clone_from(lang);
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        if config.store.root.is_relative() {
            let config_dir = path.parent().unwrap_or(Path::new("."));
            config.store.root = config_dir.join(&config.store.root);
        }
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.store.attempts == 0 {
            return Err(ConfigError::Validation(
                "store.attempts must be at least 1".into(),
            ));
        }

        // A fence tag is a run of word characters; anything else never matches.
        let lang = &self.render.diagram_lang;
        if lang.is_empty() || !lang.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(ConfigError::Validation(format!(
                "render.diagram_lang must be a non-empty word, got {lang:?}"
            )));
        }

        Ok(())
    }
}

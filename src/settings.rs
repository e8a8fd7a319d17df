use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Settings file read by `catalog-check` when present.
pub const DEFAULT_SETTINGS_PATH: &str = "config/catalog.yaml";

/// Configuration options for the catalog checker.
///
/// Values come from the YAML settings file, overridden by `CATALOG__*`
/// environment variables (e.g. `CATALOG__STRICT=true`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Catalog document to check when no path is given on the command line.
    #[serde(default)]
    pub document: Option<PathBuf>,
    /// Exit with a failure status when any finding is reported.
    #[serde(default)]
    pub strict: bool,
    /// Default `env_logger` filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document: None,
            strict: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the YAML file at `path` (optional) and the environment.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::new(path, FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix("CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

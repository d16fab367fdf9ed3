use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;
use barter_core::SearchMode;
use common::numeric_kernel::RATE_EPSILON;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchModeSetting {
    Best,
    First,
}

impl From<SearchModeSetting> for SearchMode {
    fn from(setting: SearchModeSetting) -> Self {
        match setting {
            SearchModeSetting::Best => SearchMode::Best,
            SearchModeSetting::First => SearchMode::First,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub mode: SearchModeSetting,
    pub epsilon: f64,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WriterConfig {
    pub output_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub total_products: usize,
    pub quotes: usize,
    pub rate_fluctuation_bps: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub writer: WriterConfig,
    pub simulator: SimulatorConfig,
}

/// Loads `crates/executor/Config.toml` relative to the current directory,
/// overlaid with `EXECUTOR_*` environment variables.
///
/// When the file is missing the built-in defaults are used instead, so the
/// binary also runs outside the workspace.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");

    if !config_file_path.exists() {
        tracing::warn!(
            "No configuration file at {}, using defaults.",
            config_file_path.display()
        );
        return build(None);
    }

    load_config_from(&config_file_path)
}

/// Loads configuration from an explicit TOML file plus the environment.
///
/// Nested keys use a double underscore after the prefix, e.g.
/// `EXECUTOR_SEARCH__TIMEOUT_MS=250`.
pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            path.display()
        )));
    }

    build(Some(path))
}

fn build(path: Option<&Path>) -> Result<Config, Error> {
    let mut builder = with_defaults(ConfigLoader::builder())
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let s = builder
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    let epsilon = app_config.search.epsilon;
    if epsilon.is_nan() || epsilon < 0.0 {
        return Err(Error::ConfigLoadError(format!(
            "search.epsilon must be non-negative, got {}",
            epsilon
        )));
    }

    Ok(app_config)
}

/// Values used for any key that neither the file nor the environment sets.
fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("search.mode", "best")?
        .set_default("search.epsilon", RATE_EPSILON)?
        .set_default("search.timeout_ms", 5_000)?
        .set_default("writer.output_path", "output.txt")?
        .set_default("simulator.total_products", 8)?
        .set_default("simulator.quotes", 24)?
        .set_default("simulator.rate_fluctuation_bps", 50.0)
}

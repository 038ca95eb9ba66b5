// src/config.rs

//! Configuration loading utilities.
//!
//! Both binaries read the same TOML file and then let `RENTAL_*`
//! environment variables override deployment-specific values.

use std::path::Path;

use crate::models::Config;

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// A configuration plus the problems met while loading it.
///
/// Loading happens before any logger is installed, so problems are kept
/// here and reported through [`LoadedConfig::log_warnings`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
    }
}

/// Load configuration from a TOML file plus environment overrides.
///
/// Falls back to defaults if the file cannot be read or parsed. The result
/// is not validated; call [`Config::validate`] before serving.
pub fn load_config(path: &Path) -> LoadedConfig {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit variable lookup.
pub fn load_config_with<F>(path: &Path, lookup: F) -> LoadedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let mut config = Config::load(path).unwrap_or_else(|e| {
        warnings.push(format!(
            "Config load failed from {}: {}. Using defaults.",
            path.display(),
            e
        ));
        Config::default()
    });
    warnings.extend(config.apply_overrides(lookup));

    LoadedConfig { config, warnings }
}

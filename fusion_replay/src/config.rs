// fusion_replay/src/config.rs

//! Loading the effective configuration: built-in defaults, then an optional
//! TOML file, then `FUSION_`-prefixed environment variables.

use crate::simulation::SimulationConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use fusion_core::config::FilterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Environment variables with this prefix override file values.
/// Nested keys use `__`, e.g. `FUSION_FILTER__NOISE_AX=4`.
pub const ENV_PREFIX: &str = "FUSION_";

/// Configuration sections reachable from the environment. Other `FUSION_*`
/// variables are ignored.
const ENV_SECTIONS: [&str; 2] = ["filter__", "simulation__"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    Missing(PathBuf),

    #[error(transparent)]
    Figment(#[from] figment::Error),

    #[error("cannot render configuration as TOML: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Root of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ReplayConfig {
    #[serde(default)] // Use default if the [filter] section is missing
    pub filter: FilterConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ReplayConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ReplayConfig::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            info!("Loading configuration from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let config = figment.merge(env_provider()).extract()?;
        Ok(config)
    }

    /// Parses a TOML document layered over the defaults. No environment.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(ReplayConfig::default()))
            .merge(Toml::string(text))
            .extract()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS.iter().any(|section| key.starts_with(section))
        })
        .split("__")
}

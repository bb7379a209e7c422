//! Configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `MYTHROLL_*` environment variables (nested keys split on `__`,
//! e.g. `MYTHROLL_JUDGMENT__MAX_CHAIN_DEPTH=16`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::judgment::JudgmentConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MYTHROLL_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP API listens on
    pub bind_addr: SocketAddr,
    /// Fixed seed for reproducible rolls (fresh entropy when unset)
    pub seed: Option<u64>,
    /// Judgment resolver limits
    pub judgment: JudgmentConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            seed: None,
            judgment: JudgmentConfig::default(),
        }
    }
}

impl Settings {
    /// Build the provider stack for an optional config file
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings, failing if an explicitly named file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }

        Ok(Self::figment(path).extract()?)
    }
}

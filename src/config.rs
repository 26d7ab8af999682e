//! # Predicate Configuration
//!
//! Settings are resolved once at startup and passed by value into every
//! predicate build. Precedence, highest first:
//!
//! 1. Environment variables (`KEYSET_WRAP_TOP_LEVEL_OR`)
//! 2. Config file (`KEYSET_CONFIG_PATH`, or `keyset.toml` in the working directory)
//! 3. Default values
//!
//! ```rust
//! use keyset_core::config::PredicateConfig;
//!
//! let config = PredicateConfig::default();
//! assert!(config.wrap_top_level_or);
//! ```

use crate::constants::{env, DEFAULT_CONFIG_FILE};
use crate::error::{KeysetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateConfig {
    /// Prepend a non-strict inequality on the leading sort column so that
    /// planners can seek an index; the exact predicate is kept in parentheses
    pub wrap_top_level_or: bool,
}

impl Default for PredicateConfig {
    fn default() -> Self {
        Self {
            wrap_top_level_or: true,
        }
    }
}

impl PredicateConfig {
    pub fn with_wrap_top_level_or(mut self, enabled: bool) -> Self {
        self.wrap_top_level_or = enabled;
        self
    }

    /// Defaults overridden by environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(env::WRAP_TOP_LEVEL_OR) {
            config.wrap_top_level_or = parse_flag(&value).ok_or_else(|| {
                KeysetError::Configuration {
                    message: format!("Invalid {}: {value}", env::WRAP_TOP_LEVEL_OR),
                }
            })?;
        }

        Ok(config)
    }

    /// Load from the config file named by `KEYSET_CONFIG_PATH` (or the default
    /// file when present) and the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(env::CONFIG_PATH).ok().map(PathBuf::from);
        Self::load_from_path(path.as_deref())
    }

    /// Load with an explicit config file. A given path must exist; without
    /// one the default file is optional.
    pub fn load_from_path(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config: Self = ::config::Config::builder()
            .set_default("wrap_top_level_or", defaults.wrap_top_level_or)?
            .add_source(file)
            .add_source(::config::Environment::with_prefix(env::CONFIG_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        debug!(
            wrap_top_level_or = config.wrap_top_level_or,
            config_file = ?path,
            "Predicate configuration loaded"
        );

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

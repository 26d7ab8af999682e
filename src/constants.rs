//! # Keyset Constants
//!
//! SQL tokens and environment variable names shared across the crate.

/// SQL tokens emitted by the predicate builder
pub mod sql {
    /// Placeholder for a single positional parameter
    pub const PLACEHOLDER: char = '?';

    /// Rendering of the always-false predicate
    pub const ALWAYS_FALSE: &str = "1=0";

    /// Rendering of an empty list parameter once expanded
    pub const EMPTY_LIST: &str = "NULL";

    pub const AND: &str = " AND ";
    pub const OR: &str = " OR ";
}

/// Environment variables read by configuration and logging
pub mod env {
    /// Prefix for configuration overrides (`KEYSET_WRAP_TOP_LEVEL_OR`, ...)
    pub const CONFIG_PREFIX: &str = "KEYSET";

    pub const WRAP_TOP_LEVEL_OR: &str = "KEYSET_WRAP_TOP_LEVEL_OR";

    /// Explicit path to a configuration file
    pub const CONFIG_PATH: &str = "KEYSET_CONFIG_PATH";

    /// Deployment environment (`development`, `test`, `production`)
    pub const ENVIRONMENT: &str = "KEYSET_ENV";

    /// `json` switches log output to JSON lines
    pub const LOG_FORMAT: &str = "KEYSET_LOG_FORMAT";
}

/// Configuration file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "keyset.toml";

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Pixtrace search core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use pixtrace_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("log level: {}", config.service.log_level);
//! ```

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PixtraceConfig;

use pixtrace_core::error::PixtraceError;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<PixtraceConfig, PixtraceError> {
    let config = loader::load_config().map_err(|e| PixtraceError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Post-deserialization checks Figment cannot express.
pub fn validate(config: &PixtraceConfig) -> Result<(), PixtraceError> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.service.log_level.as_str()) {
        return Err(PixtraceError::Config(format!(
            "service.log_level must be one of {LEVELS:?}, got {:?}",
            config.service.log_level
        )));
    }
    if config.search.request_deadline_secs == 0 {
        return Err(PixtraceError::Config(
            "search.request_deadline_secs must be positive".to_string(),
        ));
    }
    if config.search.default_engine_timeout_secs == 0 {
        return Err(PixtraceError::Config(
            "search.default_engine_timeout_secs must be positive".to_string(),
        ));
    }
    if config.search.auto_disable_threshold == 0 {
        return Err(PixtraceError::Config(
            "search.auto_disable_threshold must be positive".to_string(),
        ));
    }
    Ok(())
}

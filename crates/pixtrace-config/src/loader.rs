// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pixtrace.toml` > `~/.config/pixtrace/pixtrace.toml`
//! > `/etc/pixtrace/pixtrace.toml` with environment variable overrides via the
//! `PIXTRACE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PixtraceConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pixtrace/pixtrace.toml` (system-wide)
/// 3. `~/.config/pixtrace/pixtrace.toml` (user XDG config)
/// 4. `./pixtrace.toml` (local directory)
/// 5. `PIXTRACE_*` environment variables
pub fn load_config() -> Result<PixtraceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PixtraceConfig::default()))
        .merge(Toml::file("/etc/pixtrace/pixtrace.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pixtrace/pixtrace.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pixtrace.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PixtraceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PixtraceConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PixtraceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PixtraceConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PIXTRACE_SERVICE_LOG_LEVEL` must map to
/// `service.log_level`, not `service.log.level`.
fn env_provider() -> Env {
    Env::prefixed("PIXTRACE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PIXTRACE_SEARCH_REQUEST_DEADLINE_SECS -> "search_request_deadline_secs"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("search_", "search.", 1)
            .replacen("media_", "media.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pixtrace_core::types::EngineId;

    #[test]
    fn defaults_when_config_empty() {
        let config = load_config_from_str("").expect("empty config should load");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.search.request_deadline_secs, 60);
        assert_eq!(config.search.auto_disable_threshold, 5);
        assert_eq!(config.media.max_media_bytes, 20 * 1024 * 1024);
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [service]
            log_level = "debug"

            [search]
            request_deadline_secs = 90

            [search.engine_timeout_secs]
            sauce_nao = 45
            "#,
        )
        .expect("valid config should load");
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.search.request_deadline(), Duration::from_secs(90));
        assert_eq!(
            config
                .search
                .engine_budget(EngineId::SauceNao, Some(Duration::from_secs(30))),
            Duration::from_secs(45)
        );
        assert_eq!(
            config
                .search
                .engine_budget(EngineId::Iqdb, Some(Duration::from_secs(30))),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn default_engine_timeout_backstops_unset_budgets() {
        let config = load_config_from_str(
            r#"
            [search]
            default_engine_timeout_secs = 7
            "#,
        )
        .expect("valid config should load");
        // No override and no descriptor budget: the configured default wins.
        assert_eq!(
            config.search.engine_budget(EngineId::Iqdb, None),
            Duration::from_secs(7)
        );
        // A descriptor budget still beats the configured default.
        assert_eq!(
            config
                .search
                .engine_budget(EngineId::SauceNao, Some(Duration::from_secs(45))),
            Duration::from_secs(45)
        );
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = load_config_from_str(
            r#"
            [search]
            request_dedline_secs = 90
            "#,
        );
        assert!(result.is_err(), "typoed key should be rejected");
    }

    #[test]
    fn env_keys_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PIXTRACE_SERVICE_LOG_LEVEL", "trace");
            jail.set_env("PIXTRACE_STORAGE_DATABASE_PATH", "/tmp/px.db");
            let config: PixtraceConfig = Figment::new()
                .merge(Serialized::defaults(PixtraceConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.service.log_level, "trace");
            assert_eq!(config.storage.database_path, "/tmp/px.db");
            Ok(())
        });
    }
}

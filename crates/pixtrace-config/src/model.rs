// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pixtrace search core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pixtrace_core::types::{EngineId, DEFAULT_ENGINE_TIMEOUT};

/// Top-level Pixtrace configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PixtraceConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Search orchestration settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Media normalization settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "pixtrace".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Search orchestration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Hard wall-clock deadline for a whole search request, in seconds.
    /// Engines still pending when it elapses are recorded as timed out.
    #[serde(default = "default_request_deadline_secs")]
    pub request_deadline_secs: u64,

    /// Fallback per-engine budget in seconds, used when neither an
    /// engine's descriptor nor `engine_timeout_secs` overrides it.
    #[serde(default = "default_engine_timeout_secs")]
    pub default_engine_timeout_secs: u64,

    /// Per-engine budget overrides in seconds, keyed by engine id
    /// (e.g. `sauce_nao = 45`). Takes precedence over descriptor budgets.
    #[serde(default)]
    pub engine_timeout_secs: BTreeMap<EngineId, u64>,

    /// Consecutive empty results before an engine is removed from a
    /// chat's auto-search set.
    #[serde(default = "default_auto_disable_threshold")]
    pub auto_disable_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            request_deadline_secs: default_request_deadline_secs(),
            default_engine_timeout_secs: default_engine_timeout_secs(),
            engine_timeout_secs: BTreeMap::new(),
            auto_disable_threshold: default_auto_disable_threshold(),
        }
    }
}

impl SearchConfig {
    /// Request-level deadline as a [`Duration`].
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    /// Configured fallback budget as a [`Duration`].
    pub fn default_engine_timeout(&self) -> Duration {
        Duration::from_secs(self.default_engine_timeout_secs)
    }

    /// Budget for one engine: config override, else the engine's own
    /// descriptor budget, else the configured default.
    pub fn engine_budget(&self, id: EngineId, descriptor_budget: Option<Duration>) -> Duration {
        self.engine_timeout_secs
            .get(&id)
            .map(|secs| Duration::from_secs(*secs))
            .or(descriptor_budget)
            .unwrap_or_else(|| self.default_engine_timeout())
    }
}

fn default_request_deadline_secs() -> u64 {
    60
}

fn default_engine_timeout_secs() -> u64 {
    DEFAULT_ENGINE_TIMEOUT.as_secs()
}

fn default_auto_disable_threshold() -> u32 {
    5
}

/// Media normalization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Upper bound on accepted media payloads, in bytes.
    #[serde(default = "default_max_media_bytes")]
    pub max_media_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_media_bytes: default_max_media_bytes(),
        }
    }
}

fn default_max_media_bytes() -> u64 {
    20 * 1024 * 1024
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("pixtrace").join("pixtrace.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("pixtrace.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

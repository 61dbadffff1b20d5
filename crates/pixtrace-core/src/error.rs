// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pixtrace search orchestrator.

use thiserror::Error;

/// The primary error type used across all Pixtrace crates.
///
/// Per-engine failures (timeouts, transport errors) are *not* represented
/// here -- they are recorded as [`EngineOutcome`](crate::types::EngineOutcome)
/// values and never abort a request. Only structural failures surface as
/// `PixtraceError`.
#[derive(Debug, Error)]
pub enum PixtraceError {
    /// The inbound media payload could not be turned into a still image
    /// (unknown format, corrupt data, animated vector sticker).
    /// Reported to the user; the request never reaches dispatch.
    #[error("unsupported media: {detail}")]
    UnsupportedMedia { detail: String },

    /// An engine id was referenced that the registry does not know.
    /// Internal misconfiguration -- logged, never user-facing.
    #[error("unknown engine: {id}")]
    UnknownEngine { id: String },

    /// A settings transition was attempted by a non-admin in a group chat.
    /// State is left unchanged.
    #[error("permission denied: only chat administrators can change settings")]
    PermissionDenied,

    /// A settings transition would violate a settings invariant and was
    /// rejected. State is left unchanged.
    #[error("invalid settings transition: {reason}")]
    InvalidTransition { reason: String },

    /// Every engine is disabled for this chat (by settings or by the
    /// circuit breaker). Reported to the user with guidance to revisit
    /// settings.
    #[error("no search engines are active for this chat")]
    NoActiveEngines,

    /// Settings persistence errors (connection, query, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, unknown keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Media pipeline errors outside decoding proper (subprocess spawn,
    /// temp file I/O).
    #[error("media pipeline error: {message}")]
    Media {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation exceeded its overall deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

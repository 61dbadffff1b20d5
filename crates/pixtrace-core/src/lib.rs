// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pixtrace search orchestrator.
//!
//! This crate provides the foundational types, the error taxonomy, and the
//! trait seams to external collaborators (engine clients, settings
//! persistence, the notification sink, and admin lookup) used throughout
//! the Pixtrace workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PixtraceError;
pub use types::{ChatId, ChatSettings, EngineId, EngineOutcome, NormalizedImage, UserId};

pub use traits::{AdminLookup, EngineClient, NotificationSink, SettingsRepository};

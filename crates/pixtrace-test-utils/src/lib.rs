// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pixtrace integration tests.
//!
//! Provides mock collaborators for fast, deterministic, CI-runnable tests
//! without external services:
//!
//! - [`ScriptedEngine`] - engine client with scripted outcomes and latency
//! - [`MemorySettingsRepository`] - in-memory settings persistence
//! - [`RecordingSink`] - notification sink that captures events
//! - [`StaticAdminLookup`] - fixed admin table

pub mod fixtures;
pub mod memory_repository;
pub mod recording_sink;
pub mod scripted_engine;
pub mod static_admin;

pub use fixtures::{sample_image, sample_match};
pub use memory_repository::MemorySettingsRepository;
pub use recording_sink::RecordingSink;
pub use scripted_engine::ScriptedEngine;
pub use static_admin::StaticAdminLookup;

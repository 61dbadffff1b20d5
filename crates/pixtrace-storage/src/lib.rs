// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Pixtrace.
//!
//! A single background connection (tokio-rusqlite) serializes all writes;
//! schema lives in embedded refinery migrations applied on open.

pub mod database;
pub mod migrations;
pub mod repository;

pub use database::Database;
pub use repository::SqliteSettingsRepository;

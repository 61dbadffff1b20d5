// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams to the system's external collaborators.
//!
//! The orchestration core never talks to the network, the messaging
//! platform, or a concrete database directly; everything goes through
//! these traits so bot frontends can plug in their own implementations
//! and tests can use the mocks from `pixtrace-test-utils`.

pub mod admin;
pub mod engine;
pub mod notify;
pub mod settings;

pub use admin::AdminLookup;
pub use engine::EngineClient;
pub use notify::NotificationSink;
pub use settings::SettingsRepository;

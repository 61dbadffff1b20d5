// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat settings for the Pixtrace search orchestrator.
//!
//! Settings are mutated exclusively through the transition state machine
//! in [`machine`], gated by chat-admin authorization and serialized per
//! chat by [`service::SettingsService`]. The machine preserves the two
//! settings invariants: at least one master toggle stays on, and the
//! auto-search engine set is non-empty whenever auto-search is enabled.

pub mod defaults;
pub mod machine;
pub mod menu;
pub mod service;

pub use defaults::SettingsDefaults;
pub use machine::{SettingsPreset, SettingsTransition, TransitionOutcome};
pub use menu::{MenuAction, MenuState};
pub use service::SettingsService;

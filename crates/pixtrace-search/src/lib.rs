// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent search orchestration for Pixtrace.
//!
//! Three pieces: the [`SearchOrchestrator`] fans one request out across
//! engine clients with per-engine budgets and a request deadline; the
//! [`EngineHealthTracker`] watches per-(chat, engine) result streaks and
//! auto-disables engines that keep coming back empty; [`aggregate`] turns
//! the per-engine reports into a deterministic presentable response.

pub mod aggregate;
pub mod health;
pub mod orchestrator;

pub use aggregate::{aggregate, BestMatch, EngineButton, PresentableResponse, ResultSection};
pub use health::EngineHealthTracker;
pub use orchestrator::{EngineReport, SearchOrchestrator};

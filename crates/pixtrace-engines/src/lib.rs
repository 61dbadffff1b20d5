// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine descriptor registry for the Pixtrace search orchestrator.
//!
//! A static, read-only table of the known reverse-image-search engines
//! and their capabilities, built once at process start. Adding an engine
//! means adding one `EngineId` variant in `pixtrace-core` and one
//! descriptor entry here.

pub mod deep_link;
pub mod descriptor;
pub mod registry;

pub use deep_link::deep_link;
pub use descriptor::{EngineCapability, EngineCategory, EngineDescriptor};
pub use registry::EngineRegistry;

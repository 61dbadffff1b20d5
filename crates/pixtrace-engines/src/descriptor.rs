// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable per-engine capability descriptors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pixtrace_core::types::EngineId;

/// Broad grouping used for deterministic presentation ordering.
///
/// The derived `Ord` follows declaration order: general-purpose engines
/// first, then anime/artwork indexes, then cosplay boards. The aggregator
/// relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineCategory {
    General,
    Artwork,
    Cosplay,
}

/// A queryable capability of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCapability {
    /// Can be dispatched automatically on inbound media.
    AutoSearch,
    /// Returns match lists suitable for inline result cards.
    InlineResults,
    /// Returns scored matches a "best match" card can be built from.
    BestMatch,
}

/// Immutable description of one engine: identity, capabilities, and the
/// deep-link template for its public search page.
///
/// Built once at startup from the fixed table in
/// [`registry`](crate::registry); never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EngineDescriptor {
    pub id: EngineId,
    pub display_name: &'static str,
    pub category: EngineCategory,
    pub supports_auto_search: bool,
    pub supports_inline_results: bool,
    pub supports_best_match: bool,
    /// No programmatic query surface; the engine only contributes a
    /// deep link to its own search page.
    pub button_only: bool,
    /// Search page URL with a `{query_url}` placeholder.
    pub search_url_template: &'static str,
    pub homepage: &'static str,
    /// Engine-specific timeout budget. Rate-limited engines carry a
    /// longer one; `None` means the configured default applies.
    pub timeout: Option<Duration>,
}

impl EngineDescriptor {
    /// Whether this engine has the given capability.
    pub fn has(&self, capability: EngineCapability) -> bool {
        match capability {
            EngineCapability::AutoSearch => self.supports_auto_search,
            EngineCapability::InlineResults => self.supports_inline_results,
            EngineCapability::BestMatch => self.supports_best_match,
        }
    }
}

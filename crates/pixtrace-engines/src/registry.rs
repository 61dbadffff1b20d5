// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide engine descriptor table.
//!
//! Read-only after construction; no I/O, no locking. Declaration order in
//! [`builtin_table`] is the registry order the aggregator falls back to
//! when a chat has no preference order of its own.

use std::collections::BTreeSet;
use std::time::Duration;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::types::EngineId;

use crate::descriptor::{EngineCapability, EngineCategory, EngineDescriptor};

/// SauceNAO's free tier is a handful of searches per 30 seconds and a
/// small daily quota, so its calls are given a longer budget before the
/// orchestrator gives up.
const RATE_LIMITED_TIMEOUT: Duration = Duration::from_secs(45);

fn builtin_table() -> Vec<EngineDescriptor> {
    vec![
        EngineDescriptor {
            id: EngineId::SauceNao,
            display_name: "SauceNAO",
            category: EngineCategory::Artwork,
            supports_auto_search: true,
            supports_inline_results: true,
            supports_best_match: true,
            button_only: false,
            search_url_template: "https://saucenao.com/search.php?url={query_url}",
            homepage: "https://saucenao.com/",
            timeout: Some(RATE_LIMITED_TIMEOUT),
        },
        EngineDescriptor {
            id: EngineId::Google,
            display_name: "Google",
            category: EngineCategory::General,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template:
                "https://www.google.com/searchbyimage?safe=off&image_url={query_url}",
            homepage: "https://google.com/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Trace,
            display_name: "Trace.moe",
            category: EngineCategory::Artwork,
            supports_auto_search: true,
            supports_inline_results: true,
            supports_best_match: true,
            button_only: false,
            search_url_template: "https://trace.moe/?url={query_url}",
            homepage: "https://trace.moe/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Iqdb,
            display_name: "IQDB",
            category: EngineCategory::Artwork,
            supports_auto_search: true,
            supports_inline_results: true,
            supports_best_match: true,
            button_only: false,
            search_url_template: "https://iqdb.org/?url={query_url}",
            homepage: "https://iqdb.org/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Iqdb3d,
            display_name: "3D IQDB",
            category: EngineCategory::Cosplay,
            supports_auto_search: true,
            supports_inline_results: true,
            supports_best_match: true,
            button_only: false,
            search_url_template: "https://3d.iqdb.org/?url={query_url}",
            homepage: "https://3d.iqdb.org/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Yandex,
            display_name: "Yandex",
            category: EngineCategory::General,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template: "https://yandex.com/images/search?url={query_url}&rpt=imageview",
            homepage: "https://yandex.ru/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Baidu,
            display_name: "Baidu",
            category: EngineCategory::General,
            supports_auto_search: true,
            supports_inline_results: true,
            supports_best_match: true,
            button_only: false,
            search_url_template: "https://graph.baidu.com/details?image={query_url}",
            homepage: "https://baidu.com/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Bing,
            display_name: "Bing",
            category: EngineCategory::General,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template:
                "https://www.bing.com/images/search?q=imgurl:{query_url}&view=detailv2&iss=sbi",
            homepage: "https://bing.com/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::TinEye,
            display_name: "TinEye",
            category: EngineCategory::General,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template: "https://tineye.com/search?url={query_url}",
            homepage: "https://tineye.com/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Sogou,
            display_name: "Sogou",
            category: EngineCategory::General,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template: "https://pic.sogou.com/ris?flag=1&drag=0&query={query_url}",
            homepage: "https://www.sogou.com/",
            timeout: None,
        },
        EngineDescriptor {
            id: EngineId::Ascii2d,
            display_name: "ascii2d",
            category: EngineCategory::Artwork,
            supports_auto_search: false,
            supports_inline_results: false,
            supports_best_match: false,
            button_only: true,
            search_url_template: "https://ascii2d.net/search/url/{query_url}",
            homepage: "https://ascii2d.net/",
            timeout: None,
        },
    ]
}

/// The static engine registry.
///
/// Constructed once at process start via [`EngineRegistry::builtin`] and
/// shared read-only from then on.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    engines: Vec<EngineDescriptor>,
}

impl EngineRegistry {
    /// Builds the registry from the fixed built-in table.
    pub fn builtin() -> Self {
        Self {
            engines: builtin_table(),
        }
    }

    /// All descriptors in registry declaration order.
    pub fn all(&self) -> &[EngineDescriptor] {
        &self.engines
    }

    /// Looks up one descriptor.
    ///
    /// `EngineId` is a closed enum, so a miss here means the built-in
    /// table is out of sync with the enum -- an internal misconfiguration,
    /// never a user-facing condition.
    pub fn by_id(&self, id: EngineId) -> Result<&EngineDescriptor, PixtraceError> {
        self.engines
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| PixtraceError::UnknownEngine { id: id.to_string() })
    }

    /// The set of engine ids with the given capability.
    pub fn capable(&self, capability: EngineCapability) -> BTreeSet<EngineId> {
        self.engines
            .iter()
            .filter(|d| d.has(capability))
            .map(|d| d.id)
            .collect()
    }

    /// The full default membership of a chat's auto-search engine set:
    /// every engine capable of auto search. Settings resets fall back to
    /// this.
    pub fn auto_search_defaults(&self) -> BTreeSet<EngineId> {
        self.capable(EngineCapability::AutoSearch)
    }

    /// Position of an engine in registry declaration order. Used as the
    /// final tie-breaker in presentation ordering.
    pub fn declaration_index(&self, id: EngineId) -> usize {
        self.engines
            .iter()
            .position(|d| d.id == id)
            .unwrap_or(usize::MAX)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

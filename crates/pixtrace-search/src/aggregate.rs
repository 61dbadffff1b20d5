// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles per-engine reports into one presentable response.
//!
//! Presentation order is deterministic: engine category first (General,
//! then Artwork, then Cosplay), registry declaration order within a
//! category. Scores are never compared across engines; the "best match"
//! is simply the first best-match-capable engine's top result in that
//! order.

use url::Url;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::types::{ChatSettings, EngineId, EngineOutcome, Match};
use pixtrace_engines::{deep_link, EngineCategory, EngineRegistry};

use crate::orchestrator::EngineReport;

/// One engine's slot in the rendered response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSection {
    pub engine: EngineId,
    pub display_name: &'static str,
    pub category: EngineCategory,
    pub outcome: EngineOutcome,
}

/// The single highlighted result, when the chat shows one.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub engine: EngineId,
    pub result: Match,
}

/// A link button pointing at an engine's public search page.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineButton {
    pub engine: EngineId,
    pub label: &'static str,
    pub url: Url,
}

/// Everything the messaging layer needs to render one search reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentableResponse {
    /// Queried engines in presentation order, one section each.
    pub sections: Vec<ResultSection>,
    /// First success from a best-match-capable engine in presentation
    /// order, if the chat shows a best-match highlight.
    pub best_match: Option<BestMatch>,
    /// Deep-link buttons for the chat's selected button engines. Empty
    /// when buttons are off or no public image URL exists to link to.
    pub buttons: Vec<EngineButton>,
    /// Link back to the uploaded query image, when the chat shows it.
    pub go_to_image: Option<Url>,
}

/// Builds the response for one finished search.
///
/// `image_url` is the publicly reachable URL of the canonical image;
/// button deep links require it and are omitted without it.
pub fn aggregate(
    registry: &EngineRegistry,
    settings: &ChatSettings,
    reports: Vec<EngineReport>,
    image_url: Option<&Url>,
) -> Result<PresentableResponse, PixtraceError> {
    let mut sections = Vec::with_capacity(reports.len());
    for report in reports {
        let descriptor = registry.by_id(report.engine)?;
        sections.push(ResultSection {
            engine: report.engine,
            display_name: descriptor.display_name,
            category: descriptor.category,
            outcome: report.outcome,
        });
    }
    sections.sort_by_key(|s| (s.category, registry.declaration_index(s.engine)));

    let best_match = if settings.show_best_match_button {
        sections
            .iter()
            .filter(|section| {
                registry
                    .by_id(section.engine)
                    .is_ok_and(|d| d.supports_best_match)
            })
            .find_map(|section| match &section.outcome {
                EngineOutcome::Success(matches) => matches.first().map(|m| BestMatch {
                    engine: section.engine,
                    result: m.clone(),
                }),
                _ => None,
            })
    } else {
        None
    };

    let mut buttons = Vec::new();
    if settings.show_buttons_enabled {
        if let Some(image_url) = image_url {
            let mut selected: Vec<EngineId> = settings.button_engines.iter().copied().collect();
            selected.sort_by_key(|id| {
                let category = registry
                    .by_id(*id)
                    .map(|d| d.category)
                    .unwrap_or(EngineCategory::General);
                (category, registry.declaration_index(*id))
            });
            for id in selected {
                let descriptor = registry.by_id(id)?;
                buttons.push(EngineButton {
                    engine: id,
                    label: descriptor.display_name,
                    url: deep_link(descriptor, image_url)?,
                });
            }
        }
    }

    let go_to_image = if settings.show_go_to_image_button {
        image_url.cloned()
    } else {
        None
    };

    Ok(PresentableResponse {
        sections,
        best_match,
        buttons,
        go_to_image,
    })
}

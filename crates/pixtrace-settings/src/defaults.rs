// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default settings membership, derived from the engine registry.

use std::collections::BTreeSet;

use pixtrace_core::types::{ChatId, ChatSettings, EngineId};
use pixtrace_engines::EngineRegistry;

/// The registry-derived default engine memberships a chat starts with and
/// falls back to when its auto-search set is reset.
#[derive(Debug, Clone)]
pub struct SettingsDefaults {
    /// Full default membership of `auto_search_engines`: every engine
    /// capable of auto search.
    pub auto_search: BTreeSet<EngineId>,
    /// Full default membership of `button_engines`: every engine.
    pub buttons: BTreeSet<EngineId>,
}

impl SettingsDefaults {
    pub fn from_registry(registry: &EngineRegistry) -> Self {
        Self {
            auto_search: registry.auto_search_defaults(),
            buttons: registry.all().iter().map(|d| d.id).collect(),
        }
    }

    /// Settings for a chat that has never been configured.
    ///
    /// One-to-one chats start with everything on. Group chats start with
    /// both master toggles off: a bot that auto-searches every image in a
    /// busy group before anyone asked for it gets kicked, so groups opt in
    /// explicitly (usually via a preset).
    pub fn initial_settings(&self, chat_id: ChatId) -> ChatSettings {
        let enabled = !chat_id.is_group();
        ChatSettings {
            auto_search_enabled: enabled,
            show_buttons_enabled: enabled,
            auto_search_engines: self.auto_search.clone(),
            button_engines: self.buttons.clone(),
            show_best_match_button: true,
            show_go_to_image_button: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_chat_starts_fully_enabled() {
        let defaults = SettingsDefaults::from_registry(&EngineRegistry::builtin());
        let settings = defaults.initial_settings(ChatId(42));
        assert!(settings.auto_search_enabled);
        assert!(settings.show_buttons_enabled);
        assert!(!settings.auto_search_engines.is_empty());
        assert_eq!(settings.button_engines.len(), 11);
    }

    #[test]
    fn group_chat_starts_opted_out() {
        let defaults = SettingsDefaults::from_registry(&EngineRegistry::builtin());
        let settings = defaults.initial_settings(ChatId(-100500));
        assert!(!settings.auto_search_enabled);
        assert!(!settings.show_buttons_enabled);
        // Engine sets are still pre-populated so enabling starts fresh.
        assert_eq!(settings.auto_search_engines, defaults.auto_search);
    }
}

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The settings transition state machine.
//!
//! All settings mutation goes through [`apply`]; there are no arbitrary
//! field writes. Each accepted transition yields a complete new
//! [`ChatSettings`] value which the service persists atomically, so a
//! partially-applied transition is never an observable state.

use pixtrace_core::error::PixtraceError;
use pixtrace_core::types::{ChatSettings, EngineId};

use crate::defaults::SettingsDefaults;

/// A single settings mutation requested by a user (or a preset chosen
/// during group onboarding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTransition {
    /// Flip the auto-search master toggle.
    ToggleAutoSearch,
    /// Flip the engine-buttons master toggle.
    ToggleButtons,
    /// Flip one engine's membership in the auto-search set.
    ToggleAutoSearchEngine(EngineId),
    /// Flip one engine's membership in the button set.
    ToggleButtonEngine(EngineId),
    /// Flip the "Best Match" card toggle.
    ToggleBestMatchButton,
    /// Flip the "Go To Image" link toggle.
    ToggleGoToImageButton,
    /// Replace both master toggles with a named preset.
    ApplyPreset(SettingsPreset),
}

/// Coarse presets offered when a group first configures the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPreset {
    /// Auto-search on, engine buttons off.
    SearchOnly,
    /// Auto-search and engine buttons both on.
    Full,
    /// Everything off; the chat searches only via explicit command.
    ManualOnly,
}

/// Result of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The complete new settings state to persist.
    pub settings: ChatSettings,
    /// Set when the transition re-enabled an auto-search engine; the
    /// caller must reset that engine's consecutive-empty counter so the
    /// circuit breaker starts fresh.
    pub reenabled_engine: Option<EngineId>,
}

/// Applies one transition to a settings snapshot.
///
/// Returns the new state, or [`PixtraceError::InvalidTransition`] when the
/// transition would violate a settings invariant; the input snapshot is
/// never mutated, so a rejection leaves observable state unchanged.
pub fn apply(
    current: &ChatSettings,
    defaults: &SettingsDefaults,
    transition: SettingsTransition,
) -> Result<TransitionOutcome, PixtraceError> {
    let mut next = current.clone();
    let mut reenabled_engine = None;

    match transition {
        SettingsTransition::ToggleAutoSearch => {
            if next.auto_search_enabled && !next.show_buttons_enabled {
                return Err(PixtraceError::InvalidTransition {
                    reason: "at least one of auto-search and buttons must stay enabled".into(),
                });
            }
            next.auto_search_enabled = !next.auto_search_enabled;
            if next.auto_search_enabled && next.auto_search_engines.is_empty() {
                next.auto_search_engines = defaults.auto_search.clone();
            }
        }
        SettingsTransition::ToggleButtons => {
            if next.show_buttons_enabled && !next.auto_search_enabled {
                return Err(PixtraceError::InvalidTransition {
                    reason: "at least one of auto-search and buttons must stay enabled".into(),
                });
            }
            next.show_buttons_enabled = !next.show_buttons_enabled;
        }
        SettingsTransition::ToggleAutoSearchEngine(engine) => {
            if !defaults.auto_search.contains(&engine) {
                return Err(PixtraceError::InvalidTransition {
                    reason: format!("engine {engine} does not support auto search"),
                });
            }
            if next.auto_search_engines.remove(&engine) {
                if next.auto_search_engines.is_empty() {
                    // Removing the last engine turns auto-search off and
                    // resets the set to full default membership, so the
                    // next enable starts fresh. Intentional coupling.
                    next.auto_search_enabled = false;
                    next.auto_search_engines = defaults.auto_search.clone();
                }
            } else {
                next.auto_search_engines.insert(engine);
                reenabled_engine = Some(engine);
            }
        }
        SettingsTransition::ToggleButtonEngine(engine) => {
            if !next.button_engines.remove(&engine) {
                next.button_engines.insert(engine);
            }
        }
        SettingsTransition::ToggleBestMatchButton => {
            next.show_best_match_button = !next.show_best_match_button;
        }
        SettingsTransition::ToggleGoToImageButton => {
            next.show_go_to_image_button = !next.show_go_to_image_button;
        }
        SettingsTransition::ApplyPreset(preset) => {
            match preset {
                SettingsPreset::SearchOnly => {
                    next.auto_search_enabled = true;
                    next.show_buttons_enabled = false;
                }
                SettingsPreset::Full => {
                    next.auto_search_enabled = true;
                    next.show_buttons_enabled = true;
                }
                SettingsPreset::ManualOnly => {
                    next.auto_search_enabled = false;
                    next.show_buttons_enabled = false;
                }
            }
            if next.auto_search_enabled && next.auto_search_engines.is_empty() {
                next.auto_search_engines = defaults.auto_search.clone();
            }
        }
    }

    debug_assert!(
        !next.auto_search_enabled || !next.auto_search_engines.is_empty(),
        "auto-search on implies non-empty engine set"
    );

    Ok(TransitionOutcome {
        settings: next,
        reenabled_engine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtrace_core::types::ChatId;
    use pixtrace_engines::EngineRegistry;

    fn defaults() -> SettingsDefaults {
        SettingsDefaults::from_registry(&EngineRegistry::builtin())
    }

    fn private_settings() -> ChatSettings {
        defaults().initial_settings(ChatId(1))
    }

    #[test]
    fn toggling_off_last_master_toggle_is_rejected() {
        let defaults = defaults();
        let mut settings = private_settings();
        settings.show_buttons_enabled = false;

        let err = apply(&settings, &defaults, SettingsTransition::ToggleAutoSearch).unwrap_err();
        assert!(matches!(err, PixtraceError::InvalidTransition { .. }));

        // Symmetric case for the buttons toggle.
        let mut settings = private_settings();
        settings.auto_search_enabled = false;
        let err = apply(&settings, &defaults, SettingsTransition::ToggleButtons).unwrap_err();
        assert!(matches!(err, PixtraceError::InvalidTransition { .. }));
    }

    #[test]
    fn toggle_auto_search_off_is_allowed_while_buttons_on() {
        let outcome = apply(
            &private_settings(),
            &defaults(),
            SettingsTransition::ToggleAutoSearch,
        )
        .unwrap();
        assert!(!outcome.settings.auto_search_enabled);
        assert!(outcome.settings.show_buttons_enabled);
    }

    #[test]
    fn removing_last_auto_engine_disables_and_resets() {
        let defaults = defaults();
        let mut settings = private_settings();
        settings.auto_search_engines = [EngineId::Iqdb].into();

        let outcome = apply(
            &settings,
            &defaults,
            SettingsTransition::ToggleAutoSearchEngine(EngineId::Iqdb),
        )
        .unwrap();

        assert!(!outcome.settings.auto_search_enabled);
        assert_eq!(outcome.settings.auto_search_engines, defaults.auto_search);

        // Re-enabling auto-search immediately shows the full default set.
        let reenabled = apply(
            &outcome.settings,
            &defaults,
            SettingsTransition::ToggleAutoSearch,
        )
        .unwrap();
        assert!(reenabled.settings.auto_search_enabled);
        assert_eq!(reenabled.settings.auto_search_engines, defaults.auto_search);
    }

    #[test]
    fn removing_one_of_many_engines_keeps_auto_search_on() {
        let defaults = defaults();
        let outcome = apply(
            &private_settings(),
            &defaults,
            SettingsTransition::ToggleAutoSearchEngine(EngineId::Iqdb),
        )
        .unwrap();
        assert!(outcome.settings.auto_search_enabled);
        assert!(!outcome.settings.auto_search_engines.contains(&EngineId::Iqdb));
        assert!(outcome.reenabled_engine.is_none());
    }

    #[test]
    fn adding_engine_back_reports_reenabled() {
        let defaults = defaults();
        let mut settings = private_settings();
        settings.auto_search_engines.remove(&EngineId::Trace);

        let outcome = apply(
            &settings,
            &defaults,
            SettingsTransition::ToggleAutoSearchEngine(EngineId::Trace),
        )
        .unwrap();
        assert!(outcome.settings.auto_search_engines.contains(&EngineId::Trace));
        assert_eq!(outcome.reenabled_engine, Some(EngineId::Trace));
    }

    #[test]
    fn button_only_engine_cannot_join_auto_search() {
        let err = apply(
            &private_settings(),
            &defaults(),
            SettingsTransition::ToggleAutoSearchEngine(EngineId::TinEye),
        )
        .unwrap_err();
        assert!(matches!(err, PixtraceError::InvalidTransition { .. }));
    }

    #[test]
    fn button_engine_toggle_has_no_coupling() {
        let defaults = defaults();
        let mut settings = private_settings();
        settings.button_engines = [EngineId::Google].into();

        // Removing the last button engine is allowed; buttons/best-match
        // are independent axes with no reset coupling.
        let outcome = apply(
            &settings,
            &defaults,
            SettingsTransition::ToggleButtonEngine(EngineId::Google),
        )
        .unwrap();
        assert!(outcome.settings.button_engines.is_empty());
        assert!(outcome.settings.show_buttons_enabled);
    }

    #[test]
    fn presets_set_master_toggles() {
        let defaults = defaults();
        let group = defaults.initial_settings(ChatId(-5));

        let search_only = apply(
            &group,
            &defaults,
            SettingsTransition::ApplyPreset(SettingsPreset::SearchOnly),
        )
        .unwrap();
        assert!(search_only.settings.auto_search_enabled);
        assert!(!search_only.settings.show_buttons_enabled);

        let manual = apply(
            &search_only.settings,
            &defaults,
            SettingsTransition::ApplyPreset(SettingsPreset::ManualOnly),
        )
        .unwrap();
        assert!(!manual.settings.auto_search_enabled);
        assert!(!manual.settings.show_buttons_enabled);
    }
}

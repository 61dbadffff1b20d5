// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation states of a settings UI session.
//!
//! The engine sub-menus are reachable only while their parent master
//! toggle is on; selecting a locked sub-menu is a no-op so the rendering
//! layer can show the lock without special-casing.

use pixtrace_core::types::ChatSettings;

/// Where a settings session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    MainMenu,
    AutoSearchEngineMenu,
    ButtonEngineMenu,
}

/// A navigation request from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenAutoSearchEngines,
    OpenButtonEngines,
    Back,
}

impl MenuState {
    /// Applies a navigation action, consulting the current settings for
    /// the parent-toggle locks. Locked or nonsensical navigation returns
    /// the state unchanged.
    pub fn navigate(self, action: MenuAction, settings: &ChatSettings) -> MenuState {
        match (self, action) {
            (MenuState::MainMenu, MenuAction::OpenAutoSearchEngines)
                if settings.auto_search_enabled =>
            {
                MenuState::AutoSearchEngineMenu
            }
            (MenuState::MainMenu, MenuAction::OpenButtonEngines)
                if settings.show_buttons_enabled =>
            {
                MenuState::ButtonEngineMenu
            }
            (MenuState::AutoSearchEngineMenu | MenuState::ButtonEngineMenu, MenuAction::Back) => {
                MenuState::MainMenu
            }
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SettingsDefaults;
    use pixtrace_core::types::ChatId;
    use pixtrace_engines::EngineRegistry;

    fn settings(auto: bool, buttons: bool) -> ChatSettings {
        let mut s = SettingsDefaults::from_registry(&EngineRegistry::builtin())
            .initial_settings(ChatId(1));
        s.auto_search_enabled = auto;
        s.show_buttons_enabled = buttons;
        s
    }

    #[test]
    fn submenus_open_when_parent_is_on() {
        let s = settings(true, true);
        assert_eq!(
            MenuState::MainMenu.navigate(MenuAction::OpenAutoSearchEngines, &s),
            MenuState::AutoSearchEngineMenu
        );
        assert_eq!(
            MenuState::MainMenu.navigate(MenuAction::OpenButtonEngines, &s),
            MenuState::ButtonEngineMenu
        );
    }

    #[test]
    fn locked_submenu_is_a_noop() {
        let s = settings(false, true);
        assert_eq!(
            MenuState::MainMenu.navigate(MenuAction::OpenAutoSearchEngines, &s),
            MenuState::MainMenu
        );
        let s = settings(true, false);
        assert_eq!(
            MenuState::MainMenu.navigate(MenuAction::OpenButtonEngines, &s),
            MenuState::MainMenu
        );
    }

    #[test]
    fn back_returns_to_main_menu() {
        let s = settings(true, true);
        assert_eq!(
            MenuState::AutoSearchEngineMenu.navigate(MenuAction::Back, &s),
            MenuState::MainMenu
        );
        assert_eq!(
            MenuState::ButtonEngineMenu.navigate(MenuAction::Back, &s),
            MenuState::MainMenu
        );
        // Back from the main menu goes nowhere.
        assert_eq!(
            MenuState::MainMenu.navigate(MenuAction::Back, &s),
            MenuState::MainMenu
        );
    }
}

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-chat settings service: authorization, serialization, and
//! persistence around the transition state machine.
//!
//! Updates for one chat are serialized through a per-chat async mutex so
//! concurrent requests never interleave a read-modify-write. Different
//! chats never contend -- the lock map is sharded, there is no global
//! lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::{AdminLookup, SettingsRepository};
use pixtrace_core::types::{ChatId, ChatSettings, EngineId, UserId};
use pixtrace_engines::EngineRegistry;

use crate::defaults::SettingsDefaults;
use crate::machine::{self, SettingsTransition, TransitionOutcome};

/// Owns all reads and writes of [`ChatSettings`].
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
    admin: Arc<dyn AdminLookup>,
    defaults: SettingsDefaults,
    chat_locks: DashMap<ChatId, Arc<Mutex<()>>>,
}

impl SettingsService {
    pub fn new(
        repository: Arc<dyn SettingsRepository>,
        admin: Arc<dyn AdminLookup>,
        registry: &EngineRegistry,
    ) -> Self {
        Self {
            repository,
            admin,
            defaults: SettingsDefaults::from_registry(registry),
            chat_locks: DashMap::new(),
        }
    }

    pub fn defaults(&self) -> &SettingsDefaults {
        &self.defaults
    }

    /// Current settings for a chat, created lazily from the defaults on
    /// first interaction. The lazily-created value is not persisted until
    /// the first accepted transition.
    pub async fn settings_for(&self, chat_id: ChatId) -> Result<ChatSettings, PixtraceError> {
        Ok(self
            .repository
            .load(chat_id)
            .await?
            .unwrap_or_else(|| self.defaults.initial_settings(chat_id)))
    }

    /// Applies a user-requested transition.
    ///
    /// In group chats only administrators may change settings; an
    /// unauthorized attempt fails with [`PixtraceError::PermissionDenied`]
    /// before any state is read. The accepted transition is persisted as
    /// one unit before this returns.
    pub async fn apply(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        transition: SettingsTransition,
    ) -> Result<TransitionOutcome, PixtraceError> {
        if chat_id.is_group() && !self.admin.is_admin(chat_id, user_id).await? {
            debug!(
                chat_id = chat_id.0,
                user_id = user_id.0,
                "settings transition denied: not an admin"
            );
            return Err(PixtraceError::PermissionDenied);
        }

        let _guard = self.lock_chat(chat_id).await;
        let current = self.settings_for(chat_id).await?;
        let outcome = machine::apply(&current, &self.defaults, transition)?;
        self.repository.save(chat_id, &outcome.settings).await?;

        info!(
            chat_id = chat_id.0,
            transition = ?transition,
            auto_search = outcome.settings.auto_search_enabled,
            buttons = outcome.settings.show_buttons_enabled,
            "settings transition applied"
        );
        Ok(outcome)
    }

    /// Circuit-breaker path: removes an engine from a chat's auto-search
    /// set without authorization (the health tracker is not a user).
    ///
    /// Returns `false` without touching state when the engine is already
    /// absent or is the last remaining member -- auto-disabling the last
    /// engine would trip the reset-to-defaults coupling and re-arm the
    /// very engines the breaker just gave up on.
    pub async fn remove_auto_engine(
        &self,
        chat_id: ChatId,
        engine: EngineId,
    ) -> Result<bool, PixtraceError> {
        let _guard = self.lock_chat(chat_id).await;
        let mut settings = self.settings_for(chat_id).await?;

        if !settings.auto_search_engines.contains(&engine)
            || settings.auto_search_engines.len() <= 1
        {
            return Ok(false);
        }

        settings.auto_search_engines.remove(&engine);
        self.repository.save(chat_id, &settings).await?;
        info!(
            chat_id = chat_id.0,
            engine = %engine,
            remaining = settings.auto_search_engines.len(),
            "engine auto-disabled for chat"
        );
        Ok(true)
    }

    async fn lock_chat(&self, chat_id: ChatId) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = self
            .chat_locks
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtrace_test_utils::{MemorySettingsRepository, StaticAdminLookup};

    fn service_with(admin: StaticAdminLookup) -> SettingsService {
        SettingsService::new(
            Arc::new(MemorySettingsRepository::new()),
            Arc::new(admin),
            &EngineRegistry::builtin(),
        )
    }

    #[tokio::test]
    async fn private_chat_needs_no_admin() {
        let service = service_with(StaticAdminLookup::deny_all());
        let outcome = service
            .apply(ChatId(7), UserId(7), SettingsTransition::ToggleAutoSearch)
            .await
            .unwrap();
        assert!(!outcome.settings.auto_search_enabled);
    }

    #[tokio::test]
    async fn non_admin_in_group_is_denied_and_state_unchanged() {
        let service = service_with(StaticAdminLookup::deny_all());
        let chat = ChatId(-900);

        let before = service.settings_for(chat).await.unwrap();
        let err = service
            .apply(
                chat,
                UserId(3),
                SettingsTransition::ApplyPreset(crate::machine::SettingsPreset::Full),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PixtraceError::PermissionDenied));
        assert_eq!(service.settings_for(chat).await.unwrap(), before);
    }

    #[tokio::test]
    async fn admin_in_group_may_apply() {
        let chat = ChatId(-900);
        let user = UserId(3);
        let service = service_with(StaticAdminLookup::with_admin(chat, user));

        let outcome = service
            .apply(
                chat,
                user,
                SettingsTransition::ApplyPreset(crate::machine::SettingsPreset::Full),
            )
            .await
            .unwrap();
        assert!(outcome.settings.auto_search_enabled);
        assert!(outcome.settings.show_buttons_enabled);

        // The accepted transition was persisted as a unit.
        assert_eq!(service.settings_for(chat).await.unwrap(), outcome.settings);
    }

    #[tokio::test]
    async fn rejected_transition_persists_nothing() {
        let service = service_with(StaticAdminLookup::deny_all());
        let chat = ChatId(11);

        // Drive into "buttons off" so the next auto-search toggle is illegal.
        service
            .apply(chat, UserId(11), SettingsTransition::ToggleButtons)
            .await
            .unwrap();
        let before = service.settings_for(chat).await.unwrap();

        let err = service
            .apply(chat, UserId(11), SettingsTransition::ToggleAutoSearch)
            .await
            .unwrap_err();
        assert!(matches!(err, PixtraceError::InvalidTransition { .. }));
        assert_eq!(service.settings_for(chat).await.unwrap(), before);
    }

    #[tokio::test]
    async fn remove_auto_engine_skips_last_member() {
        let service = service_with(StaticAdminLookup::deny_all());
        let chat = ChatId(12);

        // Shrink the set down to one engine via user transitions.
        let defaults = service.defaults().auto_search.clone();
        let mut iter = defaults.iter();
        let keep = *iter.next().unwrap();
        for engine in iter {
            service
                .apply(
                    chat,
                    UserId(12),
                    SettingsTransition::ToggleAutoSearchEngine(*engine),
                )
                .await
                .unwrap();
        }

        assert!(!service.remove_auto_engine(chat, keep).await.unwrap());
        assert!(
            service
                .settings_for(chat)
                .await
                .unwrap()
                .auto_search_engines
                .contains(&keep)
        );
    }

    #[tokio::test]
    async fn remove_auto_engine_removes_and_persists() {
        let service = service_with(StaticAdminLookup::deny_all());
        let chat = ChatId(13);
        let engine = *service.defaults().auto_search.iter().next().unwrap();

        assert!(service.remove_auto_engine(chat, engine).await.unwrap());
        assert!(
            !service
                .settings_for(chat)
                .await
                .unwrap()
                .auto_search_engines
                .contains(&engine)
        );
        // A second removal is a no-op.
        assert!(!service.remove_auto_engine(chat, engine).await.unwrap());
    }
}

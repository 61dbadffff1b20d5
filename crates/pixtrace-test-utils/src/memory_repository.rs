// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory settings persistence for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::SettingsRepository;
use pixtrace_core::types::{ChatId, ChatSettings};

/// A [`SettingsRepository`] backed by a process-local map.
#[derive(Default)]
pub struct MemorySettingsRepository {
    settings: DashMap<ChatId, ChatSettings>,
    saves: AtomicUsize,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many saves have been performed; lets tests assert that a
    /// rejected transition persisted nothing.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn load(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, PixtraceError> {
        Ok(self.settings.get(&chat_id).map(|s| s.clone()))
    }

    async fn save(&self, chat_id: ChatId, settings: &ChatSettings) -> Result<(), PixtraceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.settings.insert(chat_id, settings.clone());
        Ok(())
    }
}

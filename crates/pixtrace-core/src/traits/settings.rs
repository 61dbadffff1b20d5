// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence contract for per-chat settings.

use async_trait::async_trait;

use crate::error::PixtraceError;
use crate::types::{ChatId, ChatSettings};

/// Load/save of [`ChatSettings`] keyed by chat id.
///
/// The core requires only atomic save per chat, not a specific storage
/// technology. Callers (the settings service) serialize read-modify-write
/// cycles per chat themselves, so implementations do not need their own
/// per-chat locking.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored settings for a chat, or `None` if the chat has
    /// never been configured.
    async fn load(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, PixtraceError>;

    /// Atomically replaces the stored settings for a chat.
    async fn save(&self, chat_id: ChatId, settings: &ChatSettings) -> Result<(), PixtraceError>;
}

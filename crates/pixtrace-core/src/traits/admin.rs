// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization lookup against the messaging platform.

use async_trait::async_trait;

use crate::error::PixtraceError;
use crate::types::{ChatId, UserId};

/// Answers "may this user change this chat's settings?".
///
/// Only consulted for group chats; in a one-to-one chat the sole user is
/// always allowed and the settings service short-circuits before calling
/// this.
#[async_trait]
pub trait AdminLookup: Send + Sync {
    /// Whether `user_id` is an administrator (or owner) of `chat_id`.
    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool, PixtraceError>;
}

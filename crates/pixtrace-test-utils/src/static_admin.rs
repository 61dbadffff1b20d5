// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A fixed admin table for authorization tests.

use std::collections::HashSet;

use async_trait::async_trait;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::AdminLookup;
use pixtrace_core::types::{ChatId, UserId};

/// An [`AdminLookup`] answering from a fixed (chat, user) table.
pub struct StaticAdminLookup {
    admins: HashSet<(ChatId, UserId)>,
    allow_all: bool,
}

impl StaticAdminLookup {
    /// Nobody is an admin anywhere.
    pub fn deny_all() -> Self {
        Self {
            admins: HashSet::new(),
            allow_all: false,
        }
    }

    /// Everybody is an admin everywhere.
    pub fn allow_all() -> Self {
        Self {
            admins: HashSet::new(),
            allow_all: true,
        }
    }

    /// Exactly this user administers this chat.
    pub fn with_admin(chat_id: ChatId, user_id: UserId) -> Self {
        Self {
            admins: [(chat_id, user_id)].into(),
            allow_all: false,
        }
    }
}

#[async_trait]
impl AdminLookup for StaticAdminLookup {
    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool, PixtraceError> {
        Ok(self.allow_all || self.admins.contains(&(chat_id, user_id)))
    }
}

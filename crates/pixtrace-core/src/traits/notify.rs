// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery contract for one-shot core events.

use async_trait::async_trait;

use crate::error::PixtraceError;
use crate::types::Notification;

/// Receives core events (currently only engine auto-disablement) for
/// delivery to the affected chat by the messaging layer.
///
/// Delivery failures are logged by callers and never abort the search
/// that triggered the event.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: Notification) -> Result<(), PixtraceError>;
}

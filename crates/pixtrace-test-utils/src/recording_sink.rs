// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A notification sink that records every event it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::NotificationSink;
use pixtrace_core::types::Notification;

/// A [`NotificationSink`] that captures events for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far, in arrival order.
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("events mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: Notification) -> Result<(), PixtraceError> {
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(event);
        Ok(())
    }
}

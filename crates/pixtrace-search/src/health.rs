// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(chat, engine) health tracking and the consecutive-empty circuit
//! breaker.
//!
//! Only the counters live here, in memory; the authoritative engine
//! membership stays in [`SettingsService`]. Counters surviving a restart
//! would only delay a disablement by a few searches, so they are not
//! persisted.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::NotificationSink;
use pixtrace_core::types::{ChatId, EngineId, EngineOutcome, Notification};
use pixtrace_settings::SettingsService;

/// Tracks consecutive empty results per (chat, engine) and removes an
/// engine from the chat's auto-search set when the threshold is reached.
///
/// Counter semantics:
/// - `Empty` increments;
/// - `Success` resets to zero;
/// - `Timeout` and `Error` leave the counter untouched. An engine that is
///   down is not an engine that cannot find this chat's images.
pub struct EngineHealthTracker {
    counters: DashMap<(ChatId, EngineId), u32>,
    threshold: u32,
    settings: Arc<SettingsService>,
    sink: Arc<dyn NotificationSink>,
}

impl EngineHealthTracker {
    pub fn new(
        settings: Arc<SettingsService>,
        sink: Arc<dyn NotificationSink>,
        threshold: u32,
    ) -> Self {
        Self {
            counters: DashMap::new(),
            threshold,
            settings,
            sink,
        }
    }

    /// Current consecutive-empty count for one (chat, engine) pair.
    pub fn consecutive_empties(&self, chat_id: ChatId, engine: EngineId) -> u32 {
        self.counters
            .get(&(chat_id, engine))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Clears the counter, e.g. when a user re-enables an engine that was
    /// previously auto-disabled. The fresh opt-in starts from a clean
    /// slate.
    pub fn reset(&self, chat_id: ChatId, engine: EngineId) {
        self.counters.remove(&(chat_id, engine));
    }

    /// Records one classified outcome and trips the breaker when the
    /// consecutive-empty threshold is reached.
    ///
    /// Tripping removes the engine from the chat's auto-search set and
    /// emits exactly one [`Notification::EngineAutoDisabled`]. When the
    /// settings layer refuses the removal (engine already absent, or it is
    /// the last remaining member) the counter is still cleared and no
    /// notification is sent.
    pub async fn record(
        &self,
        chat_id: ChatId,
        engine: EngineId,
        outcome: &EngineOutcome,
    ) -> Result<(), PixtraceError> {
        match outcome {
            EngineOutcome::Success(_) => {
                self.counters.remove(&(chat_id, engine));
            }
            EngineOutcome::Empty => {
                // The guard must drop before any await below.
                let count = {
                    let mut entry = self.counters.entry((chat_id, engine)).or_insert(0);
                    *entry += 1;
                    *entry
                };
                debug!(
                    chat_id = chat_id.0,
                    engine = %engine,
                    consecutive_empties = count,
                    "engine returned empty result"
                );
                if count >= self.threshold {
                    self.counters.remove(&(chat_id, engine));
                    if self.settings.remove_auto_engine(chat_id, engine).await? {
                        info!(
                            chat_id = chat_id.0,
                            engine = %engine,
                            threshold = self.threshold,
                            "circuit breaker tripped, engine auto-disabled"
                        );
                        self.sink
                            .notify(Notification::EngineAutoDisabled { chat_id, engine })
                            .await?;
                    }
                }
            }
            EngineOutcome::Timeout | EngineOutcome::Error(_) => {}
        }
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A mock engine client with scripted outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use pixtrace_core::traits::EngineClient;
use pixtrace_core::types::{EngineErrorKind, EngineId, Match, NormalizedImage};

type Reply = Result<Vec<Match>, EngineErrorKind>;

/// An [`EngineClient`] whose replies are scripted up front.
///
/// Each call pops the next scripted reply; when the script is exhausted
/// the default reply (empty result list) repeats. An optional artificial
/// latency makes timeout and cancellation paths testable with tokio's
/// paused clock.
pub struct ScriptedEngine {
    id: EngineId,
    latency: Duration,
    script: Mutex<VecDeque<Reply>>,
    default_reply: Reply,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(id: EngineId) -> Self {
        Self {
            id,
            latency: Duration::ZERO,
            script: Mutex::new(VecDeque::new()),
            default_reply: Ok(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sets the artificial latency applied before every reply.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every unscripted call return these matches.
    pub fn always_returning(mut self, matches: Vec<Match>) -> Self {
        self.default_reply = Ok(matches);
        self
    }

    /// Makes every unscripted call fail with the given kind.
    pub fn always_failing(mut self, kind: EngineErrorKind) -> Self {
        self.default_reply = Err(kind);
        self
    }

    /// Queues one scripted reply (consumed in FIFO order before the
    /// default reply kicks in).
    pub fn push_reply(&self, reply: Reply) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(reply);
    }

    /// Number of queries this engine has served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineClient for ScriptedEngine {
    fn id(&self) -> EngineId {
        self.id
    }

    async fn query(
        &self,
        _image: &NormalizedImage,
        _budget: Duration,
    ) -> Result<Vec<Match>, EngineErrorKind> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let scripted = self
            .script
            .lock()
            .expect("script mutex poisoned")
            .pop_front();
        scripted.unwrap_or_else(|| self.default_reply.clone())
    }
}

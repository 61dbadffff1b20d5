// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The concurrent search orchestrator.
//!
//! Fans a request out to every resolved engine as its own task, enforces
//! a hard per-engine budget plus a request-level deadline, and classifies
//! each engine's result independently. One slow or failing engine never
//! delays or poisons the others.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use pixtrace_config::model::SearchConfig;
use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::EngineClient;
use pixtrace_core::types::{ChatId, EngineId, EngineOutcome, SearchMode, SearchRequest, UserId};
use pixtrace_engines::{EngineCapability, EngineRegistry};
use pixtrace_settings::{SettingsService, SettingsTransition, TransitionOutcome};

use crate::health::EngineHealthTracker;

/// One engine's classified result within a finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReport {
    pub engine: EngineId,
    pub outcome: EngineOutcome,
}

/// Drives searches across the registered engine clients.
pub struct SearchOrchestrator {
    registry: Arc<EngineRegistry>,
    settings: Arc<SettingsService>,
    health: Arc<EngineHealthTracker>,
    clients: HashMap<EngineId, Arc<dyn EngineClient>>,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(
        registry: Arc<EngineRegistry>,
        settings: Arc<SettingsService>,
        health: Arc<EngineHealthTracker>,
        config: SearchConfig,
    ) -> Self {
        Self {
            registry,
            settings,
            health,
            clients: HashMap::new(),
            config,
        }
    }

    /// Registers a client for its engine, replacing any previous one.
    pub fn register_client(&mut self, client: Arc<dyn EngineClient>) {
        self.clients.insert(client.id(), client);
    }

    pub fn settings(&self) -> &Arc<SettingsService> {
        &self.settings
    }

    pub fn health(&self) -> &Arc<EngineHealthTracker> {
        &self.health
    }

    /// Applies a settings transition on behalf of a user, clearing the
    /// health streak of any engine the transition re-enabled so the fresh
    /// opt-in is not immediately re-disabled by a stale counter.
    pub async fn apply_settings(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        transition: SettingsTransition,
    ) -> Result<TransitionOutcome, PixtraceError> {
        let outcome = self.settings.apply(chat_id, user_id, transition).await?;
        if let Some(engine) = outcome.reenabled_engine {
            self.health.reset(chat_id, engine);
        }
        Ok(outcome)
    }

    /// Runs one search to completion (or deadline).
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<EngineReport>, PixtraceError> {
        self.search_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Runs one search, additionally stopping early when `cancel` fires.
    /// Engines still pending at cancellation or deadline are reported as
    /// [`EngineOutcome::Timeout`].
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<EngineReport>, PixtraceError> {
        let engines = self.resolve_engines(request).await?;
        info!(
            chat_id = request.chat_id.0,
            mode = %request.mode,
            engines = engines.len(),
            "starting search"
        );

        let image = Arc::new(request.image.clone());
        let mut join_set = JoinSet::new();
        for id in &engines {
            let id = *id;
            // resolve_engines only yields ids with a registered client
            let client = match self.clients.get(&id) {
                Some(client) => Arc::clone(client),
                None => continue,
            };
            let budget = self
                .config
                .engine_budget(id, self.registry.by_id(id)?.timeout);
            let image = Arc::clone(&image);
            join_set.spawn(async move {
                let outcome =
                    match tokio::time::timeout(budget, client.query(&image, budget)).await {
                        Ok(Ok(matches)) if matches.is_empty() => EngineOutcome::Empty,
                        Ok(Ok(matches)) => EngineOutcome::Success(matches),
                        Ok(Err(kind)) => EngineOutcome::Error(kind),
                        Err(_elapsed) => EngineOutcome::Timeout,
                    };
                (id, outcome)
            });
        }

        let mut finished: HashMap<EngineId, EngineOutcome> = HashMap::new();
        let deadline = tokio::time::sleep(self.config.request_deadline());
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                joined = join_set.join_next() => match joined {
                    Some(Ok((id, outcome))) => {
                        finished.insert(id, outcome);
                    }
                    Some(Err(join_err)) => {
                        warn!(error = %join_err, "engine task aborted abnormally");
                    }
                    None => break,
                },
                _ = &mut deadline => {
                    warn!(
                        chat_id = request.chat_id.0,
                        pending = engines.len() - finished.len(),
                        "request deadline elapsed, aborting pending engines"
                    );
                    join_set.abort_all();
                    break;
                }
                _ = cancel.cancelled() => {
                    join_set.abort_all();
                    break;
                }
            }
        }

        let mut reports = Vec::with_capacity(engines.len());
        for id in engines {
            let outcome = finished.remove(&id).unwrap_or(EngineOutcome::Timeout);
            if let Err(err) = self.health.record(request.chat_id, id, &outcome).await {
                // Search results are still worth delivering when the
                // breaker cannot persist its bookkeeping.
                warn!(engine = %id, error = %err, "health tracking failed");
            }
            reports.push(EngineReport {
                engine: id,
                outcome,
            });
        }

        info!(
            chat_id = request.chat_id.0,
            successes = reports.iter().filter(|r| r.outcome.is_success()).count(),
            empties = reports.iter().filter(|r| r.outcome.is_empty()).count(),
            total = reports.len(),
            "search finished"
        );
        Ok(reports)
    }

    /// The engines this request will query, in registry declaration order.
    ///
    /// Auto mode: the chat's auto-search engine set, filtered to engines
    /// that are auto-search capable and have a registered client. Explicit
    /// mode: every queryable (non-button-only) engine with a client,
    /// regardless of the chat's auto-search selection.
    async fn resolve_engines(&self, request: &SearchRequest) -> Result<Vec<EngineId>, PixtraceError> {
        let chat_settings = self.settings.settings_for(request.chat_id).await?;
        let candidates: Vec<EngineId> = match request.mode {
            SearchMode::Auto => {
                if !chat_settings.auto_search_enabled {
                    return Err(PixtraceError::NoActiveEngines);
                }
                let capable = self.registry.capable(EngineCapability::AutoSearch);
                self.registry
                    .all()
                    .iter()
                    .map(|d| d.id)
                    .filter(|id| {
                        capable.contains(id) && chat_settings.auto_search_engines.contains(id)
                    })
                    .collect()
            }
            SearchMode::Explicit => self
                .registry
                .all()
                .iter()
                .filter(|d| !d.button_only)
                .map(|d| d.id)
                .collect(),
        };

        let resolved: Vec<EngineId> = candidates
            .into_iter()
            .filter(|id| self.clients.contains_key(id))
            .collect();
        if resolved.is_empty() {
            return Err(PixtraceError::NoActiveEngines);
        }
        Ok(resolved)
    }
}

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end orchestration flow: repeated searches, the consecutive-empty
//! circuit breaker, and response aggregation working together.

use std::sync::Arc;

use url::Url;

use pixtrace_config::model::SearchConfig;
use pixtrace_core::types::{
    ChatId, EngineErrorKind, EngineId, EngineOutcome, Notification, SearchMode, SearchRequest,
};
use pixtrace_engines::EngineRegistry;
use pixtrace_search::{aggregate, EngineHealthTracker, SearchOrchestrator};
use pixtrace_settings::SettingsService;
use pixtrace_test_utils::{
    sample_image, sample_match, MemorySettingsRepository, RecordingSink, ScriptedEngine,
    StaticAdminLookup,
};

struct Harness {
    orchestrator: SearchOrchestrator,
    settings: Arc<SettingsService>,
    sink: Arc<RecordingSink>,
}

fn harness() -> Harness {
    let registry = Arc::new(EngineRegistry::builtin());
    let settings = Arc::new(SettingsService::new(
        Arc::new(MemorySettingsRepository::new()),
        Arc::new(StaticAdminLookup::allow_all()),
        &registry,
    ));
    let sink = Arc::new(RecordingSink::new());
    let health = Arc::new(EngineHealthTracker::new(settings.clone(), sink.clone(), 5));
    let mut orchestrator =
        SearchOrchestrator::new(registry, settings.clone(), health, SearchConfig::default());

    // Three scripted engines: one that never finds anything, one that
    // always succeeds, one that always fails upstream.
    orchestrator.register_client(Arc::new(ScriptedEngine::new(EngineId::Iqdb)));
    orchestrator.register_client(Arc::new(
        ScriptedEngine::new(EngineId::Trace).always_returning(vec![sample_match("anime", 96.5)]),
    ));
    orchestrator.register_client(Arc::new(
        ScriptedEngine::new(EngineId::SauceNao).always_failing(EngineErrorKind::Upstream),
    ));

    Harness {
        orchestrator,
        settings,
        sink,
    }
}

fn request(chat: ChatId) -> SearchRequest {
    SearchRequest {
        chat_id: chat,
        image: sample_image(),
        mode: SearchMode::Auto,
        image_url: Some(Url::parse("https://files.example.org/q.png").unwrap()),
    }
}

#[tokio::test]
async fn empty_engine_is_disabled_after_five_searches_and_stops_being_queried() {
    let h = harness();
    let chat = ChatId(42);

    for _ in 0..5 {
        h.orchestrator.search(&request(chat)).await.unwrap();
    }

    // Exactly one notification, for the engine that kept coming back empty.
    assert_eq!(
        h.sink.events(),
        vec![Notification::EngineAutoDisabled {
            chat_id: chat,
            engine: EngineId::Iqdb,
        }]
    );
    let settings = h.settings.settings_for(chat).await.unwrap();
    assert!(!settings.auto_search_engines.contains(&EngineId::Iqdb));
    assert!(settings.auto_search_engines.contains(&EngineId::Trace));

    // The sixth search no longer queries the disabled engine.
    let reports = h.orchestrator.search(&request(chat)).await.unwrap();
    assert!(reports.iter().all(|r| r.engine != EngineId::Iqdb));

    // Five more searches produce no second notification.
    for _ in 0..5 {
        h.orchestrator.search(&request(chat)).await.unwrap();
    }
    assert_eq!(h.sink.events().len(), 1);
}

#[tokio::test]
async fn failing_engine_is_never_auto_disabled() {
    let h = harness();
    let chat = ChatId(43);

    for _ in 0..8 {
        h.orchestrator.search(&request(chat)).await.unwrap();
    }

    // SauceNao errors every time; errors are not empties.
    let settings = h.settings.settings_for(chat).await.unwrap();
    assert!(settings.auto_search_engines.contains(&EngineId::SauceNao));
    assert_eq!(
        h.sink
            .events()
            .iter()
            .filter(|n| matches!(
                n,
                Notification::EngineAutoDisabled {
                    engine: EngineId::SauceNao,
                    ..
                }
            ))
            .count(),
        0
    );
}

#[tokio::test]
async fn chats_do_not_share_breaker_state() {
    let h = harness();

    for _ in 0..5 {
        h.orchestrator.search(&request(ChatId(50))).await.unwrap();
    }
    // Chat 51 searched only once; its engine set is untouched.
    h.orchestrator.search(&request(ChatId(51))).await.unwrap();

    let other = h.settings.settings_for(ChatId(51)).await.unwrap();
    assert!(other.auto_search_engines.contains(&EngineId::Iqdb));
    assert_eq!(h.sink.events().len(), 1);
}

#[tokio::test]
async fn reports_aggregate_into_a_presentable_response() {
    let h = harness();
    let chat = ChatId(60);
    let req = request(chat);

    let reports = h.orchestrator.search(&req).await.unwrap();
    let registry = EngineRegistry::builtin();
    let settings = h.settings.settings_for(chat).await.unwrap();
    let response = aggregate(&registry, &settings, reports, req.image_url.as_ref()).unwrap();

    // All three queried engines have a section; the successful one wins
    // the best-match slot.
    assert_eq!(response.sections.len(), 3);
    let best = response.best_match.expect("trace succeeded");
    assert_eq!(best.engine, EngineId::Trace);

    // SauceNao's failure is visible as its own section, not swallowed.
    let sauce = response
        .sections
        .iter()
        .find(|s| s.engine == EngineId::SauceNao)
        .unwrap();
    assert_eq!(
        sauce.outcome,
        EngineOutcome::Error(EngineErrorKind::Upstream)
    );

    // Button-only engines appear as deep links alongside the results.
    assert!(response.buttons.iter().any(|b| b.engine == EngineId::Google));
    assert_eq!(response.go_to_image, req.image_url);
}

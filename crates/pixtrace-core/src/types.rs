// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Pixtrace workspace.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// Unique identifier for a chat. Negative ids are group chats, positive
/// ids are one-to-one chats (matching the Telegram convention the bot
/// frontends use).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl ChatId {
    /// Whether this chat is a multi-user group.
    pub fn is_group(self) -> bool {
        self.0 < 0
    }
}

/// Unique identifier for a user within the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// The closed set of known reverse-image-search engines.
///
/// Adding an engine means adding one variant here plus a descriptor entry
/// in the registry. There is no open-ended engine discovery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EngineId {
    SauceNao,
    Google,
    Trace,
    Iqdb,
    Iqdb3d,
    Yandex,
    Baidu,
    Bing,
    TinEye,
    Sogou,
    Ascii2d,
}

/// What kind of media the canonical still image was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Photo,
    StickerImage,
    StickerVideo,
    DocumentImage,
    DocumentVideo,
    Animation,
    Video,
}

impl SourceKind {
    /// Whether the source requires frame extraction before searching.
    pub fn is_video(self) -> bool {
        matches!(
            self,
            SourceKind::StickerVideo
                | SourceKind::DocumentVideo
                | SourceKind::Animation
                | SourceKind::Video
        )
    }
}

/// Encoding of the canonical still image handed to engine clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StillFormat {
    Png,
    Jpeg,
}

/// The canonical still image produced by the media normalizer.
///
/// Owned exclusively by the request that created it; never cached or
/// shared across requests.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub source: SourceKind,
    pub format: StillFormat,
}

/// Whether a search was triggered automatically by inbound media or by an
/// explicit user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchMode {
    Auto,
    Explicit,
}

/// A single match returned by one engine.
///
/// `score` is on whatever scale the engine uses; scores are comparable
/// only within the same engine's result list, never across engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub score: f32,
    pub target_url: Url,
    pub title: Option<String>,
}

/// Classification of a single engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EngineErrorKind {
    /// Transport-level failure (DNS, connect, TLS, reset).
    Network,
    /// The engine rejected the call due to quota exhaustion.
    RateLimited,
    /// The engine answered but the payload could not be understood.
    InvalidResponse,
    /// The engine reported an internal error.
    Upstream,
}

/// The classified outcome of one engine's call within a search request.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// The engine returned at least one match, best first.
    Success(Vec<Match>),
    /// The engine answered but found nothing.
    Empty,
    /// The per-engine or request-level budget elapsed first.
    Timeout,
    /// The call failed; the kind says how.
    Error(EngineErrorKind),
}

impl EngineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EngineOutcome::Success(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EngineOutcome::Empty)
    }
}

/// A search request handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub chat_id: ChatId,
    pub image: NormalizedImage,
    pub mode: SearchMode,
    /// Optional deep link to where the canonical image was uploaded,
    /// rendered as a "Go To Image" button when the chat has it enabled.
    pub image_url: Option<Url>,
}

/// Per-chat configuration of which features and engines are active.
///
/// Invariants (enforced by the settings state machine, not by this struct):
/// - at least one of `auto_search_enabled` / `show_buttons_enabled` holds
///   after every accepted toggle transition;
/// - `auto_search_engines` is non-empty whenever `auto_search_enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub auto_search_enabled: bool,
    pub show_buttons_enabled: bool,
    pub auto_search_engines: BTreeSet<EngineId>,
    pub button_engines: BTreeSet<EngineId>,
    pub show_best_match_button: bool,
    pub show_go_to_image_button: bool,
}

/// One-shot events emitted by the core for delivery to the chat by the
/// messaging layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The circuit breaker removed an engine from a chat's auto-search
    /// set after repeated empty results. Emitted exactly once per
    /// disablement.
    EngineAutoDisabled { chat_id: ChatId, engine: EngineId },
}

/// Default per-engine timeout budget when the config does not override it.
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn engine_id_display_round_trips() {
        for id in [
            EngineId::SauceNao,
            EngineId::Google,
            EngineId::Trace,
            EngineId::Iqdb,
            EngineId::Iqdb3d,
            EngineId::Yandex,
            EngineId::Baidu,
            EngineId::Bing,
            EngineId::TinEye,
            EngineId::Sogou,
            EngineId::Ascii2d,
        ] {
            let s = id.to_string();
            assert_eq!(EngineId::from_str(&s).expect("should parse back"), id);
        }
    }

    #[test]
    fn engine_id_serde_matches_strum() {
        let json = serde_json::to_string(&EngineId::SauceNao).unwrap();
        assert_eq!(json, "\"sauce_nao\"");
        assert_eq!(EngineId::SauceNao.to_string(), "sauce_nao");
    }

    #[test]
    fn chat_id_group_detection() {
        assert!(ChatId(-1001234).is_group());
        assert!(!ChatId(4321).is_group());
    }

    #[test]
    fn video_source_kinds() {
        assert!(SourceKind::Video.is_video());
        assert!(SourceKind::StickerVideo.is_video());
        assert!(!SourceKind::Photo.is_video());
        assert!(!SourceKind::StickerImage.is_video());
    }
}

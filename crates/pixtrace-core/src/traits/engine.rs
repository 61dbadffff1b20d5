// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform contract every reverse-image-search engine client exposes.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::{EngineErrorKind, EngineId, Match, NormalizedImage};

/// One reverse-image-search engine's programmatic query surface.
///
/// The orchestrator treats every engine uniformly through this trait
/// regardless of the underlying protocol. Implementations own their wire
/// format, auth, and response parsing; none of that is visible here.
///
/// `budget` is advisory: clients should pass it down as their HTTP
/// timeout, but the orchestrator additionally enforces it with a hard
/// `tokio::time::timeout` so a misbehaving client cannot stall a request.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Which engine this client implements.
    fn id(&self) -> EngineId;

    /// Queries the engine with the canonical still image.
    ///
    /// Returns the matches found (possibly none -- an empty vec is a
    /// legitimate "engine answered, found nothing" outcome, distinct from
    /// an error) or a classified failure.
    async fn query(
        &self,
        image: &NormalizedImage,
        budget: Duration,
    ) -> Result<Vec<Match>, EngineErrorKind>;
}

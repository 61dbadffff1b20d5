// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small shared fixtures.

use url::Url;

use pixtrace_core::types::{Match, NormalizedImage, SourceKind, StillFormat};

/// A minimal valid canonical image. The bytes are not a real PNG; mocks
/// never decode them.
pub fn sample_image() -> NormalizedImage {
    NormalizedImage {
        bytes: vec![0u8; 16],
        width: 4,
        height: 4,
        source: SourceKind::Photo,
        format: StillFormat::Png,
    }
}

/// A match pointing at a synthetic result page.
pub fn sample_match(slug: &str, score: f32) -> Match {
    Match {
        score,
        target_url: Url::parse(&format!("https://results.example.org/{slug}"))
            .expect("fixture url is valid"),
        title: Some(slug.to_string()),
    }
}

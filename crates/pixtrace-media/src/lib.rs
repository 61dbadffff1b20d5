// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media normalization for the Pixtrace search orchestrator.
//!
//! Converts arbitrary inbound media (photos, stickers, documents, videos,
//! animations) into one canonical still image suitable for upload to
//! reverse-image-search engines. Still images pass through (re-encoded to
//! PNG when the source format is not broadly accepted), EXIF orientation
//! is baked in, and video-like media contributes its first decodable
//! frame via an `ffmpeg` subprocess.

pub mod media;
pub mod normalize;
pub mod orientation;
pub mod video;

pub use media::{IncomingMedia, StickerKind};
pub use normalize::{normalize, normalize_limited};

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound media payloads as delivered by the messaging transport.

use pixtrace_core::types::SourceKind;

/// Sticker flavor, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerKind {
    /// A static raster sticker (WEBP on Telegram).
    Image,
    /// A video sticker (WEBM).
    Video,
    /// A vector/Lottie animated sticker. Not searchable.
    Animated,
}

/// A media payload received from the messaging layer, bytes already
/// downloaded. The transport picks the largest photo variant; this layer
/// only converts.
#[derive(Debug, Clone)]
pub enum IncomingMedia {
    Photo { bytes: Vec<u8> },
    Sticker { bytes: Vec<u8>, kind: StickerKind },
    Document { bytes: Vec<u8>, mime: String },
    Animation { bytes: Vec<u8> },
    Video { bytes: Vec<u8> },
}

impl IncomingMedia {
    pub fn bytes(&self) -> &[u8] {
        match self {
            IncomingMedia::Photo { bytes }
            | IncomingMedia::Sticker { bytes, .. }
            | IncomingMedia::Document { bytes, .. }
            | IncomingMedia::Animation { bytes }
            | IncomingMedia::Video { bytes } => bytes,
        }
    }

    /// Resolves the source kind, or `None` for payloads that can never be
    /// searched (animated vector stickers, non-media documents).
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            IncomingMedia::Photo { .. } => Some(SourceKind::Photo),
            IncomingMedia::Sticker { kind, .. } => match kind {
                StickerKind::Image => Some(SourceKind::StickerImage),
                StickerKind::Video => Some(SourceKind::StickerVideo),
                StickerKind::Animated => None,
            },
            IncomingMedia::Document { mime, .. } => {
                if mime.starts_with("image/") {
                    Some(SourceKind::DocumentImage)
                } else if mime.starts_with("video/") {
                    Some(SourceKind::DocumentVideo)
                } else {
                    None
                }
            }
            IncomingMedia::Animation { .. } => Some(SourceKind::Animation),
            IncomingMedia::Video { .. } => Some(SourceKind::Video),
        }
    }
}

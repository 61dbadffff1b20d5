// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The normalization pipeline: inbound media to one canonical still.
//!
//! Contract (engines depend on all of these):
//! - output is fully decoded, never upscaled, never cropped;
//! - EXIF orientation is baked into the pixels before output;
//! - formats engines choke on (WEBP, GIF, BMP) are re-encoded to PNG,
//!   while plain PNG/JPEG passes through byte-identical;
//! - video-like media contributes exactly its first decodable frame.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::types::{NormalizedImage, SourceKind, StillFormat};

use crate::media::IncomingMedia;
use crate::orientation::{apply_orientation, exif_orientation};
use crate::video;

/// Converts arbitrary inbound media into one canonical still image.
///
/// Fails with [`PixtraceError::UnsupportedMedia`] for payloads that can
/// never yield a still (animated vector stickers, non-media documents,
/// corrupt image data). The failure is surfaced to the caller and the
/// request never reaches the orchestrator.
pub async fn normalize(media: IncomingMedia) -> Result<NormalizedImage, PixtraceError> {
    let source = media.source_kind().ok_or_else(|| {
        PixtraceError::UnsupportedMedia {
            detail: match &media {
                IncomingMedia::Sticker { .. } => "animated stickers are not searchable".into(),
                IncomingMedia::Document { mime, .. } => {
                    format!("document mime type {mime} is not searchable")
                }
                _ => "media kind is not searchable".into(),
            },
        }
    })?;

    if source.is_video() {
        let frame = video::first_frame_png(media.bytes()).await?;
        let decoded = decode(&frame)?;
        debug!(
            source = %source,
            width = decoded.width(),
            height = decoded.height(),
            "normalized video media to first frame"
        );
        return encode_png(decoded, source);
    }

    still_from_bytes(media.bytes(), source)
}

/// Like [`normalize`], but rejects payloads over `max_bytes` before any
/// decoding or subprocess work. Callers wire this to the configured
/// `media.max_media_bytes`.
pub async fn normalize_limited(
    media: IncomingMedia,
    max_bytes: u64,
) -> Result<NormalizedImage, PixtraceError> {
    let len = media.bytes().len() as u64;
    if len > max_bytes {
        return Err(PixtraceError::UnsupportedMedia {
            detail: format!("media payload of {len} bytes exceeds the {max_bytes} byte limit"),
        });
    }
    normalize(media).await
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, PixtraceError> {
    image::load_from_memory(bytes).map_err(|e| PixtraceError::UnsupportedMedia {
        detail: format!("image payload could not be decoded: {e}"),
    })
}

fn still_from_bytes(bytes: &[u8], source: SourceKind) -> Result<NormalizedImage, PixtraceError> {
    let format = image::guess_format(bytes).map_err(|e| PixtraceError::UnsupportedMedia {
        detail: format!("unrecognized image format: {e}"),
    })?;
    let decoded = decode(bytes)?;

    match format {
        ImageFormat::Jpeg => {
            let orientation = exif_orientation(bytes);
            if orientation == 1 {
                // Broadly accepted and already upright: pass through
                // untouched so engines see the original encoding.
                return Ok(NormalizedImage {
                    width: decoded.width(),
                    height: decoded.height(),
                    bytes: bytes.to_vec(),
                    source,
                    format: StillFormat::Jpeg,
                });
            }
            debug!(orientation, "baking EXIF orientation into pixels");
            let upright = apply_orientation(decoded, orientation);
            let mut out = Vec::new();
            upright
                .write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
                .map_err(|e| PixtraceError::Media {
                    message: format!("jpeg re-encode failed: {e}"),
                    source: Some(Box::new(e)),
                })?;
            Ok(NormalizedImage {
                width: upright.width(),
                height: upright.height(),
                bytes: out,
                source,
                format: StillFormat::Jpeg,
            })
        }
        ImageFormat::Png => Ok(NormalizedImage {
            width: decoded.width(),
            height: decoded.height(),
            bytes: bytes.to_vec(),
            source,
            format: StillFormat::Png,
        }),
        other => {
            // WEBP stickers and GIF/BMP documents: several engines reject
            // these outright, so re-encode to PNG.
            debug!(from = ?other, "re-encoding to png");
            encode_png(decoded, source)
        }
    }
}

fn encode_png(image: DynamicImage, source: SourceKind) -> Result<NormalizedImage, PixtraceError> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| PixtraceError::Media {
            message: format!("png encode failed: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(NormalizedImage {
        width: image.width(),
        height: image.height(),
        bytes: out,
        source,
        format: StillFormat::Png,
    })
}

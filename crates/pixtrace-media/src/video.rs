// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-frame extraction for video, animation, and video-sticker media.
//!
//! Shells out to `ffmpeg` rather than linking a decoder: the set of
//! containers Telegram-style transports deliver (MP4, WEBM, GIF) is
//! exactly what ffmpeg already handles, and the call is one frame per
//! request.
//!
//! Known caveat: exactly the first decodable frame is taken. Clips that
//! open with a fade-in or a black lead-in produce a dark, unrepresentative
//! still. That is accepted behavior; deterministic frame choice matters
//! more than representativeness here, so no scene-detection heuristics
//! are applied.

use tokio::process::Command;
use tracing::debug;

use pixtrace_core::error::PixtraceError;

/// Extracts the first decodable frame of `video` as PNG bytes.
///
/// Fails with [`PixtraceError::UnsupportedMedia`] when ffmpeg cannot
/// decode the payload, and with [`PixtraceError::Media`] for
/// infrastructure problems (ffmpeg missing, temp dir unwritable).
pub async fn first_frame_png(video: &[u8]) -> Result<Vec<u8>, PixtraceError> {
    let dir = tempfile::tempdir().map_err(|e| PixtraceError::Media {
        message: "failed to create temp dir for frame extraction".into(),
        source: Some(Box::new(e)),
    })?;
    let input_path = dir.path().join("input");
    let output_path = dir.path().join("frame.png");

    tokio::fs::write(&input_path, video)
        .await
        .map_err(|e| PixtraceError::Media {
            message: "failed to write video payload to temp file".into(),
            source: Some(Box::new(e)),
        })?;

    let output = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-i")
        .arg(&input_path)
        .arg("-frames:v")
        .arg("1")
        .arg("-c:v")
        .arg("png")
        .arg(&output_path)
        .output()
        .await
        .map_err(|e| PixtraceError::Media {
            message: format!("failed to spawn ffmpeg: {e}"),
            source: Some(Box::new(e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(stderr = %stderr.trim(), "ffmpeg could not decode payload");
        return Err(PixtraceError::UnsupportedMedia {
            detail: "video payload could not be decoded".into(),
        });
    }

    let frame = tokio::fs::read(&output_path)
        .await
        .map_err(|_| PixtraceError::UnsupportedMedia {
            detail: "video contained no decodable frame".into(),
        })?;

    debug!(frame_bytes = frame.len(), "extracted first video frame");
    Ok(frame)
}

// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EXIF orientation handling.
//!
//! Several engines weight orientation in matching, so a rotated canonical
//! image is a contract violation. Orientation is read from embedded EXIF
//! metadata and baked into the pixels before the image leaves the
//! normalizer.

use std::io::Cursor;

use image::DynamicImage;

/// Reads the EXIF orientation tag from an image container, defaulting to
/// 1 (upright) when there is no EXIF data or no orientation field.
pub fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    exif::Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|data| {
            data.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Bakes an EXIF orientation value (1-8) into the pixel data.
///
/// Values outside the defined range are treated as upright, matching what
/// viewers do with corrupt orientation tags.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

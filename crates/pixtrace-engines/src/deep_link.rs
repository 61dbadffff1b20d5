// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep-link construction for engine search pages.
//!
//! Button-only engines have no programmatic query surface; their entire
//! contribution is a link to their public search page with the query
//! image URL substituted in. Queryable engines get the same link as a
//! "More results" affordance.

use url::Url;

use pixtrace_core::error::PixtraceError;

use crate::descriptor::EngineDescriptor;

/// Builds the engine's search page URL for the given query image.
///
/// The image URL is percent-encoded before substitution so query strings
/// inside it survive the engines' own parsers.
pub fn deep_link(descriptor: &EngineDescriptor, image_url: &Url) -> Result<Url, PixtraceError> {
    let encoded: String = url::form_urlencoded::byte_serialize(image_url.as_str().as_bytes())
        .collect();
    let raw = descriptor
        .search_url_template
        .replace("{query_url}", &encoded);
    Url::parse(&raw).map_err(|e| {
        PixtraceError::Internal(format!(
            "bad search url template for {}: {e}",
            descriptor.id
        ))
    })
}

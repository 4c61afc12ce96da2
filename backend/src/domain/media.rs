//! Media references and URL normalisation.
//!
//! The content backend returns upload paths in several shapes: absolute URLs
//! (external storage), origin-relative paths (`/uploads/...`) and, for older
//! records, bare file names. Everything is resolved against the configured API
//! origin before it reaches the UI.

use serde::{Deserialize, Serialize};

/// Placeholder served when a broken SVG reference cannot be displayed.
pub const SVG_PLACEHOLDER: &str = "/images/placeholder.svg";
/// Placeholder served for every other broken image.
pub const RASTER_PLACEHOLDER: &str = "/images/placeholder.png";

/// Reference to an asset hosted by the content backend.
///
/// Owned by the entity that embeds it and never mutated apart from URL
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaReference {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl MediaReference {
    /// Fully-qualified URL for this asset.
    pub fn resolve(&self, origin: &str) -> String {
        format_image_url(Some(self.url.as_str()), origin)
    }

    /// Rewrite `url` in place to its fully-qualified form.
    pub fn resolve_in_place(&mut self, origin: &str) {
        self.url = self.resolve(origin);
    }

    /// Placeholder to show if this asset fails to load.
    pub fn fallback(&self) -> &'static str {
        let named_svg = self.name.as_deref().is_some_and(looks_like_svg);
        if named_svg || looks_like_svg(&self.url) {
            SVG_PLACEHOLDER
        } else {
            RASTER_PLACEHOLDER
        }
    }

    /// Alternative text, falling back to the file name.
    pub fn alt_text(&self) -> &str {
        self.alternative_text
            .as_deref()
            .filter(|alt| !alt.trim().is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// Resolve a possibly-relative media path against `origin`.
///
/// - absolute `http(s)://` URLs pass through unchanged;
/// - paths starting with `/` are prefixed with the origin;
/// - anything else is a bare file name under `{origin}/uploads/`;
/// - empty or absent input yields an empty string.
///
/// # Examples
/// ```
/// use site_backend::domain::media::format_image_url;
///
/// let origin = "http://localhost:1337";
/// assert_eq!(
///     format_image_url(Some("/uploads/a.png"), origin),
///     "http://localhost:1337/uploads/a.png"
/// );
/// assert_eq!(format_image_url(None, origin), "");
/// ```
pub fn format_image_url(url: Option<&str>, origin: &str) -> String {
    let Some(raw) = url.filter(|value| !value.trim().is_empty()) else {
        return String::new();
    };
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_owned();
    }

    let origin = origin.trim_end_matches('/');
    if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        format!("{origin}/uploads/{raw}")
    }
}

/// Placeholder for a broken image, chosen by inspecting the URL text only.
pub fn fallback_image(original_url: &str) -> &'static str {
    if looks_like_svg(original_url) {
        SVG_PLACEHOLDER
    } else {
        RASTER_PLACEHOLDER
    }
}

fn looks_like_svg(candidate: &str) -> bool {
    candidate.to_ascii_lowercase().contains(".svg")
}

//! Adapters for the remote content API.
//!
//! Both adapters address collections below one API base (`{origin}/api`) and
//! share the reqwest error mapping helpers defined here.

mod contact_forms;
mod dto;
mod http_client;

pub use contact_forms::ContactFormsForwarder;
pub use http_client::{ContentApiClient, RequestConfig};

use reqwest::Url;

/// Failure to construct an outbound HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// `{base}/{path}` with exactly one slash between the two.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Url::parse(&format!("{base}/{path}"))
}

/// Whitespace-collapsed, truncated body text for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("http://localhost:1337/api", "homepage")]
    #[case::trailing_slash("http://localhost:1337/api/", "homepage")]
    #[case::leading_slash("http://localhost:1337/api", "/homepage")]
    fn joins_with_one_slash(#[case] base: &str, #[case] path: &str) {
        let base = Url::parse(base).expect("valid base");
        let url = endpoint_url(&base, path).expect("valid endpoint");
        assert_eq!(url.as_str(), "http://localhost:1337/api/homepage");
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(body_preview(b"  bad\n\n gateway "), "bad gateway");
        let long = "x".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}

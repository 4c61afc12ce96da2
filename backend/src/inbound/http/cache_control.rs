//! Cache-Control policies for HTTP handlers.

use std::time::Duration;

/// Probe and error responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// Shared caches may serve the response for `window` and keep serving it for
/// another `window` while revalidating in the background.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use site_backend::inbound::http::cache_control::public_revalidating;
///
/// assert_eq!(
///     public_revalidating(Duration::from_secs(86_400)),
///     "public, max-age=86400, stale-while-revalidate=86400"
/// );
/// ```
pub fn public_revalidating(window: Duration) -> String {
    let seconds = window.as_secs();
    format!("public, max-age={seconds}, stale-while-revalidate={seconds}")
}

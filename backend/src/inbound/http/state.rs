//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on domain
//! services and ports and stay testable without network I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::PageLoader;
use crate::domain::ports::ContactFormSink;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Caching page loaders.
    pub pages: PageLoader,
    /// Destination for relayed contact submissions.
    pub contact_forms: Arc<dyn ContactFormSink>,
    /// Origin that relative media URLs are resolved against.
    pub media_origin: String,
    /// Revalidation window advertised in page `Cache-Control` headers.
    pub revalidate_after: Duration,
}

impl HttpState {
    pub fn new(
        pages: PageLoader,
        contact_forms: Arc<dyn ContactFormSink>,
        media_origin: impl Into<String>,
        revalidate_after: Duration,
    ) -> Self {
        Self {
            pages,
            contact_forms,
            media_origin: media_origin.into(),
            revalidate_after,
        }
    }
}

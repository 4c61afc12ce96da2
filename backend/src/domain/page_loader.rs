//! Server-side page loaders.
//!
//! Each loader targets one fixed collection, serves the cached envelope while
//! it is fresh and otherwise fetches from the origin and re-stamps the cache.
//! Failures are logged with the collection name, never cached and never
//! retried; the caller decides whether to render a fallback.

use std::sync::Arc;

use futures_util::future::join;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::content::{
    AboutPage, ContactPage, GlobalSettings, HomePage, PageContent, PageModel, ProcessPage,
    ResolveMedia, ServicePage, WorkPage,
};
use super::ports::{Collection, ContentSource, ContentSourceError, PageCache};

/// Failure to produce a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageLoadError {
    /// The content source failed.
    #[error("loading {collection} failed: {source}")]
    Source {
        collection: Collection,
        source: ContentSourceError,
    },
    /// The envelope did not match the page model.
    #[error("decoding {collection} failed: {message}")]
    Decode {
        collection: Collection,
        message: String,
    },
}

impl PageLoadError {
    /// Collection the failing load targeted.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Source { collection, .. } | Self::Decode { collection, .. } => *collection,
        }
    }
}

/// Global settings and one page, loaded side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageBundle<P> {
    pub global: Option<GlobalSettings>,
    pub page: Option<P>,
}

impl<P: ResolveMedia> PageBundle<P> {
    /// Whether neither part could be loaded.
    pub fn is_unavailable(&self) -> bool {
        self.global.is_none() && self.page.is_none()
    }

    /// Resolve every embedded media URL against `origin`.
    pub fn resolve_media(&mut self, origin: &str) {
        self.global.resolve_media(origin);
        self.page.resolve_media(origin);
    }
}

/// Loads typed pages through a [`PageCache`].
#[derive(Clone)]
pub struct PageLoader {
    source: Arc<dyn ContentSource>,
    cache: Arc<dyn PageCache>,
}

impl PageLoader {
    pub fn new(source: Arc<dyn ContentSource>, cache: Arc<dyn PageCache>) -> Self {
        Self { source, cache }
    }

    /// Load `P`, serving the cached envelope while it is fresh.
    ///
    /// # Errors
    ///
    /// Returns [`PageLoadError`] when the origin fails or the envelope does
    /// not decode as `P`.
    pub async fn load<P: PageModel>(&self) -> Result<PageContent<P>, PageLoadError> {
        let collection = P::COLLECTION;
        if let Some(hit) = self.cache.lookup(collection) {
            debug!(%collection, fetched_at = %hit.fetched_at, "page cache hit");
            return decode(collection, hit.content);
        }
        debug!(%collection, "page cache miss");
        self.fetch_and_store(collection).await
    }

    /// Load `P` from the origin regardless of cache freshness.
    ///
    /// The fresh envelope replaces any cached entry.
    ///
    /// # Errors
    ///
    /// As for [`PageLoader::load`].
    pub async fn load_fresh<P: PageModel>(&self) -> Result<PageContent<P>, PageLoadError> {
        self.fetch_and_store(P::COLLECTION).await
    }

    /// Load global settings and `P` concurrently.
    ///
    /// Either half failing yields `None` for that half; the failure has
    /// already been logged.
    pub async fn load_bundle<P: PageModel>(&self) -> PageBundle<P> {
        let (global, page) = join(self.global_settings(), self.load::<P>()).await;
        PageBundle {
            global: global.ok().and_then(PageContent::into_data),
            page: page.ok().and_then(PageContent::into_data),
        }
    }

    async fn fetch_and_store<P: PageModel>(
        &self,
        collection: Collection,
    ) -> Result<PageContent<P>, PageLoadError> {
        let raw = self.source.fetch(collection).await.map_err(|source| {
            error!(%collection, kind = source.kind(), error = %source, "page load failed");
            PageLoadError::Source { collection, source }
        })?;
        let typed = decode::<P>(collection, raw.clone())?;
        self.cache.store(collection, raw);
        Ok(typed)
    }

    pub async fn home(&self) -> Result<PageContent<HomePage>, PageLoadError> {
        self.load().await
    }

    pub async fn about(&self) -> Result<PageContent<AboutPage>, PageLoadError> {
        self.load().await
    }

    pub async fn service(&self) -> Result<PageContent<ServicePage>, PageLoadError> {
        self.load().await
    }

    pub async fn process(&self) -> Result<PageContent<ProcessPage>, PageLoadError> {
        self.load().await
    }

    pub async fn work(&self) -> Result<PageContent<WorkPage>, PageLoadError> {
        self.load().await
    }

    pub async fn contact(&self) -> Result<PageContent<ContactPage>, PageLoadError> {
        self.load().await
    }

    pub async fn global_settings(&self) -> Result<PageContent<GlobalSettings>, PageLoadError> {
        self.load().await
    }
}

fn decode<P: PageModel>(
    collection: Collection,
    raw: PageContent<Value>,
) -> Result<PageContent<P>, PageLoadError> {
    raw.decode::<P>().map_err(|err| {
        error!(%collection, error = %err, "page decode failed");
        PageLoadError::Decode {
            collection,
            message: err.to_string(),
        }
    })
}

//! Driven port for the revalidating page cache.
//!
//! Entries are raw content envelopes stamped with their fetch time. A cache
//! returns an entry only while it is fresh; once the revalidation interval
//! has elapsed the next load goes back to the origin.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use super::content_source::Collection;
use crate::domain::content::PageContent;

/// A fetched envelope annotated with its revalidation window.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage<T = Value> {
    /// Envelope as returned by the origin.
    pub content: PageContent<T>,
    /// When the envelope was fetched.
    pub fetched_at: DateTime<Utc>,
    /// How long the envelope may be served before refetching.
    pub revalidate_after: Duration,
}

impl<T> CachedPage<T> {
    /// Instant after which the entry is stale.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let window = TimeDelta::from_std(self.revalidate_after).unwrap_or(TimeDelta::MAX);
        self.fetched_at
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the entry must be refetched at `now`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use chrono::{TimeDelta, Utc};
    /// use site_backend::domain::content::PageContent;
    /// use site_backend::domain::ports::CachedPage;
    ///
    /// let fetched_at = Utc::now();
    /// let page = CachedPage::<serde_json::Value> {
    ///     content: PageContent::empty(),
    ///     fetched_at,
    ///     revalidate_after: Duration::from_secs(60),
    /// };
    /// assert!(!page.is_stale(fetched_at + TimeDelta::seconds(59)));
    /// assert!(page.is_stale(fetched_at + TimeDelta::seconds(60)));
    /// ```
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Cache keyed by collection.
#[cfg_attr(test, mockall::automock)]
pub trait PageCache: Send + Sync {
    /// Return the entry for `collection` if it is still fresh.
    fn lookup(&self, collection: Collection) -> Option<CachedPage>;

    /// Store a freshly fetched envelope and return the stamped entry.
    fn store(&self, collection: Collection, content: PageContent<Value>) -> CachedPage;

    /// Drop any entry for `collection`.
    fn invalidate(&self, collection: Collection);
}

/// Cache that never retains anything; every load hits the origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPageCache;

impl PageCache for NoopPageCache {
    fn lookup(&self, _collection: Collection) -> Option<CachedPage> {
        None
    }

    fn store(&self, _collection: Collection, content: PageContent<Value>) -> CachedPage {
        CachedPage {
            content,
            fetched_at: Utc::now(),
            revalidate_after: Duration::ZERO,
        }
    }

    fn invalidate(&self, _collection: Collection) {}
}

//! In-process revalidating page cache.
//!
//! Entries are stamped with the injected clock when stored and served only
//! while `now < fetched_at + revalidate_after`. Stale entries are evicted on
//! lookup so the next load goes back to the origin.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mockable::Clock;
use serde_json::Value;
use tracing::debug;

use crate::domain::content::PageContent;
use crate::domain::ports::{CachedPage, Collection, PageCache};

/// [`PageCache`] keeping one envelope per collection in memory.
pub struct RevalidatingPageCache {
    entries: Mutex<HashMap<Collection, CachedPage>>,
    clock: Arc<dyn Clock>,
    revalidate_after: Duration,
}

impl RevalidatingPageCache {
    pub fn new(clock: Arc<dyn Clock>, revalidate_after: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            revalidate_after,
        }
    }

    /// Number of entries currently held, fresh or not.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Collection, CachedPage>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageCache for RevalidatingPageCache {
    fn lookup(&self, collection: Collection) -> Option<CachedPage> {
        let now = self.clock.utc();
        let mut entries = self.entries();
        let stale = entries.get(&collection)?.is_stale(now);
        if stale {
            debug!(%collection, "evicting stale page");
            entries.remove(&collection);
            return None;
        }
        entries.get(&collection).cloned()
    }

    fn store(&self, collection: Collection, content: PageContent<Value>) -> CachedPage {
        let entry = CachedPage {
            content,
            fetched_at: self.clock.utc(),
            revalidate_after: self.revalidate_after,
        };
        self.entries().insert(collection, entry.clone());
        entry
    }

    fn invalidate(&self, collection: Collection) {
        self.entries().remove(&collection);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::test_support::MutableClock;

    const WINDOW: Duration = Duration::from_secs(60);

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 6, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    #[rstest]
    fn entry_is_fresh_until_the_window_elapses(clock: Arc<MutableClock>) {
        let cache = RevalidatingPageCache::new(clock.clone(), WINDOW);
        let stored = cache.store(Collection::About, PageContent::new(json!({ "title": "About" })));
        assert_eq!(stored.expires_at(), stored.fetched_at + chrono::TimeDelta::seconds(60));

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.lookup(Collection::About), Some(stored));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.lookup(Collection::About), None);
        assert!(cache.is_empty(), "stale entry is evicted");
    }

    #[rstest]
    fn collections_are_cached_independently(clock: Arc<MutableClock>) {
        let cache = RevalidatingPageCache::new(clock, WINDOW);
        cache.store(Collection::Work, PageContent::new(json!({ "title": "Work" })));

        assert!(cache.lookup(Collection::Process).is_none());
        assert!(cache.lookup(Collection::Work).is_some());
    }

    #[rstest]
    fn restoring_restamps_the_entry(clock: Arc<MutableClock>) {
        let cache = RevalidatingPageCache::new(clock.clone(), WINDOW);
        cache.store(Collection::Homepage, PageContent::new(json!({ "title": "v1" })));
        clock.advance(Duration::from_secs(30));
        cache.store(Collection::Homepage, PageContent::new(json!({ "title": "v2" })));
        clock.advance(Duration::from_secs(45));

        let entry = cache.lookup(Collection::Homepage).expect("still fresh");
        assert_eq!(entry.content.data, Some(json!({ "title": "v2" })));
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    fn invalidate_drops_the_entry(clock: Arc<MutableClock>) {
        let cache = RevalidatingPageCache::new(clock, WINDOW);
        cache.store(Collection::Contact, PageContent::empty());
        cache.invalidate(Collection::Contact);
        assert!(cache.lookup(Collection::Contact).is_none());
    }
}

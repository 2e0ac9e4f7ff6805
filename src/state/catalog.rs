//! In-memory question catalogs with fetch timestamps.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use crate::dao::models::QuestionEntity;

/// Value remembered together with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// Cached value.
    pub value: T,
    /// When `value` was fetched.
    pub fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Stamp `value` with the current instant.
    pub fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    /// Whether the entry is younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Per-show question catalogs, replaced wholesale on refresh.
///
/// Expired entries are kept: they are still served when a refresh fails.
pub struct CatalogCache {
    entries: DashMap<String, CacheEntry<Vec<QuestionEntity>>>,
    ttl: Duration,
}

impl CatalogCache {
    /// Empty cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Catalog of `show_id` if it was fetched less than one ttl ago.
    pub fn fresh(&self, show_id: &str) -> Option<Vec<QuestionEntity>> {
        self.entries
            .get(show_id)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Last catalog fetched for `show_id`, however old.
    pub fn last_known(&self, show_id: &str) -> Option<Vec<QuestionEntity>> {
        self.entries.get(show_id).map(|entry| entry.value.clone())
    }

    /// Store `questions` as the catalog of `show_id`, fetched now.
    pub fn replace(&self, show_id: &str, questions: Vec<QuestionEntity>) {
        self.entries.insert(show_id.to_owned(), CacheEntry::new(questions));
    }

    /// Drop the entry of `show_id`, returning whether one existed.
    pub fn invalidate(&self, show_id: &str) -> bool {
        self.entries.remove(show_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> QuestionEntity {
        QuestionEntity {
            id: id.into(),
            text: format!("question {id}"),
            options: Vec::new(),
            correct: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_but_stay_available() {
        let cache = CatalogCache::new(Duration::from_secs(300));
        cache.replace("show", vec![question("q1")]);
        assert!(cache.fresh("show").is_some());

        tokio::time::advance(Duration::from_secs(300)).await;

        assert!(cache.fresh("show").is_none());
        assert_eq!(cache.last_known("show").unwrap()[0].id, "q1");
    }

    #[test]
    fn invalidate_reports_whether_an_entry_existed() {
        let cache = CatalogCache::new(Duration::from_secs(300));
        cache.replace("show", vec![question("q1")]);

        assert!(cache.invalidate("show"));
        assert!(!cache.invalidate("show"));
        assert!(cache.last_known("show").is_none());
    }
}

//! The persisted set of watched (completed) tutorial videos.
//!
//! Stored as a JSON array of ids under a single key of a [`KvStore`].
//! A missing or unreadable entry loads as an empty set. Ids of videos that
//! no longer exist in the catalog are kept as-is.

use anyhow::Result;
use std::collections::HashSet;

use crate::storage::KvStore;

/// Storage key for the watched list.
pub const WATCHED_KEY: &str = "watched-videos";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedSet {
    ids: HashSet<String>,
}

impl WatchedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Mark `id` as watched. Returns `true` if it was not already.
    pub fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Flip membership of `id` and return the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Ids in sorted order.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of watched ids that are in `known`.
    pub fn count_known<'a>(&self, known: impl IntoIterator<Item = &'a str>) -> usize {
        known.into_iter().filter(|id| self.contains(id)).count()
    }

    /// Load the set from `store`.
    ///
    /// Missing key → empty set. Malformed JSON → empty set with a warning;
    /// the bad value is overwritten on the next save.
    pub async fn load<S: KvStore>(store: &S) -> Result<Self> {
        let Some(raw) = store.get(WATCHED_KEY).await? else {
            tracing::debug!("No watched list stored, starting empty");
            return Ok(Self::default());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), "Loaded watched list");
                Ok(Self {
                    ids: ids.into_iter().collect(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored watched list is malformed, starting empty");
                Ok(Self::default())
            }
        }
    }

    /// Persist the set to `store` as a sorted JSON array.
    pub async fn save<S: KvStore>(&self, store: &S) -> Result<()> {
        let json = serde_json::to_string(&self.sorted_ids())?;
        store.set(WATCHED_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut set = WatchedSet::new();
        assert!(set.toggle("2"));
        assert!(set.contains("2"));
        assert!(!set.toggle("2"));
        assert!(!set.contains("2"));
    }

    #[test]
    fn toggle_only_touches_one_id() {
        let mut set = WatchedSet::new();
        set.insert("1");
        set.toggle("2");
        set.toggle("2");
        assert!(set.contains("1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = WatchedSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
    }

    #[test]
    fn count_known_ignores_stale_ids() {
        let mut set = WatchedSet::new();
        set.insert("1");
        set.insert("removed-video");
        assert_eq!(set.count_known(["1", "2", "3"]), 1);
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        let set = WatchedSet::load(&store).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn malformed_value_loads_empty() {
        let store = MemoryStore::new();
        store.set(WATCHED_KEY, "{not json").await.unwrap();
        let set = WatchedSet::load(&store).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn save_writes_sorted_json() {
        let store = MemoryStore::new();
        let mut set = WatchedSet::new();
        set.insert("3");
        set.insert("1");
        set.save(&store).await.unwrap();

        let raw = store.get(WATCHED_KEY).await.unwrap();
        assert_eq!(raw.as_deref(), Some(r#"["1","3"]"#));

        let loaded = WatchedSet::load(&store).await.unwrap();
        assert_eq!(loaded, set);
    }
}

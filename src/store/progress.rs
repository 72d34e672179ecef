use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::app::Result;
use crate::domain::Topic;
use crate::store::KvStore;

/// Key for the id → done mapping.
pub const DONE_KEY: &str = "topics_done_v1";
/// Key for the id → completed-at (milliseconds or null) mapping.
pub const COMPLETED_AT_KEY: &str = "topics_completed_at_v1";

/// Persists completion progress as two parallel mappings keyed by topic id.
///
/// Read once at startup to hydrate the working set, rewritten in full after
/// every toggle. The two maps are merged independently: a topic id present
/// in only one of them gets only that field overwritten.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KvStore + Send + Sync>,
}

impl ProgressStore {
    pub fn new(kv: Arc<dyn KvStore + Send + Sync>) -> Self {
        Self { kv }
    }

    /// Merge persisted done/completed-at state into `topics`.
    ///
    /// Ids absent from a mapping leave that topic field untouched; a
    /// malformed persisted document counts as an empty mapping.
    pub fn load(&self, topics: &mut [Topic]) -> Result<()> {
        let done_map: HashMap<String, bool> = self.read_map(DONE_KEY)?;
        let when_map: HashMap<String, Option<i64>> = self.read_map(COMPLETED_AT_KEY)?;

        for topic in topics {
            if let Some(done) = done_map.get(&topic.id) {
                topic.done = *done;
            }
            if let Some(when) = when_map.get(&topic.id) {
                topic.completed_at = when.and_then(|ms| Utc.timestamp_millis_opt(ms).single());
            }
        }
        Ok(())
    }

    /// Recompute both mappings from the working set and write them back.
    pub fn save(&self, topics: &[Topic]) -> Result<()> {
        let done_map: HashMap<&str, bool> =
            topics.iter().map(|t| (t.id.as_str(), t.done)).collect();
        let when_map: HashMap<&str, Option<i64>> = topics
            .iter()
            .map(|t| (t.id.as_str(), t.completed_at.map(|d| d.timestamp_millis())))
            .collect();

        self.kv.set(DONE_KEY, &serde_json::to_string(&done_map)?)?;
        self.kv.set(COMPLETED_AT_KEY, &serde_json::to_string(&when_map)?)?;
        Ok(())
    }

    fn read_map<T: DeserializeOwned>(&self, key: &str) -> Result<HashMap<String, T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(HashMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding malformed progress record");
                Ok(HashMap::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use chrono::TimeZone;

    fn store() -> (ProgressStore, Arc<SqliteStore>) {
        let sqlite = Arc::new(SqliteStore::in_memory().unwrap());
        (ProgressStore::new(sqlite.clone()), sqlite)
    }

    fn sample() -> Vec<Topic> {
        let mut done = Topic::new("Cat", "Animals");
        done.done = true;
        done.completed_at = Utc.timestamp_millis_opt(1_700_000_000_000).single();
        vec![done, Topic::new("Apple", "Food"), Topic::new("Dragon", "Fantasy")]
    }

    #[test]
    fn test_round_trip() {
        let (progress, _) = store();
        let topics = sample();
        progress.save(&topics).unwrap();

        // Fresh defaults with the same ids pick up the saved state
        let mut reloaded: Vec<Topic> = vec![
            Topic::new("Cat", "Animals"),
            Topic::new("Apple", "Food"),
            Topic::new("Dragon", "Fantasy"),
        ];
        progress.load(&mut reloaded).unwrap();

        for (orig, back) in topics.iter().zip(&reloaded) {
            assert_eq!(orig.done, back.done, "{}", orig.title);
            assert_eq!(orig.completed_at, back.completed_at, "{}", orig.title);
        }
    }

    #[test]
    fn test_absent_ids_keep_defaults() {
        let (progress, _) = store();
        progress.save(&sample()).unwrap();

        let mut unknown = vec![Topic::new("Oak Tree", "Nature")];
        progress.load(&mut unknown).unwrap();
        assert!(!unknown[0].done);
        assert!(unknown[0].completed_at.is_none());
    }

    #[test]
    fn test_missing_records_are_noop() {
        let (progress, _) = store();
        let mut topics = sample();
        let before = topics.clone();
        progress.load(&mut topics).unwrap();
        assert_eq!(topics, before);
    }

    #[test]
    fn test_malformed_records_treated_as_empty() {
        let (progress, sqlite) = store();
        sqlite.set(DONE_KEY, "{not json").unwrap();
        sqlite.set(COMPLETED_AT_KEY, "[1,2,3]").unwrap();

        let mut topics = sample();
        let before = topics.clone();
        progress.load(&mut topics).unwrap();
        assert_eq!(topics, before);
    }

    #[test]
    fn test_maps_merge_independently() {
        let (progress, sqlite) = store();
        let id = Topic::new("Cat", "Animals").id;
        sqlite
            .set(DONE_KEY, &format!(r#"{{"{}":true}}"#, id))
            .unwrap();

        let mut topics = vec![Topic::new("Cat", "Animals")];
        progress.load(&mut topics).unwrap();
        // done overwritten, completed_at untouched (no completed-at record)
        assert!(topics[0].done);
        assert!(topics[0].completed_at.is_none());
    }
}

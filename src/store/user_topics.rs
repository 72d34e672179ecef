use std::sync::Arc;

use crate::app::Result;
use crate::domain::Topic;
use crate::store::KvStore;

/// Key for the ordered list of user-added topics.
pub const USER_TOPICS_KEY: &str = "user_topics_v1";

/// Persists topics the user added locally, as one ordered JSON array.
///
/// The list is owned entirely by this client: loaded once at startup (and
/// appended after the ingested base list) and rewritten in full whenever a
/// topic is added.
#[derive(Clone)]
pub struct UserTopicStore {
    kv: Arc<dyn KvStore + Send + Sync>,
}

impl UserTopicStore {
    pub fn new(kv: Arc<dyn KvStore + Send + Sync>) -> Self {
        Self { kv }
    }

    /// The persisted list; empty on missing or malformed data.
    pub fn load(&self) -> Result<Vec<Topic>> {
        let Some(raw) = self.kv.get(USER_TOPICS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(topics) => Ok(topics),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed user-topic record");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the full persisted list.
    pub fn save(&self, topics: &[Topic]) -> Result<()> {
        self.kv.set(USER_TOPICS_KEY, &serde_json::to_string(topics)?)
    }

    /// Load, append, save.
    pub fn add(&self, topic: &Topic) -> Result<()> {
        let mut topics = self.load()?;
        topics.push(topic.clone());
        self.save(&topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn store() -> (UserTopicStore, Arc<SqliteStore>) {
        let sqlite = Arc::new(SqliteStore::in_memory().unwrap());
        (UserTopicStore::new(sqlite.clone()), sqlite)
    }

    #[test]
    fn test_empty_when_missing() {
        let (user_topics, _) = store();
        assert!(user_topics.load().unwrap().is_empty());
    }

    #[test]
    fn test_empty_when_malformed() {
        let (user_topics, sqlite) = store();
        sqlite.set(USER_TOPICS_KEY, "{\"oops\":").unwrap();
        assert!(user_topics.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_appends_in_order() {
        let (user_topics, _) = store();
        user_topics.add(&Topic::new("Cat", "Animals")).unwrap();
        user_topics.add(&Topic::new("Apple", "Food")).unwrap();

        let loaded = user_topics.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "Cat");
        assert_eq!(loaded[1].title, "Apple");
    }

    #[test]
    fn test_save_overwrites() {
        let (user_topics, _) = store();
        user_topics.add(&Topic::new("Cat", "Animals")).unwrap();
        user_topics.save(&[]).unwrap();
        assert!(user_topics.load().unwrap().is_empty());
    }
}

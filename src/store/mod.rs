pub mod progress;
pub mod sqlite;
pub mod user_topics;

use crate::app::Result;

pub use progress::ProgressStore;
pub use sqlite::SqliteStore;
pub use user_topics::UserTopicStore;

/// String key-value persistence, the analogue of browser local storage.
///
/// The system uses exactly three keys: the done mapping, the completed-at
/// mapping, and the user-topic list. Values are JSON documents; reading a
/// key that was never written yields `None`.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

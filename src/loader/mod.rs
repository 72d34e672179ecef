pub mod file_loader;

use async_trait::async_trait;

pub use file_loader::FileLoader;

/// Name of the preferred JSON topic source.
pub const TOPICS_JSON: &str = "topics.json";
/// Name of the delimited-text fallback source.
pub const TOPICS_CSV: &str = "topics.csv";

/// Raw text source for topic data.
///
/// `None` means the resource is absent or unreadable; callers treat that as
/// "try the next source", never as a hard failure. Implementations must not
/// cache: each call is a fresh read.
#[async_trait]
pub trait Loader {
    async fn load_text(&self, name: &str) -> Option<String>;
}

use std::path::PathBuf;

use async_trait::async_trait;

use crate::loader::Loader;

/// Loads topic sources from a local data directory.
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn load_text(&self, name: &str) -> Option<String> {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "topic source not readable");
                None
            }
        }
    }
}

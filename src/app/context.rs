use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{EaselError, Result};
use crate::ingest::Ingestor;
use crate::loader::file_loader::FileLoader;
use crate::loader::Loader;
use crate::store::progress::ProgressStore;
use crate::store::sqlite::SqliteStore;
use crate::store::user_topics::UserTopicStore;
use crate::store::KvStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub loader: Arc<dyn Loader + Send + Sync>,
    pub ingestor: Ingestor,
    pub progress: ProgressStore,
    pub user_topics: UserTopicStore,
}

impl AppContext {
    /// Wire up the context against the filesystem.
    ///
    /// `data_dir` is where topics.json / topics.csv are looked up (defaults
    /// to the current directory, mirroring the "files next to the page"
    /// layout of the original data set). `db_path` defaults to the platform
    /// data directory.
    pub fn new(data_dir: Option<PathBuf>, db_path: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from("."));
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let loader: Arc<dyn Loader + Send + Sync> = Arc::new(FileLoader::new(data_dir));
        Ok(Self::assemble(store, loader))
    }

    /// Context backed by an in-memory database, for tests.
    pub fn in_memory(loader: Arc<dyn Loader + Send + Sync>) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Ok(Self::assemble(store, loader))
    }

    fn assemble(store: Arc<SqliteStore>, loader: Arc<dyn Loader + Send + Sync>) -> Self {
        let kv: Arc<dyn KvStore + Send + Sync> = store.clone();
        Self {
            store,
            loader,
            ingestor: Ingestor::new(),
            progress: ProgressStore::new(kv.clone()),
            user_topics: UserTopicStore::new(kv),
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| EaselError::Config("Could not find data directory".into()))?;
        let easel_dir = data_dir.join("easel");
        std::fs::create_dir_all(&easel_dir)?;
        Ok(easel_dir.join("easel.db"))
    }
}

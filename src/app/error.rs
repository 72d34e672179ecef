use thiserror::Error;

#[derive(Error, Debug)]
pub enum EaselError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No topic data: neither topics.json nor topics.csv could be loaded")]
    NoTopicData,

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Topic title must not be empty")]
    EmptyTitle,

    #[error("Topic category must not be empty")]
    EmptyCategory,

    #[error("Topic \"{title}\" already exists in category \"{category}\"")]
    DuplicateTopic { title: String, category: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EaselError>;

pub mod topic;

pub use topic::{topic_id, Topic};

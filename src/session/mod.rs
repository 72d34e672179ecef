use chrono::{DateTime, Utc};

use crate::app::{AppContext, EaselError, Result};
use crate::domain::{topic_id, Topic};
use crate::loader::{TOPICS_CSV, TOPICS_JSON};
use crate::picker;
use crate::query::{self, Query, QueryView};
use crate::store::progress::ProgressStore;
use crate::store::user_topics::UserTopicStore;

/// Which source the base topic set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    Delimited,
}

/// The owned in-memory topic list for one run of the program.
///
/// This is the single mutable source of truth: the persisted progress and
/// user-topic records are derived snapshots, rewritten after every mutation
/// and read only here, at load time. Order is insertion order: base-source
/// topics first, then user-added topics.
pub struct Session {
    topics: Vec<Topic>,
    progress: ProgressStore,
    user_topics: UserTopicStore,
    pub source: Option<SourceKind>,
}

impl Session {
    /// Load the working set: ingest the base list (JSON preferred, delimited
    /// text as fallback), merge persisted progress into it, then append the
    /// user-added topics.
    pub async fn load(ctx: &AppContext) -> Result<Self> {
        let (mut topics, source) = Self::ingest(ctx).await?;
        ctx.progress.load(&mut topics)?;
        topics.extend(ctx.user_topics.load()?);
        tracing::debug!(count = topics.len(), ?source, "session loaded");
        Ok(Self {
            topics,
            progress: ctx.progress.clone(),
            user_topics: ctx.user_topics.clone(),
            source: Some(source),
        })
    }

    /// A session with no topic data at all, for the terminal "neither
    /// source found" state. The interface stays usable but empty.
    pub fn empty(ctx: &AppContext) -> Self {
        Self {
            topics: Vec::new(),
            progress: ctx.progress.clone(),
            user_topics: ctx.user_topics.clone(),
            source: None,
        }
    }

    async fn ingest(ctx: &AppContext) -> Result<(Vec<Topic>, SourceKind)> {
        if let Some(body) = ctx.loader.load_text(TOPICS_JSON).await {
            if let Some(topics) = ctx.ingestor.normalize_json(&body) {
                return Ok((topics, SourceKind::Json));
            }
        }
        if let Some(body) = ctx.loader.load_text(TOPICS_CSV).await {
            return Ok((ctx.ingestor.parse_delimited(&body), SourceKind::Delimited));
        }
        Err(EaselError::NoTopicData)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn find(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Display name of the source the base set was loaded from.
    pub fn source_label(&self) -> &'static str {
        match self.source {
            Some(SourceKind::Json) => TOPICS_JSON,
            Some(SourceKind::Delimited) => TOPICS_CSV,
            None => "no source",
        }
    }

    /// Derive the filtered/sorted view for display.
    pub fn query(&self, query: &Query) -> QueryView {
        query::run(&self.topics, query, Utc::now())
    }

    pub fn pick(&self) -> Option<&Topic> {
        picker::pick(&self.topics)
    }

    /// Flip a topic's done flag, stamping or clearing `completed_at`, and
    /// persist the full progress record.
    pub fn toggle_done(&mut self, id: &str) -> Result<Topic> {
        self.toggle_done_at(id, Utc::now())
    }

    fn toggle_done_at(&mut self, id: &str, now: DateTime<Utc>) -> Result<Topic> {
        let index = self
            .topics
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| EaselError::TopicNotFound(id.to_string()))?;

        {
            let topic = &mut self.topics[index];
            topic.done = !topic.done;
            topic.completed_at = topic.done.then_some(now);
        }
        self.progress.save(&self.topics)?;
        Ok(self.topics[index].clone())
    }

    /// Add a user topic: validate, reject id collisions with the working
    /// set, persist to the user-topic record, append in-memory.
    pub fn add_topic(&mut self, title: &str, category: &str) -> Result<Topic> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EaselError::EmptyTitle);
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(EaselError::EmptyCategory);
        }

        let id = topic_id(title, category);
        if self.topics.iter().any(|t| t.id == id) {
            return Err(EaselError::DuplicateTopic {
                title: title.to_string(),
                category: category.to_string(),
            });
        }

        let topic = Topic::new(title, category);
        self.user_topics.add(&topic)?;
        self.topics.push(topic.clone());
        Ok(topic)
    }
}

/// Resolve the effective category for an add: a freshly typed name wins
/// over a chosen existing one.
pub fn resolve_category(existing: Option<&str>, new_name: Option<&str>) -> String {
    new_name
        .filter(|n| !n.trim().is_empty())
        .or(existing)
        .unwrap_or("")
        .trim()
        .to_string()
}

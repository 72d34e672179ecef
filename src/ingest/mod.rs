use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::domain::{topic_id, Topic};

/// Turns raw topic-source text into a normalized topic list.
///
/// Two source formats exist: a JSON array of topic objects, and a pivoted
/// delimited-text table whose header row names categories and whose data
/// cells are titles. Neither path ever fails hard: unusable JSON reports
/// `None` so the caller can fall back, and malformed delimited text just
/// yields fewer topics.
#[derive(Clone)]
pub struct Ingestor;

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

impl Ingestor {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a JSON array of topic objects.
    ///
    /// Returns `None` when the body is not parseable JSON or not an array;
    /// the caller treats that the same as an absent source. Individual
    /// elements degrade field by field: missing title/category become empty
    /// strings, a missing or empty id is synthesized from title+category,
    /// `done` defaults to false and `completedAt` to null.
    pub fn normalize_json(&self, body: &str) -> Option<Vec<Topic>> {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "topics.json did not parse");
                return None;
            }
        };
        let array = value.as_array()?;

        let topics = array
            .iter()
            .map(|entry| {
                let title = str_field(entry, "title");
                let category = str_field(entry, "category");
                let id = match entry.get("id").and_then(Value::as_str) {
                    Some(id) if !id.is_empty() => id.to_string(),
                    _ => topic_id(&title, &category),
                };
                let done = entry.get("done").and_then(Value::as_bool).unwrap_or(false);
                let completed_at = entry
                    .get("completedAt")
                    .and_then(Value::as_i64)
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
                Topic {
                    id,
                    title,
                    category,
                    done,
                    completed_at,
                }
            })
            .collect();

        Some(topics)
    }

    /// Parse pivoted delimited text: one column per category.
    ///
    /// The first non-blank line is the header row of category names. The
    /// delimiter is a tab if the header contains one, otherwise a comma.
    /// Every non-empty cell in the data rows becomes one topic; short rows
    /// are treated as padded with empty cells.
    pub fn parse_delimited(&self, text: &str) -> Vec<Topic> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let Some(header) = lines.first() else {
            return Vec::new();
        };

        let delim = if header.contains('\t') { '\t' } else { ',' };
        let categories: Vec<String> = header.split(delim).map(|s| s.trim().to_string()).collect();

        let mut out = Vec::new();
        for line in &lines[1..] {
            let cells: Vec<&str> = line.split(delim).collect();
            for (col, category) in categories.iter().enumerate() {
                let title = cells.get(col).map(|c| c.trim()).unwrap_or("");
                if title.is_empty() {
                    continue;
                }
                out.push(Topic {
                    id: topic_id(title, category),
                    title: title.to_string(),
                    category: category.clone(),
                    done: false,
                    completed_at: None,
                });
            }
        }
        out
    }
}

fn str_field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single drawable prompt: title, category, completion state.
///
/// Serializes to the on-disk shape used by both the `topics.json` source
/// format and the persisted user-topic record: camelCase field names with
/// `completedAt` as milliseconds since epoch, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Topic {
    /// Create a fresh, not-yet-done topic with a derived id.
    pub fn new(title: &str, category: &str) -> Self {
        let title = title.trim().to_string();
        let category = category.trim().to_string();
        let id = topic_id(&title, &category);
        Self {
            id,
            title,
            category,
            done: false,
            completed_at: None,
        }
    }
}

/// Derive the stable identifier for a `(title, category)` pair.
///
/// 32-bit FNV-1a over the UTF-16 code units of `title + "|" + category`,
/// rendered as `"t"` plus the hash in lowercase base 36. This is the join
/// key between ingested topics, the progress record, and user-added topics,
/// so it must not change between sessions.
pub fn topic_id(title: &str, category: &str) -> String {
    let mut hash: u32 = 0x811C_9DC5;
    for unit in title
        .encode_utf16()
        .chain("|".encode_utf16())
        .chain(category.encode_utf16())
    {
        hash ^= u32::from(unit);
        hash = hash.wrapping_mul(16_777_619);
    }
    format!("t{}", to_base36(hash))
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_deterministic() {
        let id1 = topic_id("Sunset", "Landscapes");
        let id2 = topic_id("Sunset", "Landscapes");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_order_sensitive() {
        // "A|B" and "B|A" hash the same concatenated length but must differ
        assert_ne!(topic_id("A", "B"), topic_id("B", "A"));
    }

    #[test]
    fn test_id_reference_values() {
        // Vectors computed from the reference FNV-1a/base-36 algorithm
        assert_eq!(topic_id("Cat", "Animals"), "t1mvtwzq");
        assert_eq!(topic_id("Apple", "Food"), "ty19hh9");
        assert_eq!(topic_id("A", "B"), "ttx8lxy");
        assert_eq!(topic_id("B", "A"), "t1xbjke");
    }

    #[test]
    fn test_id_shape() {
        let id = topic_id("Oak Tree", "Nature");
        assert!(id.starts_with('t'));
        assert!(id[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_new_trims_and_hashes() {
        let topic = Topic::new("  Dragon ", " Fantasy ");
        assert_eq!(topic.title, "Dragon");
        assert_eq!(topic.category, "Fantasy");
        assert_eq!(topic.id, topic_id("Dragon", "Fantasy"));
        assert!(!topic.done);
        assert!(topic.completed_at.is_none());
    }

    #[test]
    fn test_serde_wire_format() {
        let mut topic = Topic::new("Cat", "Animals");
        topic.done = true;
        topic.completed_at = Utc.timestamp_millis_opt(1_700_000_000_000).single();

        let json = serde_json::to_string(&topic).unwrap();
        assert!(json.contains("\"completedAt\":1700000000000"));

        let back: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topic);
    }

    #[test]
    fn test_serde_null_and_missing_completed_at() {
        let with_null: Topic =
            serde_json::from_str(r#"{"id":"t1","title":"Cat","category":"Animals","done":false,"completedAt":null}"#)
                .unwrap();
        assert!(with_null.completed_at.is_none());

        let missing: Topic =
            serde_json::from_str(r#"{"id":"t1","title":"Cat"}"#).unwrap();
        assert!(missing.completed_at.is_none());
        assert!(!missing.done);
        assert_eq!(missing.category, "");
    }
}

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local, Utc};
use clap::ValueEnum;

use crate::domain::Topic;

/// Restricts visible topics to those completed within a relative window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateWindow {
    /// All topics regardless of completion date
    #[default]
    All,
    /// Completed today (local calendar day)
    Today,
    /// Completed within the last 7 days
    #[value(name = "7d")]
    Last7Days,
    /// Completed within the last 30 days
    #[value(name = "30d")]
    Last30Days,
    /// Never completed
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Most recently completed first, uncompleted last
    #[default]
    DateDesc,
    /// Least recently completed first, uncompleted last
    DateAsc,
    /// Title A → Z
    Alpha,
    /// Title Z → A
    AlphaDesc,
    /// Category A → Z, then title
    Category,
}

/// Filter and sort parameters for one view of the topic list.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub window: DateWindow,
    pub category: Option<String>,
    pub search: String,
    pub sort: SortMode,
}

/// An ordered view plus the category options observed while building it.
#[derive(Debug, Clone, Default)]
pub struct QueryView {
    pub topics: Vec<Topic>,
    pub categories: Vec<String>,
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::DateDesc => "date-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::Alpha => "alpha",
            SortMode::AlphaDesc => "alpha-desc",
            SortMode::Category => "category",
        };
        f.write_str(name)
    }
}

impl DateWindow {
    pub fn label(self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Today => "today",
            DateWindow::Last7Days => "7d",
            DateWindow::Last30Days => "30d",
            DateWindow::Never => "never",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DateWindow::All => DateWindow::Today,
            DateWindow::Today => DateWindow::Last7Days,
            DateWindow::Last7Days => DateWindow::Last30Days,
            DateWindow::Last30Days => DateWindow::Never,
            DateWindow::Never => DateWindow::All,
        }
    }
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::DateDesc => "date ↓",
            SortMode::DateAsc => "date ↑",
            SortMode::Alpha => "title a-z",
            SortMode::AlphaDesc => "title z-a",
            SortMode::Category => "category",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortMode::DateDesc => SortMode::DateAsc,
            SortMode::DateAsc => SortMode::Alpha,
            SortMode::Alpha => SortMode::AlphaDesc,
            SortMode::AlphaDesc => SortMode::Category,
            SortMode::Category => SortMode::DateDesc,
        }
    }
}

/// Run the fixed filter pipeline: date window, then category-option
/// rebuild from the date-filtered subset, then search + category match,
/// then sort. The input list is never mutated.
pub fn run(topics: &[Topic], query: &Query, now: DateTime<Utc>) -> QueryView {
    let windowed: Vec<&Topic> = topics
        .iter()
        .filter(|t| in_window(t, query.window, now))
        .collect();

    let categories = category_options(windowed.iter().copied());

    let matched: Vec<Topic> = windowed
        .into_iter()
        .filter(|t| matches_search(t, &query.search))
        .filter(|t| {
            query
                .category
                .as_deref()
                .is_none_or(|c| t.category == c)
        })
        .cloned()
        .collect();

    QueryView {
        topics: sorted(&matched, query.sort),
        categories,
    }
}

fn in_window(topic: &Topic, window: DateWindow, now: DateTime<Utc>) -> bool {
    match window {
        DateWindow::All => true,
        DateWindow::Today => topic.done && completed_today(topic, now),
        DateWindow::Last7Days => topic.done && completed_within(topic, 7, now),
        DateWindow::Last30Days => topic.done && completed_within(topic, 30, now),
        DateWindow::Never => !topic.done || topic.completed_at.is_none(),
    }
}

fn completed_today(topic: &Topic, now: DateTime<Utc>) -> bool {
    topic.completed_at.is_some_and(|ts| {
        ts.with_timezone(&Local).date_naive() == now.with_timezone(&Local).date_naive()
    })
}

fn completed_within(topic: &Topic, days: i64, now: DateTime<Utc>) -> bool {
    topic
        .completed_at
        .is_some_and(|ts| now.signed_duration_since(ts) <= Duration::days(days))
}

/// Distinct non-empty categories, sorted, from `topics`.
pub fn category_options<'a, I>(topics: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Topic>,
{
    let set: BTreeSet<&str> = topics
        .into_iter()
        .map(|t| t.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().map(String::from).collect()
}

fn matches_search(topic: &Topic, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    format!("{} {}", topic.title, topic.category)
        .to_lowercase()
        .contains(&q)
}

/// Sort a copy of `items` under the given mode.
///
/// Every mode is a total order: the date modes sink uncompleted topics to
/// the bottom and break undated ties by case-sensitive title; the category
/// mode breaks ties by case-insensitive title.
pub fn sorted(items: &[Topic], mode: SortMode) -> Vec<Topic> {
    let mut out = items.to_vec();
    match mode {
        SortMode::DateDesc => out.sort_by(|a, b| cmp_by_date(a, b, true)),
        SortMode::DateAsc => out.sort_by(|a, b| cmp_by_date(a, b, false)),
        SortMode::Alpha => out.sort_by(|a, b| cmp_title_ci(a, b)),
        SortMode::AlphaDesc => out.sort_by(|a, b| cmp_title_ci(b, a)),
        SortMode::Category => out.sort_by(|a, b| {
            a.category
                .to_lowercase()
                .cmp(&b.category.to_lowercase())
                .then_with(|| cmp_title_ci(a, b))
        }),
    }
    out
}

fn cmp_by_date(a: &Topic, b: &Topic, newest_first: bool) -> Ordering {
    match (a.completed_at, b.completed_at) {
        (None, None) => a.title.cmp(&b.title),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(da), Some(db)) => {
            if newest_first {
                db.cmp(&da)
            } else {
                da.cmp(&db)
            }
        }
    }
}

fn cmp_title_ci(a: &Topic, b: &Topic) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn topic(title: &str, category: &str) -> Topic {
        Topic::new(title, category)
    }

    fn completed(title: &str, category: &str, ms: i64) -> Topic {
        let mut t = Topic::new(title, category);
        t.done = true;
        t.completed_at = Utc.timestamp_millis_opt(ms).single();
        t
    }

    fn titles(topics: &[Topic]) -> Vec<&str> {
        topics.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_window_never() {
        let mut done_no_stamp = topic("B", "");
        done_no_stamp.done = true;
        let topics = vec![
            topic("A", ""),
            done_no_stamp,
            completed("C", "", 1_700_000_000_000),
        ];
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();

        let kept: Vec<&Topic> = topics
            .iter()
            .filter(|t| in_window(t, DateWindow::Never, now))
            .collect();
        assert_eq!(
            kept.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_window_excludes_not_done_with_stamp() {
        // A stale timestamp on a not-done topic must not leak into windows
        let mut t = completed("A", "", 1_700_000_000_000);
        t.done = false;
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
        assert!(!in_window(&t, DateWindow::Today, now));
        assert!(!in_window(&t, DateWindow::Last7Days, now));
        assert!(in_window(&t, DateWindow::Never, now));
    }

    #[test]
    fn test_window_last_7_days() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
        let day = 24 * 60 * 60 * 1000;
        let recent = completed("recent", "", 1_700_000_000_000 - 3 * day);
        let old = completed("old", "", 1_700_000_000_000 - 10 * day);

        assert!(in_window(&recent, DateWindow::Last7Days, now));
        assert!(!in_window(&old, DateWindow::Last7Days, now));
        assert!(in_window(&old, DateWindow::Last30Days, now));
    }

    #[test]
    fn test_window_today_local_day() {
        let now = Utc::now();
        let earlier_today = now - Duration::minutes(1);
        let mut t = topic("A", "");
        t.done = true;
        t.completed_at = Some(earlier_today);
        assert!(in_window(&t, DateWindow::Today, now));

        t.completed_at = Some(now - Duration::days(2));
        assert!(!in_window(&t, DateWindow::Today, now));
    }

    #[test]
    fn test_sort_date_desc_spec_example() {
        // completedAt [200, null, 100], titles [B, A, C] → B(200), C(100), A
        let topics = vec![
            completed("B", "", 200),
            topic("A", ""),
            completed("C", "", 100),
        ];
        let out = sorted(&topics, SortMode::DateDesc);
        assert_eq!(titles(&out), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_date_asc_undated_still_last() {
        let topics = vec![
            completed("B", "", 200),
            topic("A", ""),
            completed("C", "", 100),
        ];
        let out = sorted(&topics, SortMode::DateAsc);
        assert_eq!(titles(&out), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_undated_ties_by_title() {
        let topics = vec![topic("banana", ""), topic("Apple", "")];
        let out = sorted(&topics, SortMode::DateDesc);
        // Case-sensitive tie-break: 'A' < 'b'
        assert_eq!(titles(&out), vec!["Apple", "banana"]);
    }

    #[test]
    fn test_sort_alpha_case_insensitive() {
        let topics = vec![topic("banana", ""), topic("Apple", ""), topic("cherry", "")];
        assert_eq!(
            titles(&sorted(&topics, SortMode::Alpha)),
            vec!["Apple", "banana", "cherry"]
        );
        assert_eq!(
            titles(&sorted(&topics, SortMode::AlphaDesc)),
            vec!["cherry", "banana", "Apple"]
        );
    }

    #[test]
    fn test_sort_category_empty_first() {
        let topics = vec![
            topic("Zebra", "animals"),
            topic("Lone", ""),
            topic("Apple", "Food"),
            topic("Cat", "Animals"),
        ];
        let out = sorted(&topics, SortMode::Category);
        assert_eq!(titles(&out), vec!["Lone", "Cat", "Zebra", "Apple"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let topics = vec![topic("b", ""), topic("a", "")];
        let _ = sorted(&topics, SortMode::Alpha);
        assert_eq!(titles(&topics), vec!["b", "a"]);
    }

    #[test]
    fn test_search_title_and_category() {
        let t = topic("Oak Tree", "Nature");
        assert!(matches_search(&t, ""));
        assert!(matches_search(&t, "  "));
        assert!(matches_search(&t, "oak"));
        assert!(matches_search(&t, "NATURE"));
        assert!(matches_search(&t, "tree nat")); // spans the joined string
        assert!(!matches_search(&t, "maple"));
    }

    #[test]
    fn test_category_options_distinct_sorted_non_empty() {
        let topics = vec![
            topic("a", "Food"),
            topic("b", ""),
            topic("c", "Animals"),
            topic("d", "Food"),
        ];
        assert_eq!(category_options(&topics), vec!["Animals", "Food"]);
    }

    #[test]
    fn test_run_pipeline_order() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
        let topics = vec![
            completed("Cat", "Animals", 1_700_000_000_000 - 1000),
            completed("Apple", "Food", 1_700_000_000_000 - 2000),
            topic("Dragon", "Fantasy"),
        ];

        // Window filters Dragon out first, so Fantasy is not offered as a
        // category option even though it matches no further filter.
        let view = run(
            &topics,
            &Query {
                window: DateWindow::Last7Days,
                ..Query::default()
            },
            now,
        );
        assert_eq!(view.categories, vec!["Animals", "Food"]);
        assert_eq!(titles(&view.topics), vec!["Cat", "Apple"]);

        // Category filter applies after the window
        let view = run(
            &topics,
            &Query {
                window: DateWindow::Last7Days,
                category: Some("Food".into()),
                ..Query::default()
            },
            now,
        );
        assert_eq!(titles(&view.topics), vec!["Apple"]);

        // Search is case-insensitive substring over title + category
        let view = run(
            &topics,
            &Query {
                search: "anim".into(),
                ..Query::default()
            },
            now,
        );
        assert_eq!(titles(&view.topics), vec!["Cat"]);
    }
}

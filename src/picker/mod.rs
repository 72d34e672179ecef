use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::Topic;

/// Pick one topic uniformly at random, preferring not-yet-done topics.
///
/// Falls back to the whole list when everything is done; `None` only when
/// the list itself is empty. Picking has no persistent effect.
pub fn pick(topics: &[Topic]) -> Option<&Topic> {
    pick_with(topics, &mut rand::rng())
}

pub fn pick_with<'a, R: Rng + ?Sized>(topics: &'a [Topic], rng: &mut R) -> Option<&'a Topic> {
    let pending: Vec<&Topic> = topics.iter().filter(|t| !t.done).collect();
    match pending.choose(rng) {
        Some(topic) => Some(*topic),
        None => topics.choose(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn done(title: &str) -> Topic {
        let mut t = Topic::new(title, "Cat");
        t.done = true;
        t.completed_at = Some(chrono::Utc::now());
        t
    }

    #[test]
    fn test_empty_list_yields_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_with(&[], &mut rng).is_none());
    }

    #[test]
    fn test_never_picks_done_when_pending_exists() {
        let topics = vec![done("A"), Topic::new("B", "Cat"), done("C")];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = pick_with(&topics, &mut rng).unwrap();
            assert!(!picked.done);
            assert_eq!(picked.title, "B");
        }
    }

    #[test]
    fn test_falls_back_to_done_topics() {
        let topics = vec![done("A"), done("B")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_with(&topics, &mut rng).unwrap();
        assert!(picked.done);
    }

    #[test]
    fn test_covers_all_pending_topics() {
        let topics = vec![
            Topic::new("A", "Cat"),
            Topic::new("B", "Cat"),
            Topic::new("C", "Cat"),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_with(&topics, &mut rng).unwrap().title.clone());
        }
        assert_eq!(seen.len(), 3);
    }
}

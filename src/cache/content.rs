use std::collections::{
    BTreeMap,
    HashSet,
};

use crate::core::models::DayContent;

/// Per-day flashcard cache. Entries are written by exactly two producers:
/// the scheduler's content seed and the module-content fetch. Each entry
/// records which module it was generated for; a plan mutation can shift day
/// numbers under the cache, and an entry whose module no longer matches the
/// day reads as absent instead of serving another module's cards.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: BTreeMap<u32, (String, DayContent)>,
    in_flight: HashSet<u32>,
}

impl ContentCache {
    /// Read-only lookup. Never triggers a fetch; an entry generated for a
    /// different module is not returned.
    pub fn get(&self, day: u32, topic: &str) -> Option<&DayContent> {
        match self.entries.get(&day) {
            Some((t, content)) if t.as_str() == topic => Some(content),
            _ => None,
        }
    }

    pub fn contains(&self, day: u32, topic: &str) -> bool {
        self.get(day, topic).is_some()
    }

    pub fn is_fetching(&self, day: u32) -> bool {
        self.in_flight.contains(&day)
    }

    /// Single-flight gate: returns true when the caller should spawn a
    /// fetch, false when the day already holds this module's content or a
    /// fetch is in flight.
    pub fn begin_fetch(&mut self, day: u32, topic: &str) -> bool {
        if self.contains(day, topic) || self.in_flight.contains(&day) {
            return false;
        }
        self.in_flight.insert(day);
        true
    }

    /// Whether a fetch result for this day is still expected. Late
    /// responses that fail this check must be discarded by the caller.
    pub fn accepts(&self, day: u32) -> bool {
        self.in_flight.contains(&day)
    }

    pub fn insert(&mut self, day: u32, topic: String, content: DayContent) {
        self.in_flight.remove(&day);
        self.entries.insert(day, (topic, content));
    }

    pub fn fetch_failed(&mut self, day: u32) {
        self.in_flight.remove(&day);
    }

    /// Re-applies the scheduler's content seed after a plan mutation. Seeded
    /// days are overwritten with their module identity (their day numbers
    /// may have shifted); entries for unseeded days are left alone and rely
    /// on the module check in `get`.
    pub fn reseed(&mut self, seed: BTreeMap<u32, (String, DayContent)>) {
        for (day, entry) in seed {
            self.entries.insert(day, entry);
        }
    }

    /// Local edit of one cached flashcard. Mutates only the cache, never the
    /// plan's subtopics.
    pub fn edit_card(
        &mut self,
        day: u32,
        card_index: usize,
        title: Option<String>,
        content: Option<String>,
    ) -> bool {
        let Some(card) =
            self.entries.get_mut(&day).and_then(|(_, c)| c.flashcards.get_mut(card_index))
        else {
            return false;
        };
        if let Some(title) = title {
            card.title = title;
        }
        if let Some(content) = content {
            card.content = content;
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Flashcard;

    fn content(titles: &[&str]) -> DayContent {
        DayContent {
            flashcards: titles
                .iter()
                .map(|t| Flashcard {
                    title: t.to_string(),
                    content: String::new(),
                    audio_script: None,
                    reference: None,
                    emoji: None,
                })
                .collect(),
        }
    }

    #[test]
    fn begin_fetch_is_single_flight() {
        let mut cache = ContentCache::default();
        assert!(cache.begin_fetch(1, "A"));
        assert!(!cache.begin_fetch(1, "A"));
        assert!(cache.accepts(1));

        cache.insert(1, "A".to_string(), content(&["a"]));
        assert!(!cache.accepts(1));
        assert!(!cache.begin_fetch(1, "A"));
    }

    #[test]
    fn failed_fetch_allows_retry() {
        let mut cache = ContentCache::default();
        assert!(cache.begin_fetch(2, "B"));
        cache.fetch_failed(2);
        assert!(!cache.accepts(2));
        assert!(cache.begin_fetch(2, "B"));
    }

    #[test]
    fn reseed_overwrites_seeded_days_only() {
        let mut cache = ContentCache::default();
        cache.insert(1, "A".to_string(), content(&["old-1"]));
        cache.insert(3, "C".to_string(), content(&["old-3"]));

        let mut seed = BTreeMap::new();
        seed.insert(1, ("A".to_string(), content(&["new-1"])));
        cache.reseed(seed);

        assert_eq!(cache.get(1, "A").unwrap().flashcards[0].title, "new-1");
        assert_eq!(cache.get(3, "C").unwrap().flashcards[0].title, "old-3");
    }

    #[test]
    fn entry_for_another_module_reads_as_absent() {
        let mut cache = ContentCache::default();
        cache.insert(2, "Patterns".to_string(), content(&["p"]));

        // A day shift re-assigned day 2; the stale entry must not surface
        // and must not block a fetch for the new module.
        assert!(cache.get(2, "Practice").is_none());
        assert!(!cache.contains(2, "Practice"));
        assert!(cache.begin_fetch(2, "Practice"));

        cache.insert(2, "Practice".to_string(), content(&["q"]));
        assert_eq!(cache.get(2, "Practice").unwrap().flashcards[0].title, "q");
        assert!(cache.get(2, "Patterns").is_none());
    }

    #[test]
    fn edit_card_touches_only_the_cache_entry() {
        let mut cache = ContentCache::default();
        cache.insert(1, "A".to_string(), content(&["a", "b"]));

        assert!(cache.edit_card(1, 1, Some("B".to_string()), Some("body".to_string())));
        let cards = &cache.get(1, "A").unwrap().flashcards;
        assert_eq!(cards[1].title, "B");
        assert_eq!(cards[1].content, "body");
        assert_eq!(cards[0].title, "a");

        assert!(!cache.edit_card(1, 5, Some("x".to_string()), None));
        assert!(!cache.edit_card(9, 0, Some("x".to_string()), None));
    }
}

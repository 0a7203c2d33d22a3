use std::{
    collections::{
        HashMap,
        HashSet,
    },
    fmt,
};

use crate::core::models::{
    AudioClip,
    QuizQuestion,
};

/// Cache key for one narrated card. Scoped per day so identical card
/// indices on different days never collide; a card whose underlying script
/// changes after a regeneration lands under the new day's key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioKey {
    pub day: u32,
    pub card_index: usize,
    pub language: String,
}

impl AudioKey {
    pub fn new(day: u32, card_index: usize, language: impl Into<String>) -> Self {
        Self { day, card_index, language: language.into() }
    }
}

impl fmt::Display for AudioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.day, self.card_index, self.language)
    }
}

/// Memoizes synthesized audio per (day, card, language). Entries are never
/// evicted within a session; a failed foreground fetch marks the key so the
/// playback control can render disabled instead of retrying forever.
#[derive(Debug, Default)]
pub struct AudioCache {
    clips: HashMap<AudioKey, AudioClip>,
    in_flight: HashSet<AudioKey>,
    failed: HashSet<AudioKey>,
}

impl AudioCache {
    pub fn get(&self, key: &AudioKey) -> Option<&AudioClip> {
        self.clips.get(key)
    }

    pub fn is_failed(&self, key: &AudioKey) -> bool {
        self.failed.contains(key)
    }

    /// Single-flight gate shared by prefetch and foreground fetch: only the
    /// first caller for a key gets to spawn the synthesis request.
    pub fn begin_fetch(&mut self, key: &AudioKey) -> bool {
        if self.clips.contains_key(key) || self.in_flight.contains(key) {
            return false;
        }
        self.in_flight.insert(key.clone());
        true
    }

    pub fn accepts(&self, key: &AudioKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn insert(&mut self, key: AudioKey, clip: AudioClip) {
        self.in_flight.remove(&key);
        self.failed.remove(&key);
        self.clips.insert(key, clip);
    }

    /// Prefetch failures clear the in-flight mark and nothing else, so a
    /// later foreground fetch can retry. Foreground failures set `failed`.
    pub fn fetch_failed(&mut self, key: &AudioKey, foreground: bool) {
        self.in_flight.remove(key);
        if foreground {
            self.failed.insert(key.clone());
        }
    }

    pub fn clear(&mut self) {
        self.clips.clear();
        self.in_flight.clear();
        self.failed.clear();
    }
}

/// Per-day quiz question cache. Background prefetch and foreground fetch
/// share the single-flight guard, so whichever path starts first is the only
/// one on the wire and the other finds the entry warm. Entries record the
/// module they quiz on; after a day shift, a quiz generated for another
/// module reads as absent.
#[derive(Debug, Default)]
pub struct QuizCache {
    questions: HashMap<u32, (String, Vec<QuizQuestion>)>,
    in_flight: HashSet<u32>,
}

impl QuizCache {
    pub fn get(&self, day: u32, topic: &str) -> Option<&Vec<QuizQuestion>> {
        match self.questions.get(&day) {
            Some((t, questions)) if t.as_str() == topic => Some(questions),
            _ => None,
        }
    }

    pub fn is_fetching(&self, day: u32) -> bool {
        self.in_flight.contains(&day)
    }

    pub fn begin_fetch(&mut self, day: u32, topic: &str) -> bool {
        if self.get(day, topic).is_some() || self.in_flight.contains(&day) {
            return false;
        }
        self.in_flight.insert(day);
        true
    }

    pub fn accepts(&self, day: u32) -> bool {
        self.in_flight.contains(&day)
    }

    pub fn insert(&mut self, day: u32, topic: String, questions: Vec<QuizQuestion>) {
        self.in_flight.remove(&day);
        self.questions.insert(day, (topic, questions));
    }

    pub fn fetch_failed(&mut self, day: u32) {
        self.in_flight.remove(&day);
    }

    pub fn clear(&mut self) {
        self.questions.clear();
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_key_formats_as_day_index_language() {
        let key = AudioKey::new(2, 4, "en-US");
        assert_eq!(key.to_string(), "2:4:en-US");
    }

    #[test]
    fn audio_single_flight_per_key() {
        let mut cache = AudioCache::default();
        let key = AudioKey::new(1, 0, "en-US");

        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        // A different language is a different key.
        assert!(cache.begin_fetch(&AudioKey::new(1, 0, "de-DE")));

        cache.insert(key.clone(), AudioClip::new(vec![1, 2, 3]));
        assert!(!cache.begin_fetch(&key));
        assert_eq!(cache.get(&key).unwrap().bytes, vec![1, 2, 3]);
    }

    #[test]
    fn prefetch_failure_is_retryable_foreground_failure_is_not() {
        let mut cache = AudioCache::default();
        let key = AudioKey::new(1, 1, "en-US");

        assert!(cache.begin_fetch(&key));
        cache.fetch_failed(&key, false);
        assert!(!cache.is_failed(&key));
        assert!(cache.begin_fetch(&key));

        cache.fetch_failed(&key, true);
        assert!(cache.is_failed(&key));
        // A later successful insert clears the failed mark.
        assert!(cache.begin_fetch(&key));
        cache.insert(key.clone(), AudioClip::new(vec![9]));
        assert!(!cache.is_failed(&key));
    }

    #[test]
    fn quiz_fetch_paths_share_one_guard() {
        let mut cache = QuizCache::default();
        // Background prefetch wins the guard...
        assert!(cache.begin_fetch(3, "A"));
        // ...and the foreground path arriving later must not re-request.
        assert!(!cache.begin_fetch(3, "A"));
        assert!(cache.is_fetching(3));

        cache.insert(3, "A".to_string(), Vec::new());
        assert!(cache.get(3, "A").is_some());
        assert!(!cache.is_fetching(3));
    }

    #[test]
    fn quiz_for_another_module_reads_as_absent() {
        let mut cache = QuizCache::default();
        cache.insert(2, "Patterns".to_string(), Vec::new());

        assert!(cache.get(2, "Practice").is_none());
        assert!(cache.begin_fetch(2, "Practice"));
    }
}

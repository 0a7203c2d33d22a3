use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

/// Whether a module takes part in the day schedule. Only `Needed` modules
/// consume a day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleTag {
    #[serde(rename = "needed")]
    Needed,
    #[serde(rename = "not needed")]
    NotNeeded,
}

impl ModuleTag {
    pub fn toggled(self) -> Self {
        match self {
            ModuleTag::Needed => ModuleTag::NotNeeded,
            ModuleTag::NotNeeded => ModuleTag::Needed,
        }
    }
}

/// One lesson unit inside a module. Created with empty content from a
/// syllabus draft, or with populated content points after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtopic {
    pub name: String,
    #[serde(default)]
    pub content_points: Vec<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Subtopic {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_points: Vec::new(),
            duration_minutes: 0,
            audio_script: None,
            reference: None,
        }
    }

    pub fn placeholder() -> Self {
        Self::named("New subtopic")
    }

    pub fn has_content(&self) -> bool {
        !self.content_points.is_empty()
    }
}

/// A top-level syllabus unit. Subtopic order is significant: it defines
/// flashcard order within the module's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub topic: String,
    pub tag: ModuleTag,
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

impl Module {
    pub fn new(topic: impl Into<String>, tag: ModuleTag) -> Self {
        Self { topic: topic.into(), tag, subtopics: Vec::new() }
    }

    pub fn is_needed(&self) -> bool {
        self.tag == ModuleTag::Needed
    }

    pub fn duration_minutes(&self) -> u32 {
        self.subtopics.iter().map(|s| s.duration_minutes).sum()
    }

    pub fn has_content(&self) -> bool {
        self.subtopics.iter().any(|s| s.has_content())
    }
}

/// Presentation-ready unit derived from exactly one subtopic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Flashcard {
    pub fn from_subtopic(subtopic: &Subtopic) -> Self {
        Self {
            title: subtopic.name.clone(),
            content: subtopic.content_points.join("\n"),
            audio_script: subtopic.audio_script.clone(),
            reference: subtopic.reference.clone(),
            emoji: None,
        }
    }

    /// Text handed to speech synthesis: the explicit script when present,
    /// otherwise title and content.
    pub fn narration_text(&self) -> String {
        match &self.audio_script {
            Some(script) => script.clone(),
            None => format!("{}. {}", self.title, self.content),
        }
    }
}

/// Derived schedule entry; never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: u32,
    pub focus_topic: String,
    pub summary: String,
}

/// Generated flashcards for one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayContent {
    pub flashcards: Vec<Flashcard>,
}

impl DayContent {
    pub fn from_subtopics(subtopics: &[Subtopic]) -> Self {
        Self { flashcards: subtopics.iter().map(Flashcard::from_subtopic).collect() }
    }

    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A syllabus line in the results screen, before a plan exists. The tag is
/// what the user toggles to select which modules the plan should cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub topic: String,
    pub tag: ModuleTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    /// Maps an assessment score onto a coarse expertise level.
    pub fn from_score(correct: usize, total: usize) -> Self {
        if total == 0 {
            return ExpertiseLevel::Beginner;
        }
        let ratio = correct as f32 / total as f32;
        if ratio >= 0.8 {
            ExpertiseLevel::Advanced
        } else if ratio >= 0.4 {
            ExpertiseLevel::Intermediate
        } else {
            ExpertiseLevel::Beginner
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Advanced => "advanced",
        }
    }
}

/// The committed plan: modules plus everything the scheduler derived from
/// them. `days` and `day_modules` are rebuilt in full on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePlan {
    pub course_id: Uuid,
    pub topic: String,
    pub modules: Vec<Module>,
    pub days: Vec<DaySchedule>,
    pub day_modules: BTreeMap<u32, usize>,
    pub total_duration_minutes: u32,
}

impl CoursePlan {
    pub fn total_days(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn day_exists(&self, day: u32) -> bool {
        self.day_modules.contains_key(&day)
    }

    pub fn module_for_day(&self, day: u32) -> Option<&Module> {
        self.day_modules.get(&day).and_then(|&idx| self.modules.get(idx))
    }

    pub fn module_for_day_mut(&mut self, day: u32) -> Option<&mut Module> {
        match self.day_modules.get(&day) {
            Some(&idx) => self.modules.get_mut(idx),
            None => None,
        }
    }
}

/// Completion record for one finished day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedDay {
    pub day: u32,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_correct: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_total: Option<usize>,
}

/// Decoded, playable audio for one narrated flashcard.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_serializes_with_space() {
        let json = serde_json::to_string(&ModuleTag::NotNeeded).unwrap();
        assert_eq!(json, "\"not needed\"");
        let back: ModuleTag = serde_json::from_str("\"needed\"").unwrap();
        assert_eq!(back, ModuleTag::Needed);
    }

    #[test]
    fn flashcard_joins_content_points() {
        let subtopic = Subtopic {
            name: "Ownership".to_string(),
            content_points: vec!["Moves".to_string(), "Borrows".to_string()],
            duration_minutes: 10,
            audio_script: None,
            reference: None,
        };
        let card = Flashcard::from_subtopic(&subtopic);
        assert_eq!(card.title, "Ownership");
        assert_eq!(card.content, "Moves\nBorrows");
        assert_eq!(card.narration_text(), "Ownership. Moves\nBorrows");
    }

    #[test]
    fn expertise_from_score_brackets() {
        assert_eq!(ExpertiseLevel::from_score(0, 0), ExpertiseLevel::Beginner);
        assert_eq!(ExpertiseLevel::from_score(1, 5), ExpertiseLevel::Beginner);
        assert_eq!(ExpertiseLevel::from_score(3, 5), ExpertiseLevel::Intermediate);
        assert_eq!(ExpertiseLevel::from_score(5, 5), ExpertiseLevel::Advanced);
    }
}

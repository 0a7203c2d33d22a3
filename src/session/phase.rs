use crate::core::models::{
    AssessmentQuestion,
    QuizQuestion,
    SyllabusTopic,
};

/// One value of this enum is the single source of truth for what is on
/// screen. Each variant carries only the payload that screen renders; the
/// plan, caches and completion set live on the session, not in the phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Search,
    Searching { topic: String },
    Results { topic: String, syllabus: Vec<SyllabusTopic> },
    AssessmentLoading { topic: String },
    Assessment { topic: String, questions: Vec<AssessmentQuestion> },
    Evaluating,
    Overview,
    DayCover { day: u32 },
    ContentLoading { day: u32 },
    Flashcards { day: u32, card_index: usize },
    QuizLoading { day: u32 },
    Quiz { day: u32, questions: Vec<QuizQuestion> },
    DayComplete { day: u32 },
    CourseComplete,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Search => "search",
            SessionPhase::Searching { .. } => "searching",
            SessionPhase::Results { .. } => "results",
            SessionPhase::AssessmentLoading { .. } => "assessment-loading",
            SessionPhase::Assessment { .. } => "assessment",
            SessionPhase::Evaluating => "evaluating",
            SessionPhase::Overview => "overview",
            SessionPhase::DayCover { .. } => "day-cover",
            SessionPhase::ContentLoading { .. } => "content-loading",
            SessionPhase::Flashcards { .. } => "flashcards",
            SessionPhase::QuizLoading { .. } => "quiz-loading",
            SessionPhase::Quiz { .. } => "quiz",
            SessionPhase::DayComplete { .. } => "day-complete",
            SessionPhase::CourseComplete => "course-complete",
        }
    }

    /// The day this phase is pinned to, if any.
    pub fn active_day(&self) -> Option<u32> {
        match self {
            SessionPhase::DayCover { day }
            | SessionPhase::ContentLoading { day }
            | SessionPhase::Flashcards { day, .. }
            | SessionPhase::QuizLoading { day }
            | SessionPhase::Quiz { day, .. }
            | SessionPhase::DayComplete { day } => Some(*day),
            _ => None,
        }
    }

    /// True while an async generation call is the only way forward. The UI
    /// disables the triggering action for the duration.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            SessionPhase::Searching { .. }
                | SessionPhase::AssessmentLoading { .. }
                | SessionPhase::Evaluating
                | SessionPhase::ContentLoading { .. }
                | SessionPhase::QuizLoading { .. }
        )
    }
}

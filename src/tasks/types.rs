use crate::{
    backend::types::SyllabusResponse,
    cache::AudioKey,
    core::models::{
        AssessmentQuestion,
        AudioClip,
        Module,
        QuizQuestion,
        Subtopic,
    },
};

/// Errors cross the channel as strings; the session only needs them for the
/// user-visible message and the failure transition.
pub type TaskOutcome<T> = Result<T, String>;

/// Completion of one background fetch. Each variant carries enough key
/// material for the session to decide whether the response is still wanted
/// or arrived too late and must be discarded.
#[derive(Debug, Clone)]
pub enum TaskResult {
    SyllabusLoaded {
        topic: String,
        result: TaskOutcome<SyllabusResponse>,
    },
    AssessmentLoaded {
        topic: String,
        result: TaskOutcome<Vec<AssessmentQuestion>>,
    },
    PlanLoaded {
        result: TaskOutcome<Vec<Module>>,
    },
    DayContentLoaded {
        day: u32,
        module_topic: String,
        result: TaskOutcome<Vec<Subtopic>>,
    },
    QuizLoaded {
        day: u32,
        focus_topic: String,
        background: bool,
        result: TaskOutcome<Vec<QuizQuestion>>,
    },
    AudioLoaded {
        key: AudioKey,
        prefetch: bool,
        result: TaskOutcome<AudioClip>,
    },
    TermExplained {
        term: String,
        result: TaskOutcome<String>,
    },
    CardSimplified {
        day: u32,
        card_index: usize,
        result: TaskOutcome<String>,
    },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::SyllabusLoaded { .. } => "syllabus",
            TaskResult::AssessmentLoaded { .. } => "assessment",
            TaskResult::PlanLoaded { .. } => "plan",
            TaskResult::DayContentLoaded { .. } => "day_content",
            TaskResult::QuizLoaded { .. } => "quiz",
            TaskResult::AudioLoaded { .. } => "audio",
            TaskResult::TermExplained { .. } => "explain",
            TaskResult::CardSimplified { .. } => "simplify",
        }
    }
}

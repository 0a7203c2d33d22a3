pub mod errors;
pub mod models;

pub use errors::StudypathError;
pub use models::{
    AudioClip,
    CoursePlan,
    DayContent,
    DaySchedule,
    Flashcard,
    Module,
    ModuleTag,
    QuizQuestion,
    Subtopic,
};

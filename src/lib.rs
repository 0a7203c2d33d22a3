pub mod backend;
pub mod cache;
pub mod core;
pub mod schedule;
pub mod session;
pub mod tasks;

pub use crate::{
    backend::{
        GenerationBackend,
        HttpBackend,
    },
    core::{
        models::{
            CoursePlan,
            DayContent,
            DaySchedule,
            Flashcard,
            Module,
            ModuleTag,
            QuizQuestion,
            Subtopic,
        },
        StudypathError,
    },
    session::{
        Session,
        SessionPhase,
        SessionVariant,
    },
};

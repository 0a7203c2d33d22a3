pub mod edit;
pub mod machine;
pub mod phase;

pub use edit::EditDraft;
pub use machine::Session;
pub use phase::SessionPhase;

/// Which flavor of session this is: `Guided` finishes every day with a
/// quiz, `Browse` goes straight from the last flashcard to day completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVariant {
    Guided,
    Browse,
}

impl SessionVariant {
    pub fn has_quiz(self) -> bool {
        matches!(self, SessionVariant::Guided)
    }
}

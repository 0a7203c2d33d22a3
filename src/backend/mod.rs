pub mod api;
pub mod types;

use async_trait::async_trait;
use uuid::Uuid;

pub use api::HttpBackend;
pub use types::TaggedTopic;
use types::SyllabusResponse;

use crate::core::{
    models::{
        AssessmentQuestion,
        AudioClip,
        ExpertiseLevel,
        Module,
        QuizQuestion,
        Subtopic,
    },
    StudypathError,
};

/// The generation endpoints the session core consumes. The core never
/// generates anything itself; everything AI-shaped lives behind this trait,
/// which also lets tests substitute counting stubs for the real backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_syllabus(
        &self,
        topic: &str,
        expertise: ExpertiseLevel,
    ) -> Result<SyllabusResponse, StudypathError>;

    async fn generate_assessment(
        &self,
        topic: &str,
    ) -> Result<Vec<AssessmentQuestion>, StudypathError>;

    async fn generate_plan(
        &self,
        topics: &[TaggedTopic],
        expertise: ExpertiseLevel,
    ) -> Result<Vec<Module>, StudypathError>;

    async fn generate_module_content(
        &self,
        course_id: Uuid,
        module_title: &str,
    ) -> Result<Vec<Subtopic>, StudypathError>;

    async fn generate_quiz(
        &self,
        day: u32,
        focus_topic: &str,
    ) -> Result<Vec<QuizQuestion>, StudypathError>;

    async fn synthesize_audio(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioClip, StudypathError>;

    async fn explain_term(&self, term: &str, context: &str) -> Result<String, StudypathError>;

    async fn simplify_content(&self, text: &str) -> Result<String, StudypathError>;
}

use std::time::Duration;

use async_trait::async_trait;
use base64::{
    engine::general_purpose::STANDARD,
    Engine as _,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{
    types::{
        ApiResponse,
        AssessmentResponse,
        AudioResponse,
        ExplanationResponse,
        ModuleContentResponse,
        PlanResponse,
        QuizResponse,
        SimplifiedResponse,
        SyllabusResponse,
        TaggedTopic,
    },
    GenerationBackend,
};
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

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP implementation of the generation backend: one JSON POST per
/// operation against `{base_url}/api/{operation}`, each answered with the
/// `{result, error}` envelope.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StudypathError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url: base_url.into() })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        params: serde_json::Value,
    ) -> Result<T, StudypathError> {
        let url = format!("{}/api/{}", self.base_url.trim_end_matches('/'), operation);
        let response: ApiResponse<T> =
            self.client.post(&url).json(&params).send().await?.json().await?;
        response.into_result(operation)
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate_syllabus(
        &self,
        topic: &str,
        expertise: ExpertiseLevel,
    ) -> Result<SyllabusResponse, StudypathError> {
        let params = serde_json::json!({ "topic": topic, "expertise": expertise.as_str() });
        self.post("syllabus", params).await
    }

    async fn generate_assessment(
        &self,
        topic: &str,
    ) -> Result<Vec<AssessmentQuestion>, StudypathError> {
        let params = serde_json::json!({ "topic": topic });
        let response: AssessmentResponse = self.post("assessment", params).await?;
        Ok(response.questions)
    }

    async fn generate_plan(
        &self,
        topics: &[TaggedTopic],
        expertise: ExpertiseLevel,
    ) -> Result<Vec<Module>, StudypathError> {
        let params = serde_json::json!({ "topics": topics, "expertise": expertise.as_str() });
        let response: PlanResponse = self.post("plan", params).await?;
        Ok(response.modules)
    }

    async fn generate_module_content(
        &self,
        course_id: Uuid,
        module_title: &str,
    ) -> Result<Vec<Subtopic>, StudypathError> {
        let params =
            serde_json::json!({ "courseId": course_id, "moduleTitle": module_title });
        let response: ModuleContentResponse = self.post("module-content", params).await?;
        Ok(response.results)
    }

    async fn generate_quiz(
        &self,
        day: u32,
        focus_topic: &str,
    ) -> Result<Vec<QuizQuestion>, StudypathError> {
        let params = serde_json::json!({ "day": day, "focusTopic": focus_topic });
        let response: QuizResponse = self.post("quiz", params).await?;
        Ok(response.questions)
    }

    async fn synthesize_audio(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioClip, StudypathError> {
        let params = serde_json::json!({ "text": text, "language": language });
        let response: AudioResponse = self.post("audio", params).await?;
        let bytes = STANDARD.decode(response.audio_base64.as_bytes())?;
        Ok(AudioClip::new(bytes))
    }

    async fn explain_term(&self, term: &str, context: &str) -> Result<String, StudypathError> {
        let params = serde_json::json!({ "term": term, "context": context });
        let response: ExplanationResponse = self.post("explain", params).await?;
        Ok(response.explanation)
    }

    async fn simplify_content(&self, text: &str) -> Result<String, StudypathError> {
        let params = serde_json::json!({ "text": text });
        let response: SimplifiedResponse = self.post("simplify", params).await?;
        Ok(response.simplified_text)
    }
}

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        AssessmentQuestion,
        Module,
        ModuleTag,
        QuizQuestion,
        Subtopic,
    },
    StudypathError,
};

/// Envelope every generation endpoint answers with: exactly one of `result`
/// and `error` is populated.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, operation: &'static str) -> Result<T, StudypathError> {
        if let Some(error) = self.error {
            return Err(StudypathError::Backend(error));
        }
        self.result.ok_or(StudypathError::EmptyResult(operation))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusResponse {
    pub topic: String,
    pub syllabus: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub questions: Vec<AssessmentQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleContentResponse {
    pub results: Vec<Subtopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub audio_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedResponse {
    pub simplified_text: String,
}

/// One syllabus line plus its needed/not-needed tag, as sent to plan
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedTopic {
    pub topic: String,
    pub tag: ModuleTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_error_wins_over_result() {
        let response =
            ApiResponse::<u32> { result: Some(3), error: Some("quota exceeded".to_string()) };
        let err = response.into_result("quiz").unwrap_err();
        assert!(matches!(err, StudypathError::Backend(message) if message == "quota exceeded"));
    }

    #[test]
    fn envelope_missing_result_is_an_error() {
        let response = ApiResponse::<u32> { result: None, error: None };
        assert!(matches!(
            response.into_result("syllabus"),
            Err(StudypathError::EmptyResult("syllabus"))
        ));
    }

    #[test]
    fn audio_response_uses_camel_case() {
        let parsed: AudioResponse =
            serde_json::from_str(r#"{"audioBase64": "UklGRg=="}"#).unwrap();
        assert_eq!(parsed.audio_base64, "UklGRg==");
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudypathError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Audio decode error: {0}")]
    AudioDecode(#[from] base64::DecodeError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend returned no result for '{0}'")]
    EmptyResult(&'static str),

    #[error("Day {0} is not part of the current schedule")]
    UnknownDay(u32),

    #[error("No module named '{0}' in the plan")]
    UnknownModule(String),

    #[error("Cannot save edits: {0}")]
    InvalidDraft(String),

    #[error("StudypathError: {0}")]
    Custom(String),
}

impl From<reqwest::Error> for StudypathError {
    fn from(error: reqwest::Error) -> Self {
        StudypathError::Reqwest(Box::new(error))
    }
}

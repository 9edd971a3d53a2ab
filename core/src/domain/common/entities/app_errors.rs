use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{}", describe_external(.status, .message))]
    ExternalServiceError {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed model output: {0}")]
    MalformedAIOutput(String),

    #[error("text recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl CoreError {
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError {
            status: None,
            message: message.into(),
        }
    }

    pub fn external_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::ExternalServiceError {
            status: Some(status),
            message: message.into(),
        }
    }
}

fn describe_external(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("upstream model error (HTTP {status}): {message}"),
        None => format!("upstream model error: {message}"),
    }
}

use thiserror::Error;

/// Error types for report retrieval
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Required input missing, raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status, with the full response body kept for diagnostics
    #[error("{status} {status_text}: {body}")]
    Transport {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body is not valid JSON or does not match the payload shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ReportError {
    /// Message shown to the operator in the status line or a degraded panel.
    pub fn display_message(&self) -> String {
        match self {
            ReportError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Stable machine-readable code used in JSON error responses.
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Validation(_) => "VALIDATION_ERROR",
            ReportError::Transport { .. } | ReportError::Request(_) => "TRANSPORT_ERROR",
            ReportError::Parse(_) => "PARSE_ERROR",
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(error: reqwest::Error) -> Self {
        ReportError::Request(error.to_string())
    }
}

/// Type alias for Result with ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

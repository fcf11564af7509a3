// src/error.rs
// =============================================================================
// Error types shared by the repository loader and the contact submitter.
//
// The taxonomy is deliberately flat:
// - Network: the request could not be sent or no response arrived
// - Remote: a response arrived with a non-success status
// - Shape: the body parsed but was not what we expected
//
// Each variant's Display text is the one string shown to the user.
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error for us
// - #[error(...)]: the Display message for each variant
// =============================================================================

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or no response was received
    #[error("network error: {0}")]
    Network(String),

    /// Response received with a non-success status
    #[error("{}", remote_text(.status, .message))]
    Remote {
        status: StatusCode,
        message: Option<String>,
    },

    /// Response parsed but did not match the expected structure
    #[error("unexpected response: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Network(error.to_string())
    }
}

fn remote_text(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("HTTP {}: {}", status.as_u16(), message),
        None => format!("HTTP {}", status),
    }
}

// Body shape of error responses. GitHub uses `message`, form backends
// usually use `error`; we accept either.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

// Pulls a human-readable message out of an error response body, if any.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

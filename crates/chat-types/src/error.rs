use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Request cancelled: {0}")]
    RequestCancelled(CancelReason),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP error! Status: {0}")]
    HttpStatus(u16),

    #[error("Invalid JSON response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

/// Why an in-flight webhook request was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// The hard timer fired.
    Timeout,
    /// A newer `send` replaced the request.
    Superseded,
    /// The conversation view was torn down.
    Disposed,
    /// The conversation was cleared with the cancel-on-clear policy.
    Cleared,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CancelReason::Timeout => "timed out",
            CancelReason::Superseded => "superseded by a newer message",
            CancelReason::Disposed => "conversation closed",
            CancelReason::Cleared => "conversation cleared",
        };
        f.write_str(text)
    }
}

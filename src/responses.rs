//! Shared JSON response bodies used across route handlers.

use serde::{Deserialize, Serialize};

/// The JSON body sent with every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A short description of what went wrong, intended for the client.
    pub message: String,
    /// The underlying error message, attached to 500 responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Create an error body with just a client-facing message.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            error: None,
        }
    }

    /// Create an error body that attaches the underlying error message.
    pub fn with_detail(message: &str, detail: &str) -> Self {
        Self {
            message: message.to_owned(),
            error: Some(detail.to_owned()),
        }
    }
}

/// The JSON body for endpoints that respond with a scalar total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalResponse {
    /// The sum of the matching record amounts, 0 when there are none.
    pub total: f64,
}

/// The JSON body for endpoints that respond with a confirmation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A short confirmation of the action taken.
    pub message: String,
}

impl MessageResponse {
    /// Create a confirmation message body.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

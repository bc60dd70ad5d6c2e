//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn method_not_allowed() -> Self {
        Self::new("Method Not Allowed")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

/// Body of successful responses that carry no entity, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_string(&ErrorResponse::new("No post with that ID")).unwrap();
        assert_eq!(body, r#"{"error":"No post with that ID"}"#);
    }
}

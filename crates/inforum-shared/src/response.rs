//! Response envelopes.

use serde::{Deserialize, Serialize};

/// `{status, message}` envelope returned by mutations and on every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: String,
}

impl StatusMessage {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(200, message)
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    pub fn forbidden() -> Self {
        Self::new(403, "You do not have permission to perform this action.")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "An unexpected error occurred.")
    }
}

/// Result of `POST /api/blogposts/star`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarToggleResponse {
    pub status: u16,
    pub message: String,
    pub added: bool,
}

impl StarToggleResponse {
    pub fn new(added: bool) -> Self {
        let message = if added {
            "Star added Successfully."
        } else {
            "Star removed Successfully."
        };
        Self {
            status: 200,
            message: message.to_string(),
            added,
        }
    }
}

/// Result of `POST /api/blogposts/star/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarStatusResponse {
    pub star_exist: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(StatusMessage::not_found("Post not found")).unwrap();
        assert_eq!(json, serde_json::json!({"status": 404, "message": "Post not found"}));
    }

    #[test]
    fn test_star_status_field_name() {
        let json = serde_json::to_value(StarStatusResponse { star_exist: true }).unwrap();
        assert_eq!(json, serde_json::json!({"starExist": true}));
    }
}

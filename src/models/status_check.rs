//! Wire types for the status-check API
//!
//! Responses are deserialized into these structs; a body that does not fit
//! is treated as a failed check rather than probed field by field.

use serde::{Deserialize, Serialize};

/// Greeting returned by the API root
pub const EXPECTED_GREETING: &str = "Hello World";

/// Body of `GET {base}/`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

/// Body of `POST {base}/status`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheckCreate {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

/// A stored status check as returned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_check_requires_all_fields() {
        let complete = json!({
            "id": "8d3c",
            "client_name": "Acme Corporation",
            "timestamp": "2024-01-01T00:00:00"
        });
        let parsed: StatusCheck = serde_json::from_value(complete).unwrap();
        assert_eq!(parsed.client_name, "Acme Corporation");

        let missing_timestamp = json!({"id": "8d3c", "client_name": "Acme Corporation"});
        assert!(serde_json::from_value::<StatusCheck>(missing_timestamp).is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = json!({"message": "Hello World", "version": "1.0"});
        let parsed: RootMessage = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.message, EXPECTED_GREETING);
    }

    #[test]
    fn test_create_body_shape() {
        let body = serde_json::to_value(StatusCheckCreate::new("Acme Corporation")).unwrap();
        assert_eq!(body, json!({"client_name": "Acme Corporation"}));
    }
}

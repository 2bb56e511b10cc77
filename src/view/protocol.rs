//! Control messages exchanged with the toggle UI.
//!
//! ```json
//! {"action":"toggleAIMode","enabled":true}
//! {"success":true}
//! {"success":false,"error":"..."}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ControlRequest {
    /// Switch the readable view on or off.
    #[serde(rename = "toggleAIMode")]
    ToggleAiMode { enabled: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ControlResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request: ControlRequest =
            serde_json::from_str(r#"{"action":"toggleAIMode","enabled":true}"#).expect("decodes");
        assert_eq!(request, ControlRequest::ToggleAiMode { enabled: true });

        assert!(serde_json::from_str::<ControlRequest>(r#"{"action":"reload"}"#).is_err());
    }

    #[test]
    fn test_response_omits_absent_error() {
        assert_eq!(
            serde_json::to_string(&ControlResponse::ok()).expect("encodes"),
            r#"{"success":true}"#
        );
        assert_eq!(
            serde_json::to_string(&ControlResponse::failure("boom")).expect("encodes"),
            r#"{"success":false,"error":"boom"}"#
        );
    }
}

use core::fmt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success half of the response envelope: `{"success": true, "data": ...}`,
/// with an optional `"message"` that is omitted entirely when absent.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

impl<T: Serialize> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(e) => write!(f, "Error serializing ApiResponse to JSON: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_without_message() {
        let response = ApiResponse::new(json!({"id": 1}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn success_envelope_with_message() {
        let response = ApiResponse::with_message("Product deleted", json!([1, 2]));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({"success": true, "message": "Product deleted", "data": [1, 2]})
        );
    }
}

//! Uniform response envelope for every boundary operation.

use serde::{Deserialize, Serialize};

/// `{success, data?, error?}` wrapper carried by every HTTP response.
///
/// Failures never cross the boundary as anything else: internal errors are
/// flattened into `success:false` plus a human-readable `error` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful response with no payload (deletions)
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Failed response carrying the error message
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_shape() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][0], 1);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_err_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::err("Question not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Question not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_empty_ok_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::ok_empty()).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
    }
}

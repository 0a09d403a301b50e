use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// 字段级校验错误，键为表单字段名
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 表单校验失败，返回字段级错误
    pub fn validation_failed(errors: FieldErrors) -> Self {
        Self {
            success: false,
            code: ErrorCode::ValidationFailed as i32,
            message: "The given data was invalid".to_string(),
            data: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_shape() {
        let mut errors = FieldErrors::new();
        errors
            .entry("title".to_string())
            .or_default()
            .push("The title field is required".to_string());

        let value = serde_json::to_value(ApiResponse::validation_failed(errors)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], ErrorCode::ValidationFailed as i32);
        assert_eq!(value["errors"]["title"][0], "The title field is required");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_success_omits_errors() {
        let value = serde_json::to_value(ApiResponse::success(42i64, "ok")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("errors").is_none());
    }
}

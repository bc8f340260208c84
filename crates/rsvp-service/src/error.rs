//! HTTP 层错误类型定义

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rsvp_shared::error::RsvpError;
use serde_json::json;

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("资源不存在: {0}")]
    NotFound(String),

    // 系统错误
    #[error("存储错误: {0}")]
    Store(RsvpError),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, error_code = e.code(), "存储操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<RsvpError> for ApiError {
    fn from(err: RsvpError) -> Self {
        match err {
            RsvpError::UnknownMapping(name) => Self::NotFound(format!("映射 {}", name)),
            other => Self::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

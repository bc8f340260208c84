//! 响应 DTO 定义

use serde::Serialize;

use crate::models::{RedemptionOutcome, RedemptionRequest};

/// 提示框样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStyle {
    Success,
    Info,
    Warning,
    Error,
}

/// 提示框
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub style: AlertStyle,
    pub msg: String,
    pub errors: Vec<String>,
}

impl Alert {
    pub fn new(style: AlertStyle, msg: impl Into<String>) -> Self {
        Self {
            style,
            msg: msg.into(),
            errors: Vec::new(),
        }
    }

    /// 兑换结果对应的提示
    pub fn from_outcome(outcome: &RedemptionOutcome) -> Self {
        match outcome {
            RedemptionOutcome::Success => {
                Self::new(AlertStyle::Success, "Your code is valid. Thanks for RSVPing!")
            }
            RedemptionOutcome::AlreadyRegistered => {
                Self::new(AlertStyle::Info, "You've already registered, silly")
            }
            RedemptionOutcome::InvalidCode => {
                Self::new(AlertStyle::Error, "That RSVP code is not valid.")
            }
            RedemptionOutcome::CodeExhausted => {
                Self::new(AlertStyle::Warning, "That RSVP code is no longer valid.")
            }
            RedemptionOutcome::ValidationFailed(errors) => Self {
                style: AlertStyle::Error,
                msg: "Please correct the following:".to_string(),
                errors: errors.clone(),
            },
            RedemptionOutcome::StoreError => {
                Self::new(AlertStyle::Error, "Bummer, an error occurred")
            }
        }
    }
}

/// 首页视图
///
/// 提交表单后回填已输入的字段（邀请码为规范化后的小写形式）
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IndexView {
    /// 首次访问的视图
    pub fn landing(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            alert: None,
            fullname: None,
            email: None,
            code: None,
        }
    }

    /// 提交后的视图
    pub fn submitted(request: RedemptionRequest, outcome: &RedemptionOutcome) -> Self {
        Self {
            text: None,
            alert: Some(Alert::from_outcome(outcome)),
            fullname: Some(request.full_name),
            email: Some(request.email),
            code: Some(request.code),
        }
    }
}

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "ok".to_string(),
            data: Some(data),
        }
    }
}

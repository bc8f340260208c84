use validator::{Validate, ValidationError};

use super::normalize_code;

/// 字段校验顺序，决定错误消息的输出顺序
const FIELD_ORDER: [&str; 3] = ["full_name", "email", "code"];

/// 兑换请求
///
/// 邀请码在构造时即转为小写，后续所有步骤使用规范化后的值。
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RedemptionRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "An RSVP code is required"))]
    pub code: String,
}

impl RedemptionRequest {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        code: impl AsRef<str>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            code: normalize_code(code.as_ref()),
        }
    }

    /// 校验输入并收集所有错误消息
    ///
    /// 各规则独立校验，不短路；每条违反的规则对应一条消息，按字段顺序排列。
    pub fn validation_messages(&self) -> Vec<String> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let field_errors = errors.field_errors();
        FIELD_ORDER
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

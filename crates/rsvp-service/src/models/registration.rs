use rsvp_shared::error::{Result, RsvpError};
use serde::{Deserialize, Serialize};

use super::Mapping;

/// 邀请码规范化：大小写不敏感，统一转为小写
pub fn normalize_code(raw: &str) -> String {
    raw.to_lowercase()
}

/// 邀请码及其剩余容量
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteCode {
    pub code: String,
    pub remaining: i64,
}

impl InviteCode {
    pub fn new(code: &str, remaining: i64) -> Self {
        Self {
            code: normalize_code(code),
            remaining,
        }
    }

    /// 从存储中的计数值解析
    pub fn from_stored(code: &str, raw: &str) -> Result<Self> {
        let remaining = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| RsvpError::CorruptRecord {
                mapping: Mapping::Codes.to_string(),
                field: code.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(code, remaining))
    }
}

/// 参会登记
///
/// 以邮箱（区分大小写，按提交原样）为键存储，值为 `{name, code}` 的 JSON。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub code: String,
}

impl Registration {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// 序列化为存储格式
    pub fn to_stored(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从存储格式解析，格式错误视为记录损坏
    pub fn from_stored(email: &str, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RsvpError::CorruptRecord {
            mapping: Mapping::Rsvp.to_string(),
            field: email.to_string(),
            reason: e.to_string(),
        })
    }
}

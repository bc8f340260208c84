use std::fmt;
use std::str::FromStr;

use rsvp_shared::error::RsvpError;
use serde::Serialize;

/// 键值存储中的命名映射
///
/// - `codes`: 邀请码 -> 剩余容量
/// - `rsvp`: 邮箱 -> 序列化的登记信息 `{name, code}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mapping {
    Codes,
    Rsvp,
}

impl Mapping {
    pub const ALL: [Mapping; 2] = [Mapping::Codes, Mapping::Rsvp];

    /// 存储中的键名
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Codes => "codes",
            Self::Rsvp => "rsvp",
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mapping {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RsvpError::UnknownMapping(s.to_string()))
    }
}

//! 统一错误处理模块
//!
//! 定义系统中所有共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum RsvpError {
    // ==================== 存储错误 ====================
    #[error("Redis 错误: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("存储操作超时: {operation}")]
    Timeout { operation: String },

    #[error("存储记录损坏: {mapping}[{field}] - {reason}")]
    CorruptRecord {
        mapping: String,
        field: String,
        reason: String,
    },

    #[error("未知的映射: {0}")]
    UnknownMapping(String),

    // ==================== 序列化错误 ====================
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(String),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, RsvpError>;

impl RsvpError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Redis(_) => "REDIS_ERROR",
            Self::Timeout { .. } => "STORE_TIMEOUT",
            Self::CorruptRecord { .. } => "CORRUPT_RECORD",
            Self::UnknownMapping(_) => "UNKNOWN_MAPPING",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 仅表示底层故障的性质；兑换流程本身从不自动重试。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Redis(_) | Self::Timeout { .. })
    }
}

impl From<config::ConfigError> for RsvpError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = RsvpError::Timeout {
            operation: "HEXISTS".to_string(),
        };
        assert_eq!(err.code(), "STORE_TIMEOUT");
        assert_eq!(RsvpError::UnknownMapping("users".into()).code(), "UNKNOWN_MAPPING");
    }

    #[test]
    fn test_is_retryable() {
        let redis_err = RsvpError::Redis(redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        )));
        assert!(redis_err.is_retryable());

        let corrupt = RsvpError::CorruptRecord {
            mapping: "rsvp".to_string(),
            field: "a@b.co".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(!corrupt.is_retryable());
    }

    #[test]
    fn test_display_contains_context() {
        let err = RsvpError::CorruptRecord {
            mapping: "rsvp".to_string(),
            field: "guest@example.com".to_string(),
            reason: "missing field `name`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rsvp"));
        assert!(msg.contains("guest@example.com"));
    }
}

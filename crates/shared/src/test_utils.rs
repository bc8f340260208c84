//! 测试工具模块
//!
//! 提供集成测试所需的配置辅助和测试数据生成器，
//! 保证并行测试之间的数据互不干扰。

use uuid::Uuid;

use crate::config::RedisConfig;

/// 创建测试用 Redis 配置
///
/// 优先使用 REDIS_URL 环境变量，默认连接本地 1 号库
pub fn test_redis_config() -> RedisConfig {
    RedisConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/1".to_string()),
        connect_timeout_ms: 2_000,
        response_timeout_ms: 2_000,
    }
}

/// 生成唯一的测试邮箱
pub fn unique_email() -> String {
    format!("guest-{}@example.com", Uuid::new_v4().simple())
}

/// 生成唯一的测试邀请码（小写）
pub fn unique_code() -> String {
    format!("code-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_values() {
        assert_ne!(unique_email(), unique_email());
        let code = unique_code();
        assert_eq!(code, code.to_lowercase());
    }

    #[test]
    fn test_redis_config_has_timeouts() {
        let config = test_redis_config();
        assert!(config.response_timeout_ms > 0);
        assert!(config.url.starts_with("redis://"));
    }
}

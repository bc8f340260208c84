//! 统一可观测性模块
//!
//! 提供 logging、metrics 的统一初始化和管理。
//! 服务通过单一入口点配置可观测性，确保一致的日志格式和指标命名。

pub mod metrics;
pub mod middleware;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;
use serde::Deserialize;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志和指标的来源
    pub service_name: String,

    /// 日志级别（如 "info", "debug"），RUST_LOG 优先
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    pub json_logs: bool,

    /// 是否启动 Prometheus 指标导出
    pub metrics_enabled: bool,

    /// Prometheus 指标导出端口
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "rsvp-service".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }
}

/// 可观测性资源守卫
///
/// 持有指标导出服务的生命周期，drop 时停止导出。
pub struct ObservabilityGuard {
    metrics_handle: Option<metrics::MetricsHandle>,
}

impl ObservabilityGuard {
    /// 创建一个空的 Guard（用于测试或禁用可观测性时）
    pub fn empty() -> Self {
        Self {
            metrics_handle: None,
        }
    }

    /// 指标导出是否已启动
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_handle.is_some()
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.metrics_handle.take() {
            handle.shutdown();
        }
        info!("Shutting down observability...");
    }
}

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（Prometheus 指标，按配置启用）
pub async fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    info!(
        service = %config.service_name,
        metrics_enabled = config.metrics_enabled,
        metrics_port = config.metrics_port,
        "Observability initialized"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::init(config).await?)
    } else {
        None
    };

    Ok(ObservabilityGuard { metrics_handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_with_service_name() {
        let config = ObservabilityConfig::default().with_service_name("rsvp-test");
        assert_eq!(config.service_name, "rsvp-test");
    }

    #[test]
    fn test_empty_guard() {
        let guard = ObservabilityGuard::empty();
        assert!(!guard.metrics_enabled());
    }
}

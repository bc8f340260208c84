//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    /// 建立连接的超时时间（毫秒）
    pub connect_timeout_ms: u64,
    /// 单条命令等待响应的超时时间（毫秒）
    pub response_timeout_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connect_timeout_ms: 1_000,
            response_timeout_ms: 500,
        }
    }
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// 进程内存储，仅用于本地开发
    Memory,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// 启动时预置的邀请码及容量，已存在的邀请码不会被覆盖
    pub seed_codes: HashMap<String, i64>,
}

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_seconds: 10,
        }
    }
}

/// 管理视图配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// 参会名单完整视图的访问口令，未配置时该视图不可用
    pub password: Option<String>,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub store: StoreConfig,
    pub admin: AdminConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "rsvp-service".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            redis: RedisConfig::default(),
            store: StoreConfig::default(),
            admin: AdminConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（RSVP_ 前缀，层级用双下划线，如 RSVP_REDIS__URL -> redis.url）
    /// 5. 托管平台遗留变量（PORT、REDISTOGO_URL、PARTY_PASSWORD）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 文件不存在时忽略
        let _ = dotenvy::dotenv();

        let env = std::env::var("RSVP_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("RSVP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// 应用托管平台注入的遗留环境变量
    ///
    /// - PORT -> server.port
    /// - REDISTOGO_URL -> redis.url（tcp:// 方案改写为 redis://）
    /// - PARTY_PASSWORD -> admin.password
    fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        if let Some(url) = lookup("REDISTOGO_URL") {
            self.redis.url = normalize_redis_url(&url);
        }

        if let Some(password) = lookup("PARTY_PASSWORD").filter(|p| !p.is_empty()) {
            self.admin.password = Some(password);
        }
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn normalize_redis_url(url: &str) -> String {
    match url.strip_prefix("tcp://") {
        Some(rest) => format!("redis://{}", rest),
        None => url.to_string(),
    }
}

//! Redis 连接管理模块
//!
//! 启动时建立一次连接，通过克隆在请求间共享，关闭时显式释放。
//! 每条命令都带响应超时，超时统一转换为 `RsvpError::Timeout`。

use crate::config::RedisConfig;
use crate::error::{Result, RsvpError};
use redis::Client;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument};

/// Redis 客户端
///
/// 内部持有自动重连的 `ConnectionManager`，克隆开销很小。
#[derive(Clone)]
pub struct KvClient {
    conn: ConnectionManager,
    response_timeout: Duration,
}

impl KvClient {
    /// 建立 Redis 连接
    #[instrument(skip(config))]
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        info!("Connecting to Redis...");

        let client = Client::open(config.url.as_str())?;
        let connect_timeout = Duration::from_millis(config.connect_timeout_ms);

        let conn = tokio::time::timeout(connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| RsvpError::Timeout {
                operation: "CONNECT".to_string(),
            })??;

        info!("Redis connection established");

        Ok(Self {
            conn,
            response_timeout: Duration::from_millis(config.response_timeout_ms),
        })
    }

    /// 获取连接句柄
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// 在响应超时内等待一条 Redis 命令完成
    pub async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.response_timeout, fut).await {
            Ok(result) => result.map_err(RsvpError::from),
            Err(_) => Err(RsvpError::Timeout {
                operation: operation.to_string(),
            }),
        }
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.connection();
        self.bounded("PING", redis::cmd("PING").query_async::<String>(&mut conn))
            .await
            .map(|_| ())
    }

    /// 关闭连接
    ///
    /// 其他克隆仍持有连接时，底层连接会在最后一个克隆释放后断开。
    pub fn close(self) {
        drop(self.conn);
        info!("Redis client closed");
    }
}

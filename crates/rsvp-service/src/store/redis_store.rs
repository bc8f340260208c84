//! Redis 存储
//!
//! 每个映射对应一个 Redis hash（`codes`、`rsvp`），键名与历史数据保持一致。

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use rsvp_shared::error::Result;
use rsvp_shared::kv::KvClient;
use tracing::{debug, instrument};

use super::traits::RegistrationStore;
use crate::models::Mapping;

/// 计数大于 0 时减一，否则返回 -1 且不修改
///
/// 读取和扣减在同一脚本内执行，并发请求不会把计数扣成负数。
static DECREMENT_IF_POSITIVE: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r#"
        local current = tonumber(redis.call("hget", KEYS[1], ARGV[1]))
        if current and current > 0 then
            return redis.call("hincrby", KEYS[1], ARGV[1], -1)
        end
        return -1
        "#,
    )
});

/// 基于 Redis hash 的登记存储
#[derive(Clone)]
pub struct RedisRegistrationStore {
    kv: KvClient,
}

impl RedisRegistrationStore {
    pub fn new(kv: KvClient) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl RegistrationStore for RedisRegistrationStore {
    async fn exists(&self, mapping: Mapping, field: &str) -> Result<bool> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HEXISTS",
                redis::cmd("HEXISTS")
                    .arg(mapping.as_str())
                    .arg(field)
                    .query_async::<bool>(&mut conn),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn decrement_if_positive(&self, mapping: Mapping, field: &str) -> Result<i64> {
        let mut conn = self.kv.connection();
        let remaining = self
            .kv
            .bounded(
                "DECREMENT_IF_POSITIVE",
                DECREMENT_IF_POSITIVE
                    .key(mapping.as_str())
                    .arg(field)
                    .invoke_async::<i64>(&mut conn),
            )
            .await?;

        debug!(remaining, "Decrement script executed");
        Ok(remaining)
    }

    async fn increment(&self, mapping: Mapping, field: &str, delta: i64) -> Result<i64> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HINCRBY",
                redis::cmd("HINCRBY")
                    .arg(mapping.as_str())
                    .arg(field)
                    .arg(delta)
                    .query_async::<i64>(&mut conn),
            )
            .await
    }

    async fn set_field(&self, mapping: Mapping, field: &str, value: &str) -> Result<()> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HSET",
                redis::cmd("HSET")
                    .arg(mapping.as_str())
                    .arg(field)
                    .arg(value)
                    .query_async::<()>(&mut conn),
            )
            .await
    }

    #[instrument(skip(self, value))]
    async fn set_field_if_absent(
        &self,
        mapping: Mapping,
        field: &str,
        value: &str,
    ) -> Result<bool> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HSETNX",
                redis::cmd("HSETNX")
                    .arg(mapping.as_str())
                    .arg(field)
                    .arg(value)
                    .query_async::<bool>(&mut conn),
            )
            .await
    }

    async fn get_field(&self, mapping: Mapping, field: &str) -> Result<Option<String>> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HGET",
                redis::cmd("HGET")
                    .arg(mapping.as_str())
                    .arg(field)
                    .query_async::<Option<String>>(&mut conn),
            )
            .await
    }

    async fn get_all(&self, mapping: Mapping) -> Result<HashMap<String, String>> {
        let mut conn = self.kv.connection();
        self.kv
            .bounded(
                "HGETALL",
                redis::cmd("HGETALL")
                    .arg(mapping.as_str())
                    .query_async::<HashMap<String, String>>(&mut conn),
            )
            .await
    }

    async fn health_check(&self) -> Result<()> {
        self.kv.health_check().await
    }
}

//! 内存存储
//!
//! 使用 DashMap 实现的进程内存储，适用于本地开发和测试。
//! 条件操作在分片写锁内完成，与 Redis 实现具有相同的原子性语义。

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rsvp_shared::error::{Result, RsvpError};

use super::traits::{NOT_DECREMENTED, RegistrationStore};
use crate::models::Mapping;

/// 内存登记存储
///
/// 与 Redis 一致，计数以字符串形式保存。
#[derive(Debug, Default)]
pub struct MemoryRegistrationStore {
    codes: DashMap<String, String>,
    rsvp: DashMap<String, String>,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并预置邀请码
    pub fn with_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let store = Self::new();
        for (code, remaining) in codes {
            store.codes.insert(code.into(), remaining.to_string());
        }
        store
    }

    fn map(&self, mapping: Mapping) -> &DashMap<String, String> {
        match mapping {
            Mapping::Codes => &self.codes,
            Mapping::Rsvp => &self.rsvp,
        }
    }
}

fn not_an_integer(mapping: Mapping, field: &str) -> RsvpError {
    RsvpError::Internal(format!("hash value is not an integer: {}[{}]", mapping, field))
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn exists(&self, mapping: Mapping, field: &str) -> Result<bool> {
        Ok(self.map(mapping).contains_key(field))
    }

    async fn decrement_if_positive(&self, mapping: Mapping, field: &str) -> Result<i64> {
        let Some(mut entry) = self.map(mapping).get_mut(field) else {
            return Ok(NOT_DECREMENTED);
        };

        match entry.trim().parse::<i64>() {
            Ok(current) if current > 0 => {
                let next = current - 1;
                *entry = next.to_string();
                Ok(next)
            }
            _ => Ok(NOT_DECREMENTED),
        }
    }

    async fn increment(&self, mapping: Mapping, field: &str, delta: i64) -> Result<i64> {
        let mut entry = self
            .map(mapping)
            .entry(field.to_string())
            .or_insert_with(|| "0".to_string());

        let current = entry
            .trim()
            .parse::<i64>()
            .map_err(|_| not_an_integer(mapping, field))?;
        let next = current + delta;
        *entry = next.to_string();
        Ok(next)
    }

    async fn set_field(&self, mapping: Mapping, field: &str, value: &str) -> Result<()> {
        self.map(mapping).insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn set_field_if_absent(
        &self,
        mapping: Mapping,
        field: &str,
        value: &str,
    ) -> Result<bool> {
        match self.map(mapping).entry(field.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(vacant) => {
                vacant.insert(value.to_string());
                Ok(true)
            }
        }
    }

    async fn get_field(&self, mapping: Mapping, field: &str) -> Result<Option<String>> {
        Ok(self.map(mapping).get(field).map(|v| v.value().clone()))
    }

    async fn get_all(&self, mapping: Mapping) -> Result<HashMap<String, String>> {
        Ok(self
            .map(mapping)
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_decrement_if_positive_stops_at_zero() {
        let store = MemoryRegistrationStore::with_codes([("vip", 2)]);

        assert_eq!(store.decrement_if_positive(Mapping::Codes, "vip").await.unwrap(), 1);
        assert_eq!(store.decrement_if_positive(Mapping::Codes, "vip").await.unwrap(), 0);
        assert_eq!(
            store.decrement_if_positive(Mapping::Codes, "vip").await.unwrap(),
            NOT_DECREMENTED
        );
        // 计数不会变为负数
        assert_eq!(
            store.get_field(Mapping::Codes, "vip").await.unwrap().as_deref(),
            Some("0")
        );
    }

    #[tokio::test]
    async fn test_decrement_missing_or_non_numeric() {
        let store = MemoryRegistrationStore::new();
        assert_eq!(
            store.decrement_if_positive(Mapping::Codes, "ghost").await.unwrap(),
            NOT_DECREMENTED
        );

        store.set_field(Mapping::Codes, "odd", "lots").await.unwrap();
        assert_eq!(
            store.decrement_if_positive(Mapping::Codes, "odd").await.unwrap(),
            NOT_DECREMENTED
        );
    }

    #[tokio::test]
    async fn test_set_field_if_absent() {
        let store = MemoryRegistrationStore::new();
        assert!(store.set_field_if_absent(Mapping::Rsvp, "a@b.co", "first").await.unwrap());
        assert!(!store.set_field_if_absent(Mapping::Rsvp, "a@b.co", "second").await.unwrap());
        assert_eq!(
            store.get_field(Mapping::Rsvp, "a@b.co").await.unwrap().as_deref(),
            Some("first")
        );
    }

    #[tokio::test]
    async fn test_increment_creates_and_rejects_non_integer() {
        let store = MemoryRegistrationStore::new();
        assert_eq!(store.increment(Mapping::Codes, "new", 3).await.unwrap(), 3);
        assert_eq!(store.increment(Mapping::Codes, "new", -1).await.unwrap(), 2);

        store.set_field(Mapping::Codes, "bad", "x").await.unwrap();
        assert!(store.increment(Mapping::Codes, "bad", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_mappings_are_isolated() {
        let store = MemoryRegistrationStore::with_codes([("vip", 1)]);
        assert!(store.exists(Mapping::Codes, "vip").await.unwrap());
        assert!(!store.exists(Mapping::Rsvp, "vip").await.unwrap());
        assert_eq!(store.get_all(Mapping::Rsvp).await.unwrap().len(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_decrements_never_oversell() {
        let store = Arc::new(MemoryRegistrationStore::with_codes([("vip", 10)]));

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.decrement_if_positive(Mapping::Codes, "vip").await.unwrap()
                })
            })
            .collect();

        let mut taken = 0;
        for handle in handles {
            if handle.await.unwrap() >= 0 {
                taken += 1;
            }
        }

        assert_eq!(taken, 10);
        assert_eq!(
            store.get_field(Mapping::Codes, "vip").await.unwrap().as_deref(),
            Some("0")
        );
    }
}

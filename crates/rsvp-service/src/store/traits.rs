//! 存储 Trait 定义
//!
//! 兑换流程只依赖这组原子操作，所有并发控制都下推到存储层，
//! 服务进程内不持有任何锁。

use std::collections::HashMap;

use async_trait::async_trait;
use rsvp_shared::error::Result;

use crate::models::Mapping;

/// `decrement_if_positive` 未扣减时的返回值
pub const NOT_DECREMENTED: i64 = -1;

/// 登记存储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// 字段是否存在于映射中
    async fn exists(&self, mapping: Mapping, field: &str) -> Result<bool>;

    /// 原子地在计数大于 0 时减一并返回新值
    ///
    /// 计数不存在、非整数或已为 0 时不做修改，返回 [`NOT_DECREMENTED`]。
    async fn decrement_if_positive(&self, mapping: Mapping, field: &str) -> Result<i64>;

    /// 原子地调整计数并返回新值
    async fn increment(&self, mapping: Mapping, field: &str, delta: i64) -> Result<i64>;

    /// 写入或覆盖字段
    async fn set_field(&self, mapping: Mapping, field: &str, value: &str) -> Result<()>;

    /// 仅在字段不存在时写入，返回是否写入成功
    async fn set_field_if_absent(&self, mapping: Mapping, field: &str, value: &str)
    -> Result<bool>;

    /// 读取字段
    async fn get_field(&self, mapping: Mapping, field: &str) -> Result<Option<String>>;

    /// 读取整个映射
    async fn get_all(&self, mapping: Mapping) -> Result<HashMap<String, String>>;

    /// 健康检查
    async fn health_check(&self) -> Result<()>;
}

//! 登记存储层
//!
//! 抽象两个持久映射（邀请码剩余容量、邮箱到登记记录）的原子操作，
//! 提供 Redis 和内存两种实现。

mod memory_store;
mod redis_store;
mod traits;

use std::collections::HashMap;

use rsvp_shared::error::Result;
use tracing::info;

use crate::models::{Mapping, normalize_code};

pub use memory_store::MemoryRegistrationStore;
pub use redis_store::RedisRegistrationStore;
pub use traits::{NOT_DECREMENTED, RegistrationStore};

#[cfg(test)]
pub use traits::MockRegistrationStore;

/// 预置邀请码
///
/// 只写入不存在的邀请码，重启不会重置已消耗的容量。返回新写入的数量。
pub async fn seed_codes(
    store: &dyn RegistrationStore,
    codes: &HashMap<String, i64>,
) -> Result<usize> {
    let mut seeded = 0;
    for (code, remaining) in codes {
        let code = normalize_code(code);
        if store
            .set_field_if_absent(Mapping::Codes, &code, &remaining.to_string())
            .await?
        {
            info!(code = %code, remaining, "Seeded invite code");
            seeded += 1;
        }
    }
    Ok(seeded)
}

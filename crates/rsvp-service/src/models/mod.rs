//! 领域模型
//!
//! - `mapping`: 键值存储中的两个命名映射
//! - `registration`: 参会登记与邀请码
//! - `request`: 兑换请求及其输入校验
//! - `outcome`: 兑换结果分类

mod mapping;
mod outcome;
mod registration;
mod request;

pub use mapping::Mapping;
pub use outcome::{RedemptionOutcome, RedemptionStep};
pub use registration::{InviteCode, Registration, normalize_code};
pub use request::RedemptionRequest;

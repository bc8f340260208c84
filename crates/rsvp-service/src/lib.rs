//! RSVP 邀请码兑换服务
//!
//! 访客提交姓名、邮箱和邀请码，服务校验邀请码、扣减剩余名额并记录登记。
//!
//! ## 模块结构
//!
//! - `models`: 领域模型（映射、登记、请求、结果）
//! - `store`: 登记存储接口及 Redis / 内存实现
//! - `service`: 兑换流程与名单查询
//! - `dto` / `handlers` / `routes`: HTTP 层
//!
//! ## 兑换流程
//!
//! 1. 输入校验 -> 2. 查重 -> 3. 校验邀请码 -> 4. 原子扣减 -> 5. 条件提交

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::ApiError;
pub use models::{Mapping, RedemptionOutcome, RedemptionRequest, Registration};
pub use service::{ListingService, RsvpService};
pub use state::AppState;
pub use store::{MemoryRegistrationStore, RedisRegistrationStore, RegistrationStore};

//! 服务层
//!
//! ## 模块结构
//!
//! - `rsvp_service`: 邀请码兑换流程
//! - `listing_service`: 参会名单查询（只读操作）
//! - `dto`: 名单展示结构

pub mod dto;
pub mod listing_service;
pub mod rsvp_service;

pub use dto::*;
pub use listing_service::ListingService;
pub use rsvp_service::RsvpService;

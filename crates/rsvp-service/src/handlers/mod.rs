//! HTTP 处理器模块
//!
//! - `rsvp`: 首页与 RSVP 表单提交
//! - `listing`: 参会名单与映射导出
//! - `health`: 存活与就绪探针

pub mod health;
pub mod listing;
pub mod rsvp;

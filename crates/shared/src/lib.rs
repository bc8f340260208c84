//! 共享库
//!
//! 包含 RSVP 服务共用的配置、错误处理、Redis 连接、可观测性等基础设施代码。

pub mod config;
pub mod error;
pub mod kv;
pub mod observability;
pub mod test_utils;

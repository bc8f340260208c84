//! HTTP 层 DTO 模块
//!
//! 包含表单请求和响应视图的数据传输对象

pub mod request;
pub mod response;

pub use request::RsvpForm;
pub use response::{Alert, AlertStyle, ApiResponse, IndexView};

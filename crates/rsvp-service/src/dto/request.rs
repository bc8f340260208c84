use serde::Deserialize;

use crate::models::RedemptionRequest;

/// RSVP 表单
///
/// 缺失的字段按空字符串处理，交给输入校验产生对应的错误消息
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RsvpForm {
    pub fullname: String,
    pub email: String,
    pub code: String,
}

impl From<RsvpForm> for RedemptionRequest {
    fn from(form: RsvpForm) -> Self {
        RedemptionRequest::new(form.fullname, form.email, form.code)
    }
}

//! RSVP 表单处理器

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
};
use chrono::Local;

use crate::{
    dto::{IndexView, RsvpForm},
    models::{RedemptionOutcome, RedemptionRequest},
    state::AppState,
};

/// 首页显示的服务器时间格式，如 `Friday 8:05:09 pm`
const CLOCK_FORMAT: &str = "%A %-I:%M:%S %P";

/// 首页
///
/// GET /
pub async fn index() -> Json<IndexView> {
    Json(IndexView::landing(Local::now().format(CLOCK_FORMAT).to_string()))
}

/// 提交 RSVP
///
/// POST / 与 POST /rsvp
///
/// 业务结果一律返回 200，只有存储故障返回 500
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<RsvpForm>,
) -> (StatusCode, Json<IndexView>) {
    let request = RedemptionRequest::from(form);
    let outcome = state.rsvp_service.redeem(request.clone()).await;

    let status = match outcome {
        RedemptionOutcome::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };

    (status, Json(IndexView::submitted(request, &outcome)))
}

//! 参会名单 API 处理器

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::warn;

use crate::{
    dto::ApiResponse,
    error::{ApiError, Result},
    service::{AttendeeListing, CodeRoster},
    state::AppState,
};

/// 原样导出映射
///
/// GET /hash/{key}
pub async fn dump_mapping(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HashMap<String, String>>> {
    let entries = state.listing_service.dump(&key).await?;
    Ok(Json(entries))
}

/// 公开名单：按邀请码分组，只显示姓名
///
/// GET /partypeople
pub async fn party_people(State(state): State<AppState>) -> Result<String> {
    let listing = state.listing_service.list_attendees().await?;
    Ok(listing.render_plain())
}

/// 完整名单（含邮箱），需要管理口令
///
/// GET /partypeople/{password}
pub async fn party_people_admin(
    State(state): State<AppState>,
    Path(password): Path<String>,
) -> Result<Json<ApiResponse<AttendeeListing>>> {
    if !state.listing_service.verify_admin_password(&password) {
        warn!("Rejected admin listing request");
        return Err(ApiError::Unauthorized("口令错误".to_string()));
    }

    let listing = state.listing_service.list_attendees().await?;
    Ok(Json(ApiResponse::success(listing)))
}

/// 单个邀请码的登记名单及剩余容量
///
/// GET /rsvps/{code}
pub async fn code_roster(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<CodeRoster>>> {
    let roster = state.listing_service.roster_for_code(&code).await?;
    Ok(Json(ApiResponse::success(roster)))
}

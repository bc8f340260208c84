//! 健康检查处理器

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

const SERVICE_NAME: &str = "rsvp-service";

/// 存活探针：服务进程正常即返回 ok
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查存储是否可用
///
/// GET /ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let store_ok = state.store.health_check().await.is_ok();

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if store_ok { "ok" } else { "degraded" },
            "service": SERVICE_NAME,
            "checks": {
                "store": if store_ok { "ok" } else { "fail" }
            }
        })),
    )
}

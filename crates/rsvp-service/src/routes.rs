//! 路由配置模块

use std::time::Duration;

use axum::{
    Router, middleware,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rsvp_shared::{config::ServerConfig, observability::middleware as obs_middleware};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// RSVP 表单路由
fn rsvp_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::rsvp::index).post(handlers::rsvp::submit))
        .route("/rsvp", post(handlers::rsvp::submit))
}

/// 名单与映射导出路由
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/hash/{key}", get(handlers::listing::dump_mapping))
        .route("/partypeople", get(handlers::listing::party_people))
        .route(
            "/partypeople/{password}",
            get(handlers::listing::party_people_admin),
        )
        .route("/rsvps/{code}", get(handlers::listing::code_roster))
}

/// 探针路由
fn probe_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Page not found.")
}

/// 构建完整的应用路由
///
/// request_id 位于最外层，保证 http_tracing 能读到请求 ID
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(rsvp_routes())
        .merge(listing_routes())
        .merge(probe_routes())
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

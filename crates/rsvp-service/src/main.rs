//! RSVP 服务入口

use std::sync::Arc;

use rsvp_service::{
    AppState, MemoryRegistrationStore, RedisRegistrationStore, RegistrationStore, routes,
    store::seed_codes,
};
use rsvp_shared::{
    config::{AppConfig, StoreBackend},
    kv::KvClient,
    observability,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("rsvp-service")?;

    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!("Starting rsvp-service on {}", config.server_addr());

    // 存储客户端在启动时打开一次，关闭时显式释放
    let (store, kv): (Arc<dyn RegistrationStore>, Option<KvClient>) = match config.store.backend {
        StoreBackend::Redis => {
            let kv = KvClient::connect(&config.redis).await?;
            (Arc::new(RedisRegistrationStore::new(kv.clone())), Some(kv))
        }
        StoreBackend::Memory => {
            if config.is_production() {
                warn!("Memory store in production: registrations are lost on restart");
            }
            info!("Using in-memory store");
            (Arc::new(MemoryRegistrationStore::new()), None)
        }
    };

    if !config.store.seed_codes.is_empty() {
        let seeded = seed_codes(store.as_ref(), &config.store.seed_codes).await?;
        info!(seeded, configured = config.store.seed_codes.len(), "Invite codes seeded");
    }

    if config.admin.password.is_none() {
        info!("No admin password configured, full attendee listing disabled");
    }

    let state = AppState::new(store, config.admin.password.clone());
    let app = routes::build_router(state, &config.server);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(kv) = kv {
        kv.close();
    }

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// 收到 Ctrl+C 或 SIGTERM 后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::service::{ListingService, RsvpService};
use crate::store::RegistrationStore;

/// Axum 应用共享状态
///
/// 存储客户端在启动时创建一次，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub rsvp_service: Arc<RsvpService>,
    pub listing_service: Arc<ListingService>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(store: Arc<dyn RegistrationStore>, admin_password: Option<String>) -> Self {
        Self {
            rsvp_service: Arc::new(RsvpService::new(store.clone())),
            listing_service: Arc::new(ListingService::new(store.clone(), admin_password)),
            store,
        }
    }
}

use std::sync::Arc;

use receipts_cloud::ImageStore;
use receipts_db::ReceiptStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Receipt store selected by `DATA_BACKEND`.
    pub store: Arc<dyn ReceiptStore>,
    /// Image store selected by `IMAGE_BACKEND`.
    pub images: Arc<dyn ImageStore>,
    /// Server configuration (upload limits, backend names).
    pub config: Arc<ServerConfig>,
}

pub mod health;
pub mod receipts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /receipts                 list, create
/// /receipts/{id}            get, replace, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/receipts", receipts::api_router())
}

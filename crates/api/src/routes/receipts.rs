//! Route definitions for the receipts resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::{receipts, receipts_api};
use crate::state::AppState;

/// Allowance for the text fields and multipart framing around an image.
pub const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// HTML pages mounted at `/receipts`.
///
/// ```text
/// GET    /                -> list
/// GET    /add             -> add_form
/// POST   /add             -> create
/// GET    /{id}            -> view
/// GET    /{id}/edit       -> edit_form
/// POST   /{id}/edit       -> update
/// GET    /{id}/delete     -> delete
/// ```
///
/// Bodies are capped at `max_image_bytes` plus [`FORM_OVERHEAD_BYTES`]. Other
/// methods on these paths get the HTML 405 page.
pub fn router(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(receipts::list))
        .route("/add", get(receipts::add_form).post(receipts::create))
        .route("/{id}", get(receipts::view))
        .route(
            "/{id}/edit",
            get(receipts::edit_form).post(receipts::update),
        )
        .route("/{id}/delete", get(receipts::delete))
        .method_not_allowed_fallback(receipts::method_not_allowed)
        .layer(DefaultBodyLimit::max(
            max_image_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}

/// JSON resource mounted at `/api/v1/receipts`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(receipts_api::list).post(receipts_api::create))
        .route(
            "/{id}",
            get(receipts_api::get_by_id)
                .put(receipts_api::update)
                .delete(receipts_api::delete),
        )
}

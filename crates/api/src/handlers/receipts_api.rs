//! Handlers for the JSON `/api/v1/receipts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use receipts_core::error::CoreError;
use receipts_core::pagination::{clamp_limit, parse_page_token, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use receipts_core::receipt::ENTITY;
use receipts_core::types::DbId;
use receipts_db::models::receipt::{Receipt, ReceiptInput};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/receipts
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<PageResponse<Receipt>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = parse_page_token(params.page_token.as_deref())?;
    let page = state.store.list(limit, offset).await?;
    Ok(Json(page.into()))
}

/// POST /api/v1/receipts
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ReceiptInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Receipt>>)> {
    let input = input.validate()?;
    let receipt = state.store.create(&input).await?;
    tracing::info!(receipt_id = receipt.id, "Receipt created via API");
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/receipts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<DataResponse<Receipt>>> {
    let receipt = state
        .store
        .read(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: receipt }))
}

/// PUT /api/v1/receipts/{id}
///
/// Replaces every editable field; omitted optional fields are cleared.
pub async fn update(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    JsonBody(input): JsonBody<ReceiptInput>,
) -> AppResult<Json<DataResponse<Receipt>>> {
    let input = input.validate()?;
    let receipt = state
        .store
        .update(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::info!(receipt_id = receipt.id, "Receipt updated via API");
    Ok(Json(DataResponse { data: receipt }))
}

/// DELETE /api/v1/receipts/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete(id).await? {
        tracing::info!(receipt_id = id, "Receipt deleted via API");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}

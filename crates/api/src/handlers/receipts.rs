//! Handlers for the HTML `/receipts` pages.
//!
//! Form posts redirect (303) to the receipt page on success. A form that fails
//! validation is rendered again with status 400 and the submitted values.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::{context, Value};
use receipts_core::error::CoreError;
use receipts_core::pagination::{parse_page_token, DEFAULT_PAGE_SIZE};
use receipts_core::receipt::{parse_receipt_id, ENTITY};
use receipts_core::types::DbId;
use receipts_db::models::receipt::{Receipt, ReceiptInput};

use crate::error::AppError;
use crate::forms::{read_multipart, store_upload, ReceiptForm, SubmittedForm};
use crate::query::PageTokenParams;
use crate::state::AppState;
use crate::views::{error_page, render, render_with_status, PageResult};

/// Mount point of these pages; redirects are built from it.
pub const BASE_PATH: &str = "/receipts";

const ACTION_ADD: &str = "Add";
const ACTION_EDIT: &str = "Edit";

/// GET /receipts
///
/// Display a page of receipts (up to ten at a time).
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageTokenParams>, QueryRejection>,
) -> PageResult<Html<String>> {
    let Query(params) = query.map_err(AppError::from)?;
    let offset = parse_page_token(params.page_token.as_deref())?;
    let page = state.store.list(DEFAULT_PAGE_SIZE, offset).await?;

    Ok(render(
        "receipts/list.html",
        context! {
            receipts => page.items,
            next_page_token => page.next_page_token,
        },
    )?)
}

/// GET /receipts/add
///
/// Display a form for creating a receipt.
pub async fn add_form() -> PageResult<Response> {
    Ok(form_page(StatusCode::OK, ACTION_ADD, None, &ReceiptForm::default(), None)?)
}

/// POST /receipts/add
///
/// Create a receipt, storing the uploaded image first if there is one.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> PageResult<Response> {
    let submitted = read_multipart(multipart.map_err(AppError::from)?).await?;
    let form = submitted.form.clone();

    let input = match accept(&state, submitted).await {
        Ok(input) => input,
        Err(AppError::Core(CoreError::Validation(msg))) => {
            return Ok(form_page(StatusCode::BAD_REQUEST, ACTION_ADD, None, &form, Some(&msg))?);
        }
        Err(err) => return Err(err.into()),
    };

    let receipt = state.store.create(&input).await?;
    tracing::info!(receipt_id = receipt.id, backend = state.store.backend(), "Receipt created");

    Ok(redirect_to_receipt(receipt.id))
}

/// GET /receipts/{id}/edit
///
/// Display a receipt for editing.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Response> {
    let receipt = load(&state, &raw_id).await?;
    Ok(form_page(
        StatusCode::OK,
        ACTION_EDIT,
        Some(receipt.id),
        &ReceiptForm::from_receipt(&receipt),
        None,
    )?)
}

/// POST /receipts/{id}/edit
///
/// Update a receipt. Without a new upload the hidden `image_url` field keeps
/// the current image.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> PageResult<Response> {
    let id = load(&state, &raw_id).await?.id;
    let submitted = read_multipart(multipart.map_err(AppError::from)?).await?;
    let form = submitted.form.clone();

    let input = match accept(&state, submitted).await {
        Ok(input) => input,
        Err(AppError::Core(CoreError::Validation(msg))) => {
            return Ok(form_page(
                StatusCode::BAD_REQUEST,
                ACTION_EDIT,
                Some(id),
                &form,
                Some(&msg),
            )?);
        }
        Err(err) => return Err(err.into()),
    };

    let receipt = state
        .store
        .update(id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    tracing::info!(receipt_id = receipt.id, "Receipt updated");

    Ok(redirect_to_receipt(receipt.id))
}

/// GET /receipts/{id}
///
/// Display a receipt.
pub async fn view(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Html<String>> {
    let receipt = load(&state, &raw_id).await?;
    Ok(render("receipts/view.html", context! { receipt => receipt })?)
}

/// Any other method on a receipts page.
pub async fn method_not_allowed() -> Response {
    error_page(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "Method Not Allowed",
    )
}

/// GET /receipts/{id}/delete
///
/// Delete a receipt and go back to the list. Deleting an absent receipt
/// still redirects.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Redirect> {
    let id = parse_receipt_id(&raw_id)?;
    if state.store.delete(id).await? {
        tracing::info!(receipt_id = id, "Receipt deleted");
    } else {
        tracing::debug!(receipt_id = id, "Delete requested for absent receipt");
    }
    Ok(Redirect::to(BASE_PATH))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load(state: &AppState, raw_id: &str) -> Result<Receipt, AppError> {
    let id = parse_receipt_id(raw_id)?;
    state
        .store
        .read(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
}

/// Validate the form fields, then store the upload (if any) and point
/// `image_url` at it. Fields are checked first so invalid forms upload nothing.
async fn accept(state: &AppState, submitted: SubmittedForm) -> Result<ReceiptInput, AppError> {
    let mut input = submitted.form.to_input()?;
    if let Some(upload) = submitted.upload {
        let url = store_upload(state.images.as_ref(), upload, state.config.max_image_bytes).await?;
        input.image_url = Some(url);
    }
    Ok(input)
}

fn form_page(
    status: StatusCode,
    action: &str,
    receipt_id: Option<DbId>,
    form: &ReceiptForm,
    error: Option<&str>,
) -> Result<Response, AppError> {
    // Only the base path and a numeric id.
    let form_action = Value::from_safe_string(match receipt_id {
        Some(id) => format!("{BASE_PATH}/{id}/edit"),
        None => format!("{BASE_PATH}/add"),
    });
    render_with_status(
        status,
        "receipts/form.html",
        context! {
            action => action,
            form_action => form_action,
            form => form,
            error => error,
        },
    )
}

fn redirect_to_receipt(id: DbId) -> Response {
    Redirect::to(&format!("{BASE_PATH}/{id}")).into_response()
}

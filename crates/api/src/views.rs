//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and loaded once into a shared
//! [`minijinja::Environment`]. Names ending in `.html` get HTML auto-escaping.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::{context, Environment, Value};
use receipts_cloud::CloudError;
use receipts_core::error::CoreError;
use receipts_core::receipt::format_amount;
use receipts_db::StoreError;

use crate::error::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("receipts/list.html", include_str!("../templates/receipts/list.html")),
    ("receipts/form.html", include_str!("../templates/receipts/form.html")),
    ("receipts/view.html", include_str!("../templates/receipts/view.html")),
];

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            if let Err(err) = env.add_template(name, source) {
                // Surfaces again as a render error on first use.
                tracing::error!(template = name, error = %err, "Failed to load template");
            }
        }
        env.add_filter("money", money);
        env
    })
}

/// `{{ cents|money }}` renders `1234` as `12.34`.
fn money(cents: i64) -> String {
    format_amount(cents)
}

/// Render a template into an HTML body.
pub fn render(name: &str, ctx: Value) -> Result<Html<String>, AppError> {
    environment()
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .map(Html)
        .map_err(|err| AppError::InternalError(format!("Failed to render {name}: {err:#}")))
}

/// Render a template with an explicit status code.
pub fn render_with_status(
    status: StatusCode,
    name: &str,
    ctx: Value,
) -> Result<Response, AppError> {
    Ok((status, render(name, ctx)?).into_response())
}

/// Error type for HTML routes: renders `error.html` instead of a JSON envelope.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        Self(err.into())
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<CloudError> for PageError {
    fn from(err: CloudError) -> Self {
        Self(err.into())
    }
}

/// Convenience type alias for HTML handler return values.
pub type PageResult<T> = Result<T, PageError>;

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.0.classify();
        error_page(status, code, &message)
    }
}

/// Render the shared error page, falling back to plain text if rendering fails.
pub fn error_page(status: StatusCode, code: &str, message: &str) -> Response {
    let ctx = context! {
        status => status.as_u16(),
        code => code,
        message => message,
    };
    match render("error.html", ctx) {
        Ok(html) => (status, html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render error page");
            (status, message.to_string()).into_response()
        }
    }
}

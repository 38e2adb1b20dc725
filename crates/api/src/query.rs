//! Query parameter types for list endpoints.

use serde::Deserialize;

/// `?pageToken=` on the HTML list page (camelCase, as the list links emit it).
#[derive(Debug, Default, Deserialize)]
pub struct PageTokenParams {
    #[serde(rename = "pageToken")]
    pub page_token: Option<String>,
}

/// `?limit=&page_token=` on the JSON list endpoint. `limit` is clamped by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub page_token: Option<String>,
}

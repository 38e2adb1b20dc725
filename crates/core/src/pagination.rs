//! Offset pagination with opaque-looking page tokens.
//!
//! A page token is the decimal offset of the first item on the page. Stores
//! fetch one row more than the page size; that extra row only tells us a next
//! page exists and is never returned.

use serde::Serialize;

use crate::error::CoreError;

/// Receipts shown per list page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for caller-supplied page sizes on the JSON API.
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of results plus the token for the following page, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with `LIMIT limit + 1 OFFSET offset`.
    pub fn from_overfetch(mut rows: Vec<T>, limit: i64, offset: i64) -> Self {
        let limit_usize = usize::try_from(limit).unwrap_or(0);
        let next_page_token = if rows.len() > limit_usize {
            rows.truncate(limit_usize);
            Some((offset + limit).to_string())
        } else {
            None
        };
        Self {
            items: rows,
            next_page_token,
        }
    }
}

/// Clamp a user-provided limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Decode a page token into an offset. Missing or blank tokens mean the first page.
pub fn parse_page_token(token: Option<&str>) -> Result<i64, CoreError> {
    let Some(raw) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(0);
    };
    match raw.parse::<i64>() {
        Ok(offset) if offset >= 0 => Ok(offset),
        _ => Err(CoreError::Validation(format!("Invalid page token '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_first_page() {
        assert_eq!(parse_page_token(None).unwrap(), 0);
        assert_eq!(parse_page_token(Some("")).unwrap(), 0);
    }

    #[test]
    fn numeric_token_is_offset() {
        assert_eq!(parse_page_token(Some("20")).unwrap(), 20);
    }

    #[test]
    fn bad_token_is_rejected() {
        assert!(parse_page_token(Some("abc")).is_err());
        assert!(parse_page_token(Some("-10")).is_err());
    }

    #[test]
    fn overfetch_yields_next_token_and_truncates() {
        let page = Page::from_overfetch((0..11).collect::<Vec<_>>(), 10, 20);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.next_page_token.as_deref(), Some("30"));
    }

    #[test]
    fn exact_page_has_no_next_token() {
        let page = Page::from_overfetch((0..10).collect::<Vec<_>>(), 10, 0);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 10);
        assert_eq!(clamp_limit(Some(0), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 1);
        assert_eq!(clamp_limit(Some(500), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 100);
        assert_eq!(clamp_limit(Some(25), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 25);
    }
}

//! Field rules for receipts.
//!
//! HTML forms submit every field as a string, so each helper takes the raw
//! form value and returns the normalized value the stores persist. Blank
//! optional fields normalize to `None`.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "Receipt";

/// Maximum merchant name length, in characters.
pub const MAX_MERCHANT_LEN: usize = 200;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Parse a receipt id taken from a URL path segment.
pub fn parse_receipt_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("Invalid receipt id '{raw}'"))),
    }
}

// ---------------------------------------------------------------------------
// Merchant / description
// ---------------------------------------------------------------------------

/// Trim the merchant name and check it is present and not too long.
pub fn normalize_merchant(raw: &str) -> Result<String, CoreError> {
    let merchant = raw.trim();
    if merchant.is_empty() {
        return Err(CoreError::Validation("Merchant is required".into()));
    }
    if merchant.chars().count() > MAX_MERCHANT_LEN {
        return Err(CoreError::Validation(format!(
            "Merchant must be at most {MAX_MERCHANT_LEN} characters"
        )));
    }
    Ok(merchant.to_string())
}

/// Trim the description; blank becomes `None`.
pub fn normalize_description(raw: &str) -> Result<Option<String>, CoreError> {
    let description = raw.trim();
    if description.is_empty() {
        return Ok(None);
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(description.to_string()))
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// Parse a decimal amount such as `12.34`, `$1,200` or `0.5` into cents.
///
/// Accepts an optional leading `$` and `,` thousands separators. Rejects
/// negative values and more than two decimal places.
pub fn parse_amount(raw: &str) -> Result<Option<i64>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || CoreError::Validation(format!("Invalid amount '{trimmed}'"));

    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if unsigned.starts_with('-') {
        return Err(CoreError::Validation("Amount must not be negative".into()));
    }
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(CoreError::Validation(
            "Amount must have at most two decimal places".into(),
        ));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents))
        .map(Some)
        .ok_or_else(|| CoreError::Validation("Amount is too large".into()))
}

/// Format cents as a plain two-decimal amount (`1234` -> `"12.34"`).
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Reject stored amounts below zero (JSON clients send cents directly).
pub fn validate_amount_cents(cents: Option<i64>) -> Result<(), CoreError> {
    match cents {
        Some(c) if c < 0 => Err(CoreError::Validation("Amount must not be negative".into())),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Currency / date
// ---------------------------------------------------------------------------

/// Normalize a three-letter currency code to upper case; blank becomes `None`.
pub fn normalize_currency(raw: &str) -> Result<Option<String>, CoreError> {
    let code = raw.trim();
    if code.is_empty() {
        return Ok(None);
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "Invalid currency '{code}'. Must be a three-letter code such as USD"
        )));
    }
    Ok(Some(code.to_ascii_uppercase()))
}

/// Parse an ISO `YYYY-MM-DD` purchase date; blank becomes `None`.
pub fn parse_purchase_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Invalid purchase date '{value}'. Use YYYY-MM-DD")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

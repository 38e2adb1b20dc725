//! Receipt entity model and DTOs.

use chrono::NaiveDate;
use receipts_core::error::CoreError;
use receipts_core::receipt::{
    normalize_currency, normalize_description, normalize_merchant, validate_amount_cents,
};
use receipts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A receipt row from the `receipts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Receipt {
    pub id: DbId,
    pub merchant: String,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub purchased_on: Option<NaiveDate>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable receipt fields, used for create and for full-replacement update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReceiptInput {
    pub merchant: String,
    #[serde(default)]
    pub amount_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purchased_on: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ReceiptInput {
    /// Apply the field rules and return the normalized input.
    ///
    /// Stores only ever see inputs that went through this.
    pub fn validate(self) -> Result<Self, CoreError> {
        validate_amount_cents(self.amount_cents)?;
        Ok(Self {
            merchant: normalize_merchant(&self.merchant)?,
            amount_cents: self.amount_cents,
            currency: match self.currency {
                Some(c) => normalize_currency(&c)?,
                None => None,
            },
            purchased_on: self.purchased_on,
            description: match self.description {
                Some(d) => normalize_description(&d)?,
                None => None,
            },
            image_url: self
                .image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        })
    }
}

impl From<&Receipt> for ReceiptInput {
    fn from(receipt: &Receipt) -> Self {
        Self {
            merchant: receipt.merchant.clone(),
            amount_cents: receipt.amount_cents,
            currency: receipt.currency.clone(),
            purchased_on: receipt.purchased_on,
            description: receipt.description.clone(),
            image_url: receipt.image_url.clone(),
        }
    }
}

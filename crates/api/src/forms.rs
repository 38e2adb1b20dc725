//! Multipart receipt forms and image upload handling.
//!
//! Both the add and edit pages post `multipart/form-data`: the receipt fields
//! as text parts plus an optional `image` file part. A file part with no
//! content (no file chosen in the browser) counts as no upload.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use receipts_cloud::ImageStore;
use receipts_core::error::CoreError;
use receipts_core::images::{object_name, validate_image, IMAGE_FIELD};
use receipts_core::receipt::{
    format_amount, normalize_currency, normalize_description, normalize_merchant, parse_amount,
    parse_purchase_date,
};
use receipts_db::models::receipt::{Receipt, ReceiptInput};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Raw receipt form values, exactly as submitted (or as pre-filled for editing).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReceiptForm {
    pub merchant: String,
    pub amount: String,
    pub currency: String,
    pub purchased_on: String,
    pub description: String,
    /// Hidden field carrying the current image URL through an edit.
    pub image_url: String,
}

impl ReceiptForm {
    /// Pre-fill the edit form from a stored receipt.
    pub fn from_receipt(receipt: &Receipt) -> Self {
        Self {
            merchant: receipt.merchant.clone(),
            amount: receipt.amount_cents.map(format_amount).unwrap_or_default(),
            currency: receipt.currency.clone().unwrap_or_default(),
            purchased_on: receipt
                .purchased_on
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            description: receipt.description.clone().unwrap_or_default(),
            image_url: receipt.image_url.clone().unwrap_or_default(),
        }
    }

    /// Parse and validate the form into store input.
    pub fn to_input(&self) -> Result<ReceiptInput, CoreError> {
        let image_url = self.image_url.trim();
        Ok(ReceiptInput {
            merchant: normalize_merchant(&self.merchant)?,
            amount_cents: parse_amount(&self.amount)?,
            currency: normalize_currency(&self.currency)?,
            purchased_on: parse_purchase_date(&self.purchased_on)?,
            description: normalize_description(&self.description)?,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "merchant" => self.merchant = value,
            "amount" => self.amount = value,
            "currency" => self.currency = value,
            "purchased_on" => self.purchased_on = value,
            "description" => self.description = value,
            "image_url" => self.image_url = value,
            _ => {} // ignore unknown fields
        }
    }
}

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A fully read multipart submission.
#[derive(Debug, Default)]
pub struct SubmittedForm {
    pub form: ReceiptForm,
    pub upload: Option<Upload>,
}

/// Drain a multipart body into form values and an optional upload.
pub async fn read_multipart(mut multipart: Multipart) -> Result<SubmittedForm, AppError> {
    let mut submitted = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        if name == IMAGE_FIELD {
            let filename = field.file_name().unwrap_or("").to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !bytes.is_empty() {
                submitted.upload = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            submitted.form.set(&name, text);
        }
    }

    Ok(submitted)
}

/// Validate an upload, store it under a fresh object name and return its public URL.
pub async fn store_upload(
    images: &dyn ImageStore,
    upload: Upload,
    max_bytes: usize,
) -> Result<String, AppError> {
    let kind = validate_image(&upload.bytes, max_bytes)?;
    let object = object_name(&upload.filename, Uuid::now_v7());
    let size = upload.bytes.len();

    let url = images.put(&object, kind.content_type(), upload.bytes).await?;
    tracing::info!(
        object = %object,
        size,
        backend = images.backend(),
        "Stored receipt image"
    );
    Ok(url)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

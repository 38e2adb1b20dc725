//! Repository for the `receipts` table.

use receipts_core::types::DbId;
use sqlx::PgPool;

use crate::models::receipt::{Receipt, ReceiptInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, merchant, amount_cents, currency, purchased_on, description, \
                       image_url, created_at, updated_at";

/// Provides CRUD operations for receipts.
pub struct ReceiptRepo;

impl ReceiptRepo {
    /// Insert a new receipt, returning the created row.
    pub async fn create(pool: &PgPool, input: &ReceiptInput) -> Result<Receipt, sqlx::Error> {
        let query = format!(
            "INSERT INTO receipts (merchant, amount_cents, currency, purchased_on, description, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(&input.merchant)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(input.purchased_on)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a receipt by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM receipts WHERE id = $1");
        sqlx::query_as::<_, Receipt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List receipts newest first, `limit` rows starting at `offset`.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Receipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM receipts ORDER BY id DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Receipt>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field of a receipt.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ReceiptInput,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!(
            "UPDATE receipts SET
                merchant = $2,
                amount_cents = $3,
                currency = $4,
                purchased_on = $5,
                description = $6,
                image_url = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(id)
            .bind(&input.merchant)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(input.purchased_on)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a receipt by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM receipts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! In-process receipt store.
//!
//! Used for local development and the API integration tests. Data lives only
//! as long as the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use receipts_core::pagination::Page;
use receipts_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::receipt::{Receipt, ReceiptInput};
use crate::store::{ReceiptStore, StoreError};

#[derive(Default)]
struct Inner {
    /// Last id handed out; ids are never reused after a delete.
    last_id: DbId,
    rows: BTreeMap<DbId, Receipt>,
}

#[derive(Default)]
pub struct MemoryReceiptStore {
    inner: RwLock<Inner>,
}

impl MemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReceiptStore for MemoryReceiptStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Receipt>, StoreError> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit + 1).unwrap_or(0);
        let rows: Vec<Receipt> = inner
            .rows
            .values()
            .rev()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();
        Ok(Page::from_overfetch(rows, limit, offset))
    }

    async fn create(&self, input: &ReceiptInput) -> Result<Receipt, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let receipt = Receipt {
            id: inner.last_id,
            merchant: input.merchant.clone(),
            amount_cents: input.amount_cents,
            currency: input.currency.clone(),
            purchased_on: input.purchased_on,
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(receipt.id, receipt.clone());
        tracing::debug!(receipt_id = receipt.id, "Inserted receipt into memory store");
        Ok(receipt)
    }

    async fn read(&self, id: DbId) -> Result<Option<Receipt>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        input: &ReceiptInput,
    ) -> Result<Option<Receipt>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.merchant = input.merchant.clone();
        row.amount_cents = input.amount_cents;
        row.currency = input.currency.clone();
        row.purchased_on = input.purchased_on;
        row.description = input.description.clone();
        row.image_url = input.image_url.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}

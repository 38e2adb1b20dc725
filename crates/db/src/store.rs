//! The storage seam between the HTTP layer and the configured backend.

use async_trait::async_trait;
use receipts_core::pagination::Page;
use receipts_core::types::DbId;

use crate::models::receipt::{Receipt, ReceiptInput};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD operations every receipt backend provides.
///
/// Inputs are expected to have passed [`ReceiptInput::validate`].
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// One page of receipts, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Receipt>, StoreError>;

    async fn create(&self, input: &ReceiptInput) -> Result<Receipt, StoreError>;

    async fn read(&self, id: DbId) -> Result<Option<Receipt>, StoreError>;

    /// Replace all editable fields. `None` if the receipt does not exist.
    async fn update(&self, id: DbId, input: &ReceiptInput)
        -> Result<Option<Receipt>, StoreError>;

    /// Returns `true` if a receipt was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

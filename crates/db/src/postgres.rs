use async_trait::async_trait;
use receipts_core::pagination::Page;
use receipts_core::types::DbId;

use crate::models::receipt::{Receipt, ReceiptInput};
use crate::repositories::ReceiptRepo;
use crate::store::{ReceiptStore, StoreError};
use crate::DbPool;

/// [`ReceiptStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgReceiptStore {
    pool: DbPool,
}

impl PgReceiptStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceiptStore for PgReceiptStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Receipt>, StoreError> {
        let rows = ReceiptRepo::list(&self.pool, limit + 1, offset).await?;
        Ok(Page::from_overfetch(rows, limit, offset))
    }

    async fn create(&self, input: &ReceiptInput) -> Result<Receipt, StoreError> {
        Ok(ReceiptRepo::create(&self.pool, input).await?)
    }

    async fn read(&self, id: DbId) -> Result<Option<Receipt>, StoreError> {
        Ok(ReceiptRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: &ReceiptInput,
    ) -> Result<Option<Receipt>, StoreError> {
        Ok(ReceiptRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ReceiptRepo::delete(&self.pool, id).await?)
    }
}

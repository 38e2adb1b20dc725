pub mod health;
pub mod receipts;
pub mod receipts_api;

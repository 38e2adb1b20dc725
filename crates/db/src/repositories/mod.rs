//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod receipt_repo;

pub use receipt_repo::ReceiptRepo;

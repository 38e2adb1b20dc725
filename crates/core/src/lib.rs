//! Domain building blocks shared by the receipts storage, cloud and API crates.
//!
//! Nothing here touches the network or a database, so every rule in this crate
//! is unit-tested in place.

pub mod config;
pub mod error;
pub mod images;
pub mod pagination;
pub mod receipt;
pub mod types;

/// Receipt ids are PostgreSQL BIGSERIAL values (the memory store mimics them).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

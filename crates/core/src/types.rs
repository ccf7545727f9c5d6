/// Database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are UTC, stored as TIMESTAMPTZ.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Errors boxed across the collaborator seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are `timestamptz`, always handled as UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

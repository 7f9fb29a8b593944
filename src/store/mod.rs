pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{LeadRecord, LeadSubmission};

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Default name of the table that holds consultation leads.
pub const DEFAULT_SHEET: &str = "consultation_submissions";

#[derive(Debug)]
pub enum StoreError {
    /// The named table does not exist. Never created implicitly.
    SheetMissing(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::SheetMissing(name) => write!(f, "記録先「{name}」が見つかりません"),
            StoreError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Append-only tabular storage for leads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one row stamped with the current server time.
    async fn append(&self, lead: &LeadSubmission) -> Result<LeadRecord, StoreError>;

    /// Where an operator can look at the stored rows.
    fn location(&self) -> String;
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::{RecordStore, StoreError};
use crate::models::{LeadRecord, LeadSubmission};

/// Leads stored as rows of an existing Postgres table.
pub struct PgRecordStore {
    pool: PgPool,
    table: String,
}

impl PgRecordStore {
    /// `table` must already satisfy [`is_valid_table_name`]; config loading
    /// checks it.
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }

    async fn table_exists(&self) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT to_regclass($1) IS NOT NULL")
            .bind(&self.table)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn append(&self, lead: &LeadSubmission) -> Result<LeadRecord, StoreError> {
        if !self.table_exists().await? {
            return Err(StoreError::SheetMissing(self.table.clone()));
        }

        let record = LeadRecord::new(lead, Utc::now());

        let stored = sqlx::query_as::<_, LeadRecord>(&format!(
            "INSERT INTO {} (id, submitted_at, name, email, job, content, datetime, source)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, submitted_at, name, email, job, content, datetime, source",
            self.table
        ))
        .bind(record.id)
        .bind(record.submitted_at)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.job)
        .bind(&record.content)
        .bind(&record.datetime)
        .bind(&record.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    fn location(&self) -> String {
        format!("postgres table {}", self.table)
    }
}

/// Table names are interpolated into SQL, so only plain lowercase
/// identifiers are accepted.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && name.len() <= 63
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_check() {
        assert!(is_valid_table_name("consultation_submissions"));
        assert!(is_valid_table_name("_leads2"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("2leads"));
        assert!(!is_valid_table_name("leads; DROP TABLE users"));
        assert!(!is_valid_table_name("Leads"));
    }
}

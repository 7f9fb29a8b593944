use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{RecordStore, StoreError, DEFAULT_SHEET};
use crate::models::{LeadRecord, LeadSubmission};

/// In-process store. Rows are lost on restart.
pub struct MemoryRecordStore {
    sheet: String,
    exists: bool,
    rows: Mutex<Vec<LeadRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::named(DEFAULT_SHEET)
    }

    pub fn named(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            exists: true,
            rows: Mutex::new(Vec::new()),
        }
    }

    /// A store whose sheet was never created; every append fails.
    pub fn missing(sheet: &str) -> Self {
        Self {
            exists: false,
            ..Self::named(sheet)
        }
    }

    fn rows(&self) -> MutexGuard<'_, Vec<LeadRecord>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn records(&self) -> Vec<LeadRecord> {
        self.rows().clone()
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, lead: &LeadSubmission) -> Result<LeadRecord, StoreError> {
        if !self.exists {
            return Err(StoreError::SheetMissing(self.sheet.clone()));
        }

        let mut rows = self.rows();

        // Wall clock may step backwards; keep insertion order and time order aligned.
        let now = Utc::now();
        let submitted_at = rows
            .last()
            .map(|last| last.submitted_at.max(now))
            .unwrap_or(now);

        let record = LeadRecord::new(lead, submitted_at);
        rows.push(record.clone());
        Ok(record)
    }

    fn location(&self) -> String {
        format!("memory://{}", self.sheet)
    }
}

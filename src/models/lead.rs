use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field names that must be present and non-blank on every lead.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "content", "datetime"];

/// A lead as it arrives on the wire. Every field is optional here so that
/// missing values surface as validation failures rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job: Option<String>,
    pub content: Option<String>,
    pub datetime: Option<String>,
    pub source: Option<String>,
}

/// A validated consultation request. Optional fields are carried as empty
/// strings, which is also how they are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub job: String,
    pub content: String,
    /// Free-form preferred slots, one candidate per line.
    pub datetime: String,
    #[serde(default)]
    pub source: String,
}

impl LeadSubmission {
    /// Preferred slots split on newlines, blank lines dropped.
    pub fn datetime_slots(&self) -> Vec<&str> {
        self.datetime
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub job: String,
    pub content: String,
    pub datetime: String,
    pub source: String,
}

impl LeadRecord {
    pub fn new(lead: &LeadSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            submitted_at,
            name: lead.name.clone(),
            email: lead.email.clone(),
            job: lead.job.clone(),
            content: lead.content.clone(),
            datetime: lead.datetime.clone(),
            source: lead.source.clone(),
        }
    }

    /// Column values in sheet order: timestamp, name, email, job, content,
    /// datetime, source.
    pub fn row(&self) -> [String; 7] {
        [
            self.submitted_at.to_rfc3339(),
            self.name.clone(),
            self.email.clone(),
            self.job.clone(),
            self.content.clone(),
            self.datetime.clone(),
            self.source.clone(),
        ]
    }
}

/// Response body of the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

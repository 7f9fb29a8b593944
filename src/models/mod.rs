pub mod lead;

pub use lead::{LeadPayload, LeadRecord, LeadSubmission, SubmissionResponse};

use crate::models::{LeadPayload, LeadSubmission};

pub const MISSING_REQUIRED: &str = "必須項目が入力されていません";

/// Check required fields and normalise the payload into a submission.
/// Returns the names of the missing fields on failure.
pub fn validate(payload: LeadPayload) -> Result<LeadSubmission, Vec<&'static str>> {
    fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(field);
                String::new()
            }
        }
    }

    let mut missing = Vec::new();
    let name = required(payload.name, "name", &mut missing);
    let email = required(payload.email, "email", &mut missing);
    let content = required(payload.content, "content", &mut missing);
    let datetime = required(payload.datetime, "datetime", &mut missing);

    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(LeadSubmission {
        name,
        email,
        job: payload.job.unwrap_or_default(),
        content,
        datetime,
        source: payload.source.unwrap_or_default(),
    })
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::models::LeadSubmission;

/// Same shape a browser accepts for `<input type="email">`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FormField {
    fn new(id: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            id,
            kind,
            required,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    ValueMissing,
    TypeMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub validity: Validity,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self.validity {
            Validity::ValueMissing => "このフィールドを入力してください。",
            Validity::TypeMismatch => "メールアドレスの形式が正しくありません。",
        }
    }
}

/// The consultation form, fields keyed by element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationForm {
    fields: Vec<FormField>,
}

impl ConsultationForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::new("name", FieldKind::Text, true),
                FormField::new("email", FieldKind::Email, true),
                FormField::new("job", FieldKind::Text, false),
                FormField::new("content", FieldKind::TextArea, true),
                FormField::new("datetime", FieldKind::TextArea, true),
                FormField::new("source", FieldKind::Select, false),
            ],
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Set a field's value. Returns false for unknown ids.
    pub fn set(&mut self, id: &str, value: &str) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, id: &str) -> &str {
        self.field(id).map(|f| f.value.as_str()).unwrap_or_default()
    }

    /// Constraint validation as a browser performs it: required fields must
    /// be non-empty, email fields must look like an address when filled.
    pub fn check_validity(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| {
                let value = match field.kind {
                    // Browsers strip surrounding whitespace from email inputs.
                    FieldKind::Email => field.value.trim(),
                    _ => field.value.as_str(),
                };
                let validity = if value.is_empty() {
                    field.required.then_some(Validity::ValueMissing)
                } else if field.kind == FieldKind::Email && !EMAIL_RE.is_match(value) {
                    Some(Validity::TypeMismatch)
                } else {
                    None
                };
                let validity = validity?;
                Some(FieldError {
                    field: field.id,
                    validity,
                })
            })
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Collect the payload. Text values are trimmed; the select value is
    /// sent as chosen.
    pub fn to_submission(&self) -> LeadSubmission {
        let trimmed = |id: &str| self.value(id).trim().to_string();
        LeadSubmission {
            name: trimmed("name"),
            email: trimmed("email"),
            job: trimmed("job"),
            content: trimmed("content"),
            datetime: trimmed("datetime"),
            source: self.value("source").to_string(),
        }
    }

    /// Clear every value; constraints stay as they are.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }
}

impl Default for ConsultationForm {
    fn default() -> Self {
        Self::new()
    }
}

pub const IDLE_LABEL: &str = "無料相談を申し込む";
pub const BUSY_LABEL: &str = "送信中...";

/// The submit button. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
    disabled: Arc<AtomicBool>,
}

impl SubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &'static str {
        if self.is_disabled() { BUSY_LABEL } else { IDLE_LABEL }
    }

    /// Disable the control for the lifetime of the returned guard. `None`
    /// when it is already disabled.
    pub fn acquire(&self) -> Option<InFlight> {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                control: self.clone(),
            })
    }
}

/// Re-enables the submit control when dropped.
#[derive(Debug)]
pub struct InFlight {
    control: SubmitControl,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.control.disabled.store(false, Ordering::Release);
    }
}

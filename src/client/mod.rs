//! Browser-side consultation form logic.
//!
//! [`FormController`] validates the form, posts the lead through a
//! [`SubmitTransport`] and drives the status line. With the default
//! [`ResponseMode::Opaque`] the endpoint's reply is never read, so every
//! request that leaves the client without a transport error is shown as a
//! success, including ones the endpoint rejected.

pub mod analytics;
pub mod form;
pub mod message;
pub mod transport;

use std::sync::{Mutex, MutexGuard};

use crate::models::LeadSubmission;

pub use analytics::{AnalyticsEvent, AnalyticsHook};
pub use form::{ConsultationForm, FieldError, SubmitControl};
pub use message::{MessageKind, MessageView, StatusRegion};
pub use transport::{HttpTransport, ResponseMode, SubmitTransport};

/// Target value shipped before the endpoint is deployed.
pub const SUBMISSION_URL_PLACEHOLDER: &str = "YOUR_SUBMISSION_ENDPOINT_URL_HERE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The submission target is still the placeholder.
    NotConfigured,
    Transport(String),
    /// Only produced in [`ResponseMode::Checked`].
    Rejected(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::NotConfigured => write!(f, "Submission URL is not configured"),
            SubmitError::Transport(msg) => write!(f, "Transport error: {msg}"),
            SubmitError::Rejected(msg) => write!(f, "Rejected by endpoint: {msg}"),
        }
    }
}

impl SubmitError {
    /// Text shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::NotConfigured => message::NOT_CONFIGURED_TEXT,
            SubmitError::Transport(_) | SubmitError::Rejected(_) => message::SEND_FAILED_TEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Busy,
    /// Constraint validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    Sent,
    Failed(SubmitError),
}

pub struct FormController<T> {
    target: String,
    transport: T,
    form: Mutex<ConsultationForm>,
    submit: SubmitControl,
    message: StatusRegion,
    analytics: Option<AnalyticsHook>,
}

impl<T: SubmitTransport> FormController<T> {
    pub fn new(target: &str, transport: T) -> Self {
        Self {
            target: target.to_string(),
            transport,
            form: Mutex::new(ConsultationForm::new()),
            submit: SubmitControl::new(),
            message: StatusRegion::new(),
            analytics: None,
        }
    }

    pub fn with_analytics(mut self, hook: AnalyticsHook) -> Self {
        self.analytics = Some(hook);
        self
    }

    fn form(&self) -> MutexGuard<'_, ConsultationForm> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mutate the form, as user input would.
    pub fn edit<R>(&self, f: impl FnOnce(&mut ConsultationForm) -> R) -> R {
        f(&mut self.form())
    }

    pub fn form_snapshot(&self) -> ConsultationForm {
        self.form().clone()
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn message(&self) -> &StatusRegion {
        &self.message
    }

    /// Handle a submit event.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.submit.is_disabled() {
            return SubmitOutcome::Busy;
        }

        let lead = {
            let form = self.form();
            if let Err(errors) = form.check_validity() {
                return SubmitOutcome::Invalid(errors);
            }
            form.to_submission()
        };

        // Held until this function returns or the future is dropped.
        let Some(_in_flight) = self.submit.acquire() else {
            return SubmitOutcome::Busy;
        };
        self.message.clear();

        match self.send(&lead).await {
            Ok(()) => {
                self.message.show_success(message::SUCCESS_TEXT);
                self.form().reset();
                self.track(true);
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::error!("Form submission error: {e}");
                self.message.show_error(e.user_message());
                self.track(false);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, lead: &LeadSubmission) -> Result<(), SubmitError> {
        if self.target == SUBMISSION_URL_PLACEHOLDER {
            return Err(SubmitError::NotConfigured);
        }

        let reply = self
            .transport
            .send(&self.target, lead)
            .await
            .map_err(SubmitError::Transport)?;

        match reply {
            Some(reply) if !reply.success => Err(SubmitError::Rejected(reply.message)),
            _ => Ok(()),
        }
    }

    fn track(&self, success: bool) {
        if let Some(hook) = &self.analytics {
            hook(&AnalyticsEvent::submission(success));
        }
    }
}

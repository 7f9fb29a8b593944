use async_trait::async_trait;

use crate::models::{LeadSubmission, SubmissionResponse};

/// Whether the endpoint's reply is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Fire-and-forget: the reply is never inspected, so any request that
    /// does not fail at the transport level counts as delivered.
    #[default]
    Opaque,
    /// Read the JSON reply and surface `success: false`.
    Checked,
}

/// Sends a lead to the submission endpoint.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// `Ok(None)` when the reply was not read.
    async fn send(
        &self,
        url: &str,
        lead: &LeadSubmission,
    ) -> Result<Option<SubmissionResponse>, String>;
}

#[async_trait]
impl<T: SubmitTransport + ?Sized> SubmitTransport for std::sync::Arc<T> {
    async fn send(
        &self,
        url: &str,
        lead: &LeadSubmission,
    ) -> Result<Option<SubmissionResponse>, String> {
        (**self).send(url, lead).await
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    mode: ResponseMode,
}

impl HttpTransport {
    pub fn new(mode: ResponseMode) -> Self {
        Self::with_client(reqwest::Client::new(), mode)
    }

    pub fn with_client(client: reqwest::Client, mode: ResponseMode) -> Self {
        Self { client, mode }
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn send(
        &self,
        url: &str,
        lead: &LeadSubmission,
    ) -> Result<Option<SubmissionResponse>, String> {
        let response = self
            .client
            .post(url)
            .json(lead)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        match self.mode {
            ResponseMode::Opaque => Ok(None),
            ResponseMode::Checked => response
                .json::<SubmissionResponse>()
                .await
                .map(Some)
                .map_err(|e| format!("Unreadable response: {e}")),
        }
    }
}

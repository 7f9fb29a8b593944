pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::LeadRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

/// Outcome of one notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(String),
    /// No mailer configured.
    Skipped,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent)
    }
}

/// Sends the operator alert and the submitter confirmation for a stored
/// lead. Send errors are logged here and reported as [`Delivery::Failed`];
/// they never propagate.
pub struct NotificationSender {
    mailer: Option<Arc<dyn Mailer>>,
    operator_email: String,
    brand: String,
    records_url: String,
}

impl NotificationSender {
    pub fn new(
        mailer: Option<Arc<dyn Mailer>>,
        operator_email: &str,
        brand: &str,
        records_url: &str,
    ) -> Self {
        Self {
            mailer,
            operator_email: operator_email.to_string(),
            brand: brand.to_string(),
            records_url: records_url.to_string(),
        }
    }

    pub async fn notify_operator(&self, record: &LeadRecord) -> Delivery {
        let mail = OutgoingMail {
            to: self.operator_email.clone(),
            subject: templates::operator_subject(record),
            body: templates::render_operator_alert(record, &self.records_url),
        };
        self.deliver("operator alert", &mail).await
    }

    pub async fn confirm_submitter(&self, record: &LeadRecord) -> Delivery {
        let mail = OutgoingMail {
            to: record.email.clone(),
            subject: templates::confirmation_subject(&self.brand),
            body: templates::render_confirmation(record, &self.brand),
        };
        self.deliver("confirmation", &mail).await
    }

    async fn deliver(&self, kind: &str, mail: &OutgoingMail) -> Delivery {
        let Some(mailer) = &self.mailer else {
            tracing::warn!("Mailer not configured, skipping {kind} to {}", mail.to);
            return Delivery::Skipped;
        };

        match mailer.send(mail).await {
            Ok(()) => {
                tracing::info!("Sent {kind} to {}", mail.to);
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!("Failed to send {kind} to {}: {e}", mail.to);
                Delivery::Failed(e)
            }
        }
    }
}

//! Notification service implementation
//!
//! This service handles email formatting and dispatch through the
//! transactional email API. Dispatch is fire-and-forget: callers enqueue
//! onto an unbounded channel and a background worker delivers best-effort,
//! so a failed or slow email can never block or fail a booking transition.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::i18n::I18n;
use crate::models::booking::Booking;
use crate::models::profile::Profile;
use crate::utils::errors::{EmailError, NuqtaError, Result};
use crate::utils::logging::log_email_failure;

/// One outbound email
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Handle for enqueueing emails; cheap to clone
#[derive(Debug, Clone)]
pub struct Mailer {
    tx: mpsc::UnboundedSender<EmailMessage>,
}

impl Mailer {
    /// Spawn the delivery worker and return the enqueue handle alongside
    /// its join handle.
    pub fn spawn(config: EmailConfig) -> Result<(Self, JoinHandle<()>)> {
        let sender = EmailSender::new(config)?;
        let (tx, mut rx) = mpsc::unbounded_channel::<EmailMessage>();

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(e) = sender.send(&message).await {
                    log_email_failure(&message.to, &message.subject, &e.to_string());
                }
            }
            debug!("Mailer worker shutting down");
        });

        Ok((Self { tx }, handle))
    }

    /// Enqueue an email. Never blocks and never fails the caller; a closed
    /// worker just drops the message with a warning.
    pub fn enqueue(&self, message: EmailMessage) {
        if self.tx.send(message).is_err() {
            warn!("Mailer worker is gone, dropping email");
        }
    }
}

/// Low-level client for the transactional email API
#[derive(Debug, Clone)]
pub struct EmailSender {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailSender {
    pub fn new(config: EmailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Post one message to the email API
    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        if !self.config.enabled {
            debug!(to = %message.to, subject = %message.subject, "Email disabled, skipping send");
            return Ok(());
        }

        let payload = serde_json::json!({
            "from": self.config.from_address,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmailError::Timeout
                } else {
                    EmailError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(NuqtaError::Email(EmailError::Rejected {
                status: response.status().as_u16(),
            }));
        }

        info!(to = %message.to, subject = %message.subject, "Email dispatched");
        Ok(())
    }
}

/// Which booking email to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEmail {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingEmail {
    fn key(&self) -> &'static str {
        match self {
            BookingEmail::Confirmed => "booking.confirmed",
            BookingEmail::Pending => "booking.pending",
            BookingEmail::Cancelled => "booking.cancelled",
        }
    }
}

/// Renders bilingual notification emails and hands them to the mailer
#[derive(Debug, Clone)]
pub struct NotificationService {
    mailer: Mailer,
    i18n: I18n,
}

impl NotificationService {
    pub fn new(mailer: Mailer, i18n: I18n) -> Self {
        Self { mailer, i18n }
    }

    /// Enqueue a booking lifecycle email in the recipient's language
    pub fn booking_email(
        &self,
        kind: BookingEmail,
        recipient: &Profile,
        event_title: &str,
        booking: &Booking,
    ) {
        let lang = self.i18n.detect_user_language(Some(&recipient.language));
        let name = recipient
            .full_name
            .clone()
            .unwrap_or_else(|| recipient.email.clone());

        let mut params = HashMap::new();
        params.insert("name".to_string(), name);
        params.insert("event".to_string(), event_title.to_string());
        params.insert("total".to_string(), format!("{:.2}", booking.total_amount));

        let subject = self
            .i18n
            .t(&format!("{}.subject", kind.key()), &lang, Some(&params));
        let html = self
            .i18n
            .t(&format!("{}.body", kind.key()), &lang, Some(&params));

        self.mailer.enqueue(EmailMessage {
            to: recipient.email.clone(),
            subject,
            html,
        });
    }

    /// Enqueue a prospect-vendor claim invitation
    pub fn vendor_claim_invite(&self, to: &str, vendor_name: &str, lang: &str) {
        let lang = self.i18n.detect_user_language(Some(lang));

        let mut params = HashMap::new();
        params.insert("vendor".to_string(), vendor_name.to_string());

        let subject = self.i18n.t("vendor.claim_invite.subject", &lang, Some(&params));
        let html = self.i18n.t("vendor.claim_invite.body", &lang, Some(&params));

        self.mailer.enqueue(EmailMessage {
            to: to.to_string(),
            subject,
            html,
        });
    }
}

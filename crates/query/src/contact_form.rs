//! Contact form state machine.

use folio_client::{ApiClient, ClientError};
use folio_core::ContactMessage;

pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";
pub const OFFLINE_MESSAGE: &str =
    "Failed to send message. Please check your connection and try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Sent(String),
    Failed(String),
}

impl SubmitStatus {
    /// Banner text for the settled states.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Sent(msg) | Self::Failed(msg) => Some(msg),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// Entered values plus the outcome of the last submission.
///
/// Values survive a failed submission so the visitor can retry without
/// retyping; a successful one clears them.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactMessage,
    status: SubmitStatus,
}

impl ContactForm {
    #[must_use]
    pub fn new(fields: ContactMessage) -> Self {
        Self { fields, status: SubmitStatus::Idle }
    }

    #[must_use]
    pub const fn status(&self) -> &SubmitStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting)
    }

    /// Hide the banner of the last submission.
    pub fn dismiss(&mut self) {
        if !self.is_submitting() {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Validate and send the current fields, returning the settled status.
    pub async fn submit(&mut self, client: &ApiClient) -> &SubmitStatus {
        if let Err(e) = self.fields.validate() {
            self.status = SubmitStatus::Failed(e.to_string());
            return &self.status;
        }
        self.status = SubmitStatus::Submitting;
        self.status = match client.submit_contact(&self.fields).await {
            Ok(ack) => {
                tracing::info!("contact message sent");
                self.fields = ContactMessage::default();
                SubmitStatus::Sent(ack.message.unwrap_or_else(|| SENT_MESSAGE.to_owned()))
            },
            Err(e) => {
                tracing::warn!(error = %e, "contact message failed");
                SubmitStatus::Failed(failure_message(&e))
            },
        };
        &self.status
    }
}

fn failure_message(err: &ClientError) -> String {
    if err.is_network() {
        return OFFLINE_MESSAGE.to_owned();
    }
    err.detail().map_or_else(|| FAILED_MESSAGE.to_owned(), str::to_owned)
}

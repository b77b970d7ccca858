//! Contact form submission.

use folio_core::{CONTACTS_PATH, ContactMessage};
use serde::Deserialize;

use crate::client::{ApiClient, status_error};
use crate::error::ClientError;

/// Acknowledgement returned after a contact message is stored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContactAck {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// Submit a contact-form message.
    ///
    /// A success response without a JSON body still counts as success.
    ///
    /// # Errors
    /// [`ClientError::Network`] on transport failure; [`ClientError::HttpStatus`]
    /// for non-2xx responses, carrying the server's `detail` when present.
    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactAck, ClientError> {
        let request = self.client.post(self.url(CONTACTS_PATH)).json(message);
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "contact submission rejected");
            return Err(status_error(status, &body));
        }
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

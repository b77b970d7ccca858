//! Contact form payload and the current-user lookup.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Body of a contact-form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Client-side sanity check run before submitting.
    ///
    /// The server performs the authoritative validation; this only catches
    /// blank required fields and an obviously malformed address.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in
            [("name", &self.name), ("email", &self.email), ("message", &self.message)]
        {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidInput(format!("{field} must not be empty")));
            }
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(CoreError::InvalidInput(format!("invalid email address: {email}")));
        }
        Ok(())
    }
}

/// Response of `GET /api/users/me/`. Only the privilege flag is consumed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    #[serde(default)]
    pub is_superuser: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            subject: String::new(),
            message: "Hello".to_owned(),
        }
    }

    #[test]
    fn valid_message_passes() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let msg = ContactMessage { name: "  ".to_owned(), ..message() };
        let err = msg.validate().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let msg = ContactMessage { email: "ada@localhost".to_owned(), ..message() };
        assert!(matches!(msg.validate(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn current_user_defaults_to_unprivileged() {
        let user: CurrentUser = serde_json::from_str("{}").unwrap();
        assert!(!user.is_superuser);
    }
}

// src/contact/form.rs
// =============================================================================
// The contact form's fields and the payload built from them.
//
// ContactForm is what the user has typed so far. ContactSubmission is the
// snapshot we send: it is built at submit time and dropped afterwards,
// whether or not the request succeeded.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

// Field values exactly as they go over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidForm {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    BadEmail(String),
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    // Every field is required, and the email needs a local part and a domain
    pub fn validate(&self) -> Result<(), InvalidForm> {
        for (label, value) in [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidForm::MissingField(label));
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(InvalidForm::BadEmail(email.to_string())),
        }
    }

    // Snapshots the fields; the message is cut to `limit` characters if set
    pub fn to_submission(&self, limit: Option<usize>) -> ContactSubmission {
        let message = match limit {
            Some(limit) => truncate_chars(&self.message, limit),
            None => self.message.clone(),
        };

        ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}

// Keeps at most `limit` characters without splitting one in half
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Hello there")
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_validate_requires_every_field() {
        let mut form = filled();
        form.message = "   ".to_string();
        assert_eq!(form.validate(), Err(InvalidForm::MissingField("Message")));

        let form = ContactForm::default();
        assert_eq!(form.validate(), Err(InvalidForm::MissingField("Name")));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut form = filled();
        form.email = "ada.example.com".to_string();
        assert!(matches!(form.validate(), Err(InvalidForm::BadEmail(_))));

        form.email = "ada@".to_string();
        assert!(matches!(form.validate(), Err(InvalidForm::BadEmail(_))));
    }

    #[test]
    fn test_submission_without_limit_keeps_message() {
        let submission = filled().to_submission(None);
        assert_eq!(submission.message, "Hello there");
        assert_eq!(submission.email, "ada@example.com");
    }

    #[test]
    fn test_submission_truncates_by_characters() {
        let form = ContactForm::new("Zoë", "zoe@example.com", "héllo wörld");
        assert_eq!(form.to_submission(Some(5)).message, "héllo");
        assert_eq!(form.to_submission(Some(100)).message, "héllo wörld");
        assert_eq!(form.to_submission(Some(0)).message, "");
    }

    #[test]
    fn test_clear_empties_fields() {
        let mut form = filled();
        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}

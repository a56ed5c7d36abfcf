//! Form definitions backing the CRM commands.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub mod client;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid last contact date")]
    InvalidLastContact,
}

impl FormError {
    /// Per-field messages suitable for inline display.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => FieldErrors::from(errors),
            FormError::InvalidName => FieldErrors::single("name", client::NAME_REQUIRED),
            FormError::InvalidEmail => FieldErrors::single("email", client::EMAIL_INVALID),
            FormError::InvalidStatus => FieldErrors::single("status", client::STATUS_INVALID),
            FormError::InvalidLastContact => {
                FieldErrors::single("last_contact", client::LAST_CONTACT_INVALID)
            }
        }
    }
}

/// Validation messages keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(BTreeMap::from([(field.into(), message.into())]))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let messages = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                let first = errors.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                Some((field.to_string(), message))
            })
            .collect();
        Self(messages)
    }
}

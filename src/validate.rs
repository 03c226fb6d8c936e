//! Local validation of contact-form input.
//!
//! Runs before anything touches the network. Values are checked as typed;
//! nothing here normalizes or rewrites the input.

use serde::{Deserialize, Serialize};

/// Raw contact-form field values as the visitor typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormInput {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), message: message.into() }
    }

    /// Check the input without side effects.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyField`] if any field is blank after trimming,
    /// otherwise [`ValidationError::MalformedEmail`] if the email fails
    /// [`is_plausible_email`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(ValidationError::EmptyField);
        }
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::MalformedEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("all fields are required")]
    EmptyField,
    #[error("malformed email address")]
    MalformedEmail,
}

/// Minimal shape check equivalent to `^\S+@\S+\.\S+$`.
///
/// No whitespace anywhere, at least one character before some `@`, and a `.`
/// after that `@` with at least one character on each side of it.
#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    // The earliest usable `@` leaves the most room for the domain part.
    let Some(at) = email
        .char_indices()
        .skip(1)
        .find_map(|(i, c)| (c == '@').then_some(i))
    else {
        return false;
    };
    email
        .char_indices()
        .any(|(i, c)| c == '.' && i > at + 1 && i + 1 < email.len())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

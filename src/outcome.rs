//! Submission outcomes and the status lines shown to the visitor.

use std::time::Duration;

use crate::relay::RelayError;
use crate::validate::ValidationError;

pub const MSG_SUCCESS: &str = "Email sent successfully!";
pub const MSG_EMPTY_FIELD: &str = "Please fill in all fields correctly.";
pub const MSG_MALFORMED_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_TRANSIENT: &str = "Failed to send message. Please try again later.";
pub const MSG_CONFIGURATION: &str = "Configuration error. Try again later.";

pub const VALIDATION_DWELL: Duration = Duration::from_secs(3);
pub const SUCCESS_DWELL: Duration = Duration::from_secs(5);
pub const FAILURE_DWELL: Duration = Duration::from_secs(5);

/// Relay error texts that point at account or key setup rather than delivery.
const CONFIGURATION_MARKERS: [&str; 3] = ["User does not exist", "insufficient scopes", "Authentication error"];

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// Rejected locally; the relay was never called.
    Invalid(ValidationError),
    TransientFailure(String),
    ConfigurationFailure(String),
}

impl SubmissionOutcome {
    #[must_use]
    pub fn transient() -> Self {
        Self::TransientFailure(MSG_TRANSIENT.to_string())
    }

    #[must_use]
    pub fn configuration() -> Self {
        Self::ConfigurationFailure(MSG_CONFIGURATION.to_string())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn status_message(&self) -> StatusMessage {
        match self {
            Self::Success => StatusMessage::success(MSG_SUCCESS),
            Self::Invalid(ValidationError::EmptyField) => StatusMessage::error(MSG_EMPTY_FIELD),
            Self::Invalid(ValidationError::MalformedEmail) => StatusMessage::error(MSG_MALFORMED_EMAIL),
            Self::TransientFailure(text) | Self::ConfigurationFailure(text) => StatusMessage::error(text.clone()),
        }
    }

    /// How long the status line stays visible.
    #[must_use]
    pub fn dwell(&self) -> Duration {
        match self {
            Self::Success => SUCCESS_DWELL,
            Self::Invalid(_) => VALIDATION_DWELL,
            Self::TransientFailure(_) | Self::ConfigurationFailure(_) => FAILURE_DWELL,
        }
    }
}

// =============================================================================
// STATUS MESSAGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
}

/// A user-facing status line. Glyphs and colours are left to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub tone: StatusTone,
    pub text: String,
}

impl StatusMessage {
    fn success(text: impl Into<String>) -> Self {
        Self { tone: StatusTone::Success, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { tone: StatusTone::Error, text: text.into() }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transient,
}

/// Decide whether a relay error is a setup problem or a delivery hiccup.
///
/// Auth statuses win outright; otherwise fall back to the error text.
/// `HttpClientBuild` only reaches here from a custom [`crate::MailRelay`] that
/// builds its client lazily; `EmailJsClient` reports it from `new` instead.
#[must_use]
pub fn classify_relay_error(error: &RelayError) -> FailureKind {
    match error {
        RelayError::Rejected { status: 401 | 403, .. } | RelayError::HttpClientBuild(_) => FailureKind::Configuration,
        RelayError::Rejected { text, .. } if is_configuration_message(text) => FailureKind::Configuration,
        RelayError::Transport(text) if is_configuration_message(text) => FailureKind::Configuration,
        RelayError::Rejected { .. } | RelayError::Transport(_) => FailureKind::Transient,
    }
}

/// Text heuristic: does the relay message name a configuration/auth problem?
#[must_use]
pub fn is_configuration_message(text: &str) -> bool {
    CONFIGURATION_MARKERS.iter().any(|m| text.contains(m))
}

impl From<FailureKind> for SubmissionOutcome {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Configuration => Self::configuration(),
            FailureKind::Transient => Self::transient(),
        }
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;

//! Mail relay — the external service that actually delivers the message.
//!
//! DESIGN
//! ======
//! The pipeline only sees the [`MailRelay`] trait so tests can script relay
//! behaviour. [`emailjs::EmailJsClient`] is the production implementation.

pub mod emailjs;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors raised by a relay call.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("relay request failed: {0}")]
    Transport(String),

    /// The relay answered with a non-success status.
    #[error("relay rejected message: status {status}: {text}")]
    Rejected { status: u16, text: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Template variables handed to the relay's email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
    pub reply_to: String,
    pub user_email: String,
}

/// Status and body text returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub text: String,
}

impl RelayResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// RELAY TRAIT
// =============================================================================

/// Async mail-relay capability. Enables mocking in tests.
#[async_trait::async_trait]
pub trait MailRelay: Send + Sync {
    /// Deliver one templated message. Called at most once per submission.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] if the request fails or the relay refuses it.
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<RelayResponse, RelayError>;
}

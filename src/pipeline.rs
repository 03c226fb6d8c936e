//! Submission pipeline: validate → build payload → dispatch → classify.
//!
//! Stateless. Field resets, the pending gate and status dwell live in
//! [`crate::form::ContactForm`].

use crate::config::{Environment, RelayConfig};
use crate::outcome::{SubmissionOutcome, classify_relay_error};
use crate::relay::{MailRelay, TemplateParams};
use crate::validate::ContactFormInput;

/// Run one submission. Calls the relay at most once and never retries.
pub async fn submit(relay: &dyn MailRelay, config: &RelayConfig, input: &ContactFormInput) -> SubmissionOutcome {
    if let Err(reason) = input.validate() {
        tracing::debug!(%reason, "contact form rejected locally");
        return SubmissionOutcome::Invalid(reason);
    }

    let params = build_params(input, &config.recipient_name);

    tracing::debug!(
        service_id = %config.service_id,
        template_id = %config.template_id,
        "dispatching contact message"
    );
    let result = relay
        .send(&config.service_id, &config.template_id, &params, &config.public_key)
        .await;

    match result {
        Ok(response) if response.is_success() => {
            tracing::info!(status = response.status, "contact message delivered");
            SubmissionOutcome::Success
        }
        Ok(response) => {
            tracing::debug!(status = response.status, "relay returned non-success status");
            SubmissionOutcome::transient()
        }
        Err(e) => {
            let kind = classify_relay_error(&e);
            if config.environment != Environment::Local {
                tracing::warn!(error = %e, ?kind, "mail relay call failed");
            }
            kind.into()
        }
    }
}

/// Map form input to the relay's template variables.
#[must_use]
pub fn build_params(input: &ContactFormInput, recipient_name: &str) -> TemplateParams {
    TemplateParams {
        from_name: input.name.clone(),
        from_email: input.email.clone(),
        message: format_body(input),
        to_name: recipient_name.to_string(),
        reply_to: input.email.clone(),
        user_email: input.email.clone(),
    }
}

#[must_use]
pub fn format_body(input: &ContactFormInput) -> String {
    format!("From: {} ({})\n\n{}", input.name, input.email, input.message)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

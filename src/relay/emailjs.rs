//! EmailJS REST API client.
//!
//! Thin HTTP wrapper for `POST /api/v1.0/email/send`. Request building and
//! response mapping are pure functions for testability.

use super::{MailRelay, RelayError, RelayResponse, TemplateParams};
use crate::config::{RelayConfig, RelayTimeouts};
use std::time::Duration;

const SEND_PATH: &str = "/api/v1.0/email/send";

// =============================================================================
// CLIENT
// =============================================================================

pub struct EmailJsClient {
    http: reqwest::Client,
    send_url: String,
    private_key: Option<String>,
}

impl EmailJsClient {
    /// Build a client against `base_url` (e.g. `https://api.emailjs.com`).
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: &str, private_key: Option<String>, timeouts: RelayTimeouts) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| RelayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, send_url: send_url(base_url), private_key })
    }

    /// Build a client from the relay section of the site config.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        Self::new(&config.base_url, config.private_key.clone(), config.timeouts)
    }

    #[must_use]
    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

#[async_trait::async_trait]
impl MailRelay for EmailJsClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<RelayResponse, RelayError> {
        let body = build_request(service_id, template_id, params, public_key, self.private_key.as_deref());

        let response = self
            .http
            .post(&self.send_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        map_response(status, text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, serde::Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

// =============================================================================
// HELPERS
// =============================================================================

fn send_url(base_url: &str) -> String {
    format!("{}{SEND_PATH}", base_url.trim_end_matches('/'))
}

fn build_request<'a>(
    service_id: &'a str,
    template_id: &'a str,
    params: &'a TemplateParams,
    public_key: &'a str,
    private_key: Option<&'a str>,
) -> SendRequest<'a> {
    SendRequest {
        service_id,
        template_id,
        user_id: public_key,
        template_params: params,
        access_token: private_key.filter(|k| !k.is_empty()),
    }
}

/// EmailJS answers `200 OK` on delivery and a plain-text reason otherwise.
fn map_response(status: u16, text: String) -> Result<RelayResponse, RelayError> {
    let response = RelayResponse { status, text };
    if response.is_success() {
        Ok(response)
    } else {
        Err(RelayError::Rejected { status: response.status, text: response.text })
    }
}

#[cfg(test)]
#[path = "emailjs_test.rs"]
mod tests;

//! Relay configuration parsed from environment variables.
//!
//! Credentials have no built-in fallback: a missing service id, template id or
//! public key is a startup error.

pub const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_RECIPIENT_NAME: &str = "Site Owner";

/// Errors produced while reading relay configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set or is blank.
    #[error("missing config: env var {var} not set")]
    MissingVar { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

/// Where the site is running. Relay error detail is only logged outside `Local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Local,
    #[default]
    Production,
}

/// Optional HTTP timeouts for the relay client. `None` means no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Sent as the EmailJS `accessToken` when present.
    pub private_key: Option<String>,
    pub base_url: String,
    /// Label used as the template's `to_name`.
    pub recipient_name: String,
    pub environment: Environment,
    pub timeouts: RelayTimeouts,
}

impl RelayConfig {
    /// Build a config from explicit credentials, with defaults for everything else.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            private_key: None,
            base_url: DEFAULT_EMAILJS_BASE_URL.to_string(),
            recipient_name: DEFAULT_RECIPIENT_NAME.to_string(),
            environment: Environment::default(),
            timeouts: RelayTimeouts::default(),
        }
    }

    /// Load a `.env` file if one exists, then read the environment.
    ///
    /// # Errors
    ///
    /// Same as [`RelayConfig::from_env`].
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::Parse(format!(".env: {e}")));
            }
        }
        Self::from_env()
    }

    /// Build typed relay config from environment variables.
    ///
    /// Required:
    /// - `EMAILJS_SERVICE_ID`
    /// - `EMAILJS_TEMPLATE_ID`
    /// - `EMAILJS_PUBLIC_KEY`
    ///
    /// Optional:
    /// - `EMAILJS_PRIVATE_KEY`: sent as `accessToken` when non-empty
    /// - `EMAILJS_BASE_URL`: default `https://api.emailjs.com`
    /// - `EMAILJS_REQUEST_TIMEOUT_SECS` / `EMAILJS_CONNECT_TIMEOUT_SECS`: unset means no timeout
    /// - `CONTACT_RECIPIENT_NAME`: default `Site Owner`
    /// - `CONTACT_ENV`: `production` (default) or `local`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_id = required_var("EMAILJS_SERVICE_ID")?;
        let template_id = required_var("EMAILJS_TEMPLATE_ID")?;
        let public_key = required_var("EMAILJS_PUBLIC_KEY")?;
        let private_key = optional_var("EMAILJS_PRIVATE_KEY");

        let base_url = optional_var("EMAILJS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let recipient_name =
            optional_var("CONTACT_RECIPIENT_NAME").unwrap_or_else(|| DEFAULT_RECIPIENT_NAME.to_string());
        let environment = parse_environment(optional_var("CONTACT_ENV").as_deref())?;
        let timeouts = RelayTimeouts {
            request_secs: env_parse_secs("EMAILJS_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_secs("EMAILJS_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self {
            service_id,
            template_id,
            public_key,
            private_key,
            base_url,
            recipient_name,
            environment,
            timeouts,
        })
    }
}

fn required_var(key: &str) -> Result<String, ConfigError> {
    optional_var(key).ok_or_else(|| ConfigError::MissingVar { var: key.into() })
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse_secs(key: &str) -> Result<Option<u64>, ConfigError> {
    optional_var(key)
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| ConfigError::Parse(format!("{key} must be a whole number of seconds, got '{v}'")))
        })
        .transpose()
}

fn parse_environment(raw: Option<&str>) -> Result<Environment, ConfigError> {
    match raw.map(str::to_ascii_lowercase).as_deref().unwrap_or("production") {
        "local" | "development" | "dev" => Ok(Environment::Local),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(ConfigError::Parse(format!("unknown CONTACT_ENV: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

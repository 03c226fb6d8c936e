//! Contact-form submission pipeline for the portfolio site.
//!
//! DESIGN
//! ======
//! The site itself is static presentation. The one piece with control flow is
//! the contact form: validate locally, hand the message to the EmailJS relay,
//! classify what came back, and publish a status line the view can render.
//!
//! - [`pipeline::submit`] is the stateless core.
//! - [`form::ContactForm`] wraps it with field state, the pending gate, and
//!   status dwell times.
//! - [`relay::MailRelay`] is the seam to the external relay; the EmailJS REST
//!   client lives in [`relay::emailjs`].

pub mod config;
pub mod expiring;
pub mod form;
pub mod outcome;
pub mod pipeline;
pub mod relay;
pub mod validate;

pub use config::{ConfigError, Environment, RelayConfig};
pub use form::{ContactForm, FormField, SubmissionState};
pub use outcome::{StatusMessage, StatusTone, SubmissionOutcome};
pub use relay::emailjs::EmailJsClient;
pub use relay::{MailRelay, RelayError, RelayResponse, TemplateParams};
pub use validate::{ContactFormInput, ValidationError};

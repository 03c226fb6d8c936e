//! Contact form state owned by one form instance.
//!
//! DESIGN
//! ======
//! The view mutates fields on every keystroke, calls [`ContactForm::submit`],
//! and polls [`ContactForm::state`] / [`ContactForm::status`] to render. A
//! single `pending` flag gates submissions: a submit while one is in flight is
//! ignored. The lock is never held across the relay call.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::RelayConfig;
use crate::expiring::Expiring;
use crate::outcome::{StatusMessage, SubmissionOutcome};
use crate::pipeline;
use crate::relay::MailRelay;
use crate::validate::ContactFormInput;

/// Addressable form fields, named as the HTML inputs are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

/// Read-only snapshot for the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub pending: bool,
    pub last_outcome: Option<SubmissionOutcome>,
}

pub struct ContactForm {
    relay: Arc<dyn MailRelay>,
    config: RelayConfig,
    inner: Mutex<FormInner>,
}

#[derive(Default)]
struct FormInner {
    input: ContactFormInput,
    pending: bool,
    /// Latest outcome, visible until its dwell time elapses.
    shown: Option<Expiring<SubmissionOutcome>>,
}

fn lock_inner(inner: &Mutex<FormInner>) -> MutexGuard<'_, FormInner> {
    inner
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Clears `pending` if the submit future is dropped before the relay answers.
struct PendingGuard<'a> {
    inner: &'a Mutex<FormInner>,
    armed: bool,
}

impl PendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock_inner(self.inner).pending = false;
        }
    }
}

impl ContactForm {
    #[must_use]
    pub fn new(relay: Arc<dyn MailRelay>, config: RelayConfig) -> Self {
        Self { relay, config, inner: Mutex::new(FormInner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        lock_inner(&self.inner)
    }

    // =========================================================================
    // FIELDS
    // =========================================================================

    #[must_use]
    pub fn input(&self) -> ContactFormInput {
        self.lock().input.clone()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let mut inner = self.lock();
        let slot = match field {
            FormField::Name => &mut inner.input.name,
            FormField::Email => &mut inner.input.email,
            FormField::Message => &mut inner.input.message,
        };
        *slot = value.into();
    }

    /// Change handler keyed by the input's `name` attribute. Unknown names are ignored.
    pub fn set_field_by_name(&self, name: &str, value: impl Into<String>) {
        if let Some(field) = FormField::from_name(name) {
            self.set_field(field, value);
        }
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    /// Submit the current field values.
    ///
    /// Returns `None` without touching the relay if a submission is already
    /// pending. On success the fields are cleared. Dropping the future before
    /// it completes releases the pending flag and records no outcome.
    pub async fn submit(&self) -> Option<SubmissionOutcome> {
        let input = {
            let mut inner = self.lock();
            if inner.pending {
                tracing::debug!("contact form submit ignored; already pending");
                return None;
            }
            inner.pending = true;
            inner.shown = None;
            inner.input.clone()
        };
        let guard = PendingGuard { inner: &self.inner, armed: true };

        let outcome = pipeline::submit(self.relay.as_ref(), &self.config, &input).await;

        guard.disarm();
        let mut inner = self.lock();
        inner.pending = false;
        if outcome.is_success() {
            inner.input = ContactFormInput::default();
        }
        inner.shown = Some(Expiring::new(outcome.clone(), outcome.dwell()));
        Some(outcome)
    }

    // =========================================================================
    // VIEW STATE
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state_at(Instant::now())
    }

    /// Snapshot at `now`. `last_outcome` resets once its dwell time elapses.
    #[must_use]
    pub fn state_at(&self, now: Instant) -> SubmissionState {
        let inner = self.lock();
        SubmissionState {
            pending: inner.pending,
            last_outcome: inner
                .shown
                .as_ref()
                .and_then(|s| s.get_at(now))
                .cloned(),
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    /// The status line to show right now, if its dwell time has not elapsed.
    #[must_use]
    pub fn status(&self) -> Option<StatusMessage> {
        self.status_at(Instant::now())
    }

    #[must_use]
    pub fn status_at(&self, now: Instant) -> Option<StatusMessage> {
        self.lock()
            .shown
            .as_ref()
            .and_then(|s| s.get_at(now))
            .map(SubmissionOutcome::status_message)
    }

    /// Hide the status line and reset the recorded outcome.
    pub fn dismiss_status(&self) {
        self.lock().shown = None;
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

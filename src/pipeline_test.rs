use super::*;
use crate::outcome::{MSG_CONFIGURATION, MSG_TRANSIENT};
use crate::relay::test_helpers::MockRelay;
use crate::relay::{RelayError, RelayResponse};
use crate::validate::ValidationError;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

async fn submit_capturing_warnings(environment: Environment) -> String {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let relay = MockRelay::failing(RelayError::Transport("connection reset by peer".into()));
    let cfg = RelayConfig { environment, ..config() };
    submit(&relay, &cfg, &jane()).await;
    logs.contents()
}

fn config() -> RelayConfig {
    RelayConfig { recipient_name: "Jane Owner".into(), ..RelayConfig::new("service_1", "template_1", "pk_1") }
}

fn jane() -> ContactFormInput {
    ContactFormInput::new("Jane", "jane@x.com", "Hi")
}

// =========================================================================
// validation short-circuit
// =========================================================================

#[tokio::test]
async fn empty_field_skips_relay() {
    let relay = MockRelay::default();
    let input = ContactFormInput::new("", "a@b.com", "Hi");

    let outcome = submit(&relay, &config(), &input).await;

    assert_eq!(outcome, SubmissionOutcome::Invalid(ValidationError::EmptyField));
    assert_eq!(relay.call_count(), 0);
}

#[tokio::test]
async fn whitespace_only_fields_skip_relay() {
    let relay = MockRelay::default();
    for input in [
        ContactFormInput::new("  ", "a@b.com", "Hi"),
        ContactFormInput::new("Jane", "\t", "Hi"),
        ContactFormInput::new("Jane", "a@b.com", "\n"),
    ] {
        let outcome = submit(&relay, &config(), &input).await;
        assert_eq!(outcome, SubmissionOutcome::Invalid(ValidationError::EmptyField));
    }
    assert_eq!(relay.call_count(), 0);
}

#[tokio::test]
async fn malformed_email_skips_relay() {
    let relay = MockRelay::default();
    for email in ["jane.x.com", "jane@xcom", "jane@"] {
        let input = ContactFormInput::new("Jane", email, "Hi");
        let outcome = submit(&relay, &config(), &input).await;
        assert_eq!(outcome, SubmissionOutcome::Invalid(ValidationError::MalformedEmail), "{email}");
    }
    assert_eq!(relay.call_count(), 0);
}

// =========================================================================
// dispatch
// =========================================================================

#[tokio::test]
async fn valid_input_calls_relay_once_with_formatted_body() {
    let relay = MockRelay::ok(200);

    let outcome = submit(&relay, &config(), &jane()).await;

    assert_eq!(outcome, SubmissionOutcome::Success);
    let calls = relay.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.service_id, "service_1");
    assert_eq!(call.template_id, "template_1");
    assert_eq!(call.public_key, "pk_1");
    assert_eq!(call.params.message, "From: Jane (jane@x.com)\n\nHi");
    assert_eq!(call.params.from_name, "Jane");
    assert_eq!(call.params.from_email, "jane@x.com");
    assert_eq!(call.params.reply_to, "jane@x.com");
    assert_eq!(call.params.user_email, "jane@x.com");
    assert_eq!(call.params.to_name, "Jane Owner");
}

#[tokio::test]
async fn payload_keeps_fields_untrimmed() {
    let relay = MockRelay::ok(200);
    let input = ContactFormInput::new(" Jane ", "jane@x.com", "  line one\nline two  ");

    submit(&relay, &config(), &input).await;

    let calls = relay.calls();
    assert_eq!(calls[0].params.from_name, " Jane ");
    assert_eq!(calls[0].params.message, "From:  Jane  (jane@x.com)\n\n  line one\nline two  ");
}

// =========================================================================
// classification
// =========================================================================

#[tokio::test]
async fn non_success_status_is_transient() {
    let relay = MockRelay::ok(400);
    let outcome = submit(&relay, &config(), &jane()).await;
    assert_eq!(outcome, SubmissionOutcome::TransientFailure(MSG_TRANSIENT.into()));
    assert_eq!(relay.call_count(), 1);
}

#[tokio::test]
async fn insufficient_scopes_is_configuration() {
    let relay = MockRelay::failing(RelayError::Transport("Request had insufficient scopes".into()));
    let outcome = submit(&relay, &config(), &jane()).await;
    assert_eq!(outcome, SubmissionOutcome::ConfigurationFailure(MSG_CONFIGURATION.into()));
}

#[tokio::test]
async fn rejected_unauthorized_is_configuration() {
    let relay = MockRelay::failing(RelayError::Rejected { status: 401, text: "bad key".into() });
    let outcome = submit(&relay, &config(), &jane()).await;
    assert!(matches!(outcome, SubmissionOutcome::ConfigurationFailure(_)));
}

#[tokio::test]
async fn other_errors_are_transient() {
    let relay = MockRelay::failing(RelayError::Transport("connection reset by peer".into()));
    let outcome = submit(&relay, &config(), &jane()).await;
    assert_eq!(outcome, SubmissionOutcome::TransientFailure(MSG_TRANSIENT.into()));
}

#[tokio::test]
async fn local_environment_still_classifies() {
    let relay = MockRelay::failing(RelayError::Transport("User does not exist".into()));
    let cfg = RelayConfig { environment: Environment::Local, ..config() };
    let outcome = submit(&relay, &cfg, &jane()).await;
    assert!(matches!(outcome, SubmissionOutcome::ConfigurationFailure(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn relay_error_logged_outside_local() {
    let logs = submit_capturing_warnings(Environment::Production).await;
    assert!(logs.contains("mail relay call failed"), "{logs}");
    assert!(logs.contains("connection reset by peer"), "{logs}");
}

#[tokio::test(flavor = "current_thread")]
async fn relay_error_not_logged_locally() {
    let logs = submit_capturing_warnings(Environment::Local).await;
    assert!(logs.is_empty(), "{logs}");
}

#[tokio::test]
async fn relay_is_not_retried() {
    let relay = MockRelay::new(vec![
        Err(RelayError::Transport("timeout".into())),
        Ok(RelayResponse { status: 200, text: "OK".into() }),
    ]);
    let outcome = submit(&relay, &config(), &jane()).await;
    assert!(matches!(outcome, SubmissionOutcome::TransientFailure(_)));
    assert_eq!(relay.call_count(), 1);
}

#[test]
fn format_body_layout() {
    assert_eq!(format_body(&jane()), "From: Jane (jane@x.com)\n\nHi");
}

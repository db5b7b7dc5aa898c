//! Chat-webhook channel setup: test the webhook, then persist the channel.
//!
//! ```text
//! Idle → Testing → TestFailed
//!                → TestPassed → Persisting → PersistFailed
//!                                          → PersistSucceeded
//! ```
//!
//! A channel is only persisted after the service has delivered a test
//! message to it. The two calls are not transactional. A failure after the
//! test leaves nothing persisted and the user can submit again.

use crate::client::SubmissionClient;
use crate::domain::{validate_webhook_url, NotificationChannelConfig, SubmissionStatus};
use crate::workflow::InFlight;

pub const SETUP_FAILED_MESSAGE: &str =
    "Failed to set up Slack integration. Please check your webhook URL and try again.";
pub const SETUP_SUCCEEDED_MESSAGE: &str =
    "🎉 Slack integration added successfully! You'll receive a test message shortly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupState {
    Idle,
    Testing,
    TestFailed(String),
    TestPassed,
    Persisting,
    PersistFailed(String),
    PersistSucceeded,
}

impl SetupState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SetupState::TestFailed(_) | SetupState::PersistFailed(_) | SetupState::PersistSucceeded
        )
    }
}

type CompletionCallback = Box<dyn FnMut(&NotificationChannelConfig) + Send>;

pub struct NotificationChannelSetup {
    email: String,
    channel_name: String,
    webhook_url: String,
    state: SetupState,
    status: SubmissionStatus,
    history: Vec<SetupState>,
    in_flight: InFlight,
    on_complete: Option<CompletionCallback>,
}

impl NotificationChannelSetup {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            channel_name: String::new(),
            webhook_url: String::new(),
            state: SetupState::Idle,
            status: SubmissionStatus::Idle,
            history: vec![SetupState::Idle],
            in_flight: InFlight::default(),
            on_complete: None,
        }
    }

    /// Called once per successful setup with the persisted config.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&NotificationChannelConfig) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn state(&self) -> &SetupState {
        &self.state
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Every state entered so far, oldest first.
    pub fn history(&self) -> &[SetupState] {
        &self.history
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_set() && !self.webhook_url.is_empty()
    }

    pub fn set_channel_name(&mut self, value: impl Into<String>) {
        self.channel_name = value.into();
        self.on_edit();
    }

    pub fn set_webhook_url(&mut self, value: impl Into<String>) {
        self.webhook_url = value.into();
        self.on_edit();
    }

    /// Run one setup attempt with the currently entered fields.
    pub async fn submit(&mut self, client: &SubmissionClient) -> &SetupState {
        if self.in_flight.is_set() {
            tracing::warn!("Channel setup already in progress for {}", self.email);
            return &self.state;
        }
        if self.state != SetupState::Idle {
            self.transition(SetupState::Idle);
        }

        if let Err(e) = validate_webhook_url(&self.webhook_url) {
            let message = e.to_string();
            self.status = SubmissionStatus::error(message.clone());
            self.transition(SetupState::TestFailed(message));
            return &self.state;
        }

        let config =
            NotificationChannelConfig::slack(self.email.clone(), self.webhook_url.clone(), &self.channel_name);

        let guard = self.in_flight.begin();
        self.status.reset();

        self.transition(SetupState::Testing);
        if let Err(e) = client.test_slack_webhook(&config.test_request()).await {
            tracing::warn!("Webhook test failed for {}: {}", self.email, e);
            self.fail(SetupState::TestFailed(SETUP_FAILED_MESSAGE.to_string()));
            return &self.state;
        }
        self.transition(SetupState::TestPassed);

        self.transition(SetupState::Persisting);
        if let Err(e) = client.setup_notification_channel(&config).await {
            tracing::warn!("Saving channel failed for {}: {}", self.email, e);
            self.fail(SetupState::PersistFailed(SETUP_FAILED_MESSAGE.to_string()));
            return &self.state;
        }

        drop(guard);
        self.status = SubmissionStatus::success(SETUP_SUCCEEDED_MESSAGE);
        self.channel_name.clear();
        self.webhook_url.clear();
        self.transition(SetupState::PersistSucceeded);

        if let Some(callback) = self.on_complete.as_mut() {
            callback(&config);
        }

        &self.state
    }

    fn fail(&mut self, state: SetupState) {
        self.status = SubmissionStatus::error(SETUP_FAILED_MESSAGE);
        self.transition(state);
    }

    fn on_edit(&mut self) {
        if !self.status.is_idle() {
            self.status.reset();
        }
        if self.state.is_terminal() {
            self.transition(SetupState::Idle);
        }
    }

    fn transition(&mut self, next: SetupState) {
        tracing::info!("Channel setup for {}: {:?} -> {:?}", self.email, self.state, next);
        self.state = next.clone();
        self.history.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::endpoints;
    use crate::client::testing::{RecordingTransport, Reply};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/xxxx";

    fn setup() -> NotificationChannelSetup {
        NotificationChannelSetup::new("reader@example.com")
    }

    #[tokio::test]
    async fn test_non_slack_url_rejected_without_network() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();
        s.set_webhook_url("https://example.com/hook");

        let state = s.submit(&client).await.clone();

        assert_eq!(
            state,
            SetupState::TestFailed("Please provide a valid Slack webhook URL".into())
        );
        assert!(transport.calls().is_empty());
        assert!(s.status().is_error());
    }

    #[tokio::test]
    async fn test_empty_url_rejected_without_network() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();

        assert!(!s.can_submit());
        s.submit(&client).await;

        assert_eq!(
            s.state(),
            &SetupState::TestFailed("Please provide a Slack webhook URL".into())
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_channel_name_defaults_in_test_payload() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();
        s.set_webhook_url(WEBHOOK);

        s.submit(&client).await;

        let tests = transport.calls_to(endpoints::SLACK_TEST);
        assert_eq!(tests.len(), 1);
        let body = tests[0].json().unwrap();
        assert_eq!(body["channel_name"], "#ai-news");
        assert_eq!(body["webhook_url"], WEBHOOK);
    }

    #[tokio::test]
    async fn test_happy_path_persists_and_clears_fields() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let completed = Arc::new(Mutex::new(Vec::new()));
        let sink = completed.clone();

        let mut s = setup().on_complete(move |config| {
            sink.lock().unwrap().push(config.channel_name.clone());
        });
        s.set_channel_name("#ml-news");
        s.set_webhook_url(WEBHOOK);

        s.submit(&client).await;

        assert_eq!(s.state(), &SetupState::PersistSucceeded);
        assert_eq!(
            s.history(),
            &[
                SetupState::Idle,
                SetupState::Testing,
                SetupState::TestPassed,
                SetupState::Persisting,
                SetupState::PersistSucceeded,
            ]
        );
        assert_eq!(s.status(), &SubmissionStatus::success(SETUP_SUCCEEDED_MESSAGE));
        assert!(s.webhook_url().is_empty());
        assert!(s.channel_name().is_empty());
        assert!(!s.is_in_flight());
        assert_eq!(*completed.lock().unwrap(), vec!["#ml-news".to_string()]);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, endpoints::SLACK_TEST);
        assert_eq!(calls[1].path, endpoints::NOTIFICATION_SETUP);
        assert_eq!(
            calls[1].json(),
            Some(&serde_json::json!({
                "email": "reader@example.com",
                "channel_type": "slack",
                "webhook_url": WEBHOOK,
                "channel_name": "#ml-news",
                "enabled": true
            }))
        );
    }

    #[tokio::test]
    async fn test_failed_test_never_persists() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::SLACK_TEST, Reply::Fail);
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();
        s.set_webhook_url(WEBHOOK);

        s.submit(&client).await;

        assert_eq!(
            s.state(),
            &SetupState::TestFailed(SETUP_FAILED_MESSAGE.into())
        );
        assert!(transport.calls_to(endpoints::NOTIFICATION_SETUP).is_empty());
        assert_eq!(s.webhook_url(), WEBHOOK);
        assert!(s.can_submit());
    }

    #[tokio::test]
    async fn test_persist_failure_then_retry() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::NOTIFICATION_SETUP, Reply::Fail);
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();
        s.set_webhook_url(WEBHOOK);

        s.submit(&client).await;
        assert_eq!(
            s.state(),
            &SetupState::PersistFailed(SETUP_FAILED_MESSAGE.into())
        );
        assert!(s.status().is_error());

        // Second attempt goes through both steps again.
        s.submit(&client).await;
        assert_eq!(s.state(), &SetupState::PersistSucceeded);
        assert_eq!(transport.calls_to(endpoints::SLACK_TEST).len(), 2);
        assert_eq!(transport.calls_to(endpoints::NOTIFICATION_SETUP).len(), 2);
    }

    #[tokio::test]
    async fn test_editing_resets_failed_attempt() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport);
        let mut s = setup();
        s.set_webhook_url("https://example.com/hook");
        s.submit(&client).await;
        assert!(s.state().is_terminal());

        s.set_webhook_url(WEBHOOK);
        assert_eq!(s.state(), &SetupState::Idle);
        assert!(s.status().is_idle());
    }

    #[tokio::test]
    async fn test_cancelled_attempt_can_be_retried() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::SLACK_TEST, Reply::Hang);
        let client = SubmissionClient::new(transport.clone());
        let mut s = setup();
        s.set_webhook_url(WEBHOOK);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), s.submit(&client)).await;
        assert!(timed_out.is_err());
        assert_eq!(s.state(), &SetupState::Testing);
        assert!(!s.is_in_flight());
        assert!(s.can_submit());

        s.submit(&client).await;
        assert_eq!(s.state(), &SetupState::PersistSucceeded);
        assert_eq!(transport.calls_to(endpoints::SLACK_TEST).len(), 2);
    }
}

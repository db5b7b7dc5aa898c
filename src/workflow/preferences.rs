use crate::app::ValidationError;
use crate::client::SubmissionClient;
use crate::config::DeliveryDefaults;
use crate::domain::{is_valid_email, PreferenceSelection, SubmissionStatus};
use crate::workflow::channel_setup::NotificationChannelSetup;
use crate::workflow::InFlight;

pub const PREFERENCES_SAVED_MESSAGE: &str = "Preferences updated successfully! 🎉";
pub const PREFERENCES_FAILED_MESSAGE: &str = "An error occurred while updating preferences.";

/// The preferences page: find the account, edit the form, save, and then
/// optionally add a notification channel.
pub struct PreferencesPage {
    defaults: DeliveryDefaults,
    email_input: String,
    form: Option<PreferenceSelection>,
    status: SubmissionStatus,
    in_flight: InFlight,
    /// Created by the first successful save and kept for the rest of the
    /// page's life, even if the form is edited afterwards.
    channel_setup: Option<NotificationChannelSetup>,
}

impl PreferencesPage {
    pub fn new(defaults: DeliveryDefaults) -> Self {
        Self {
            defaults,
            email_input: String::new(),
            form: None,
            status: SubmissionStatus::Idle,
            in_flight: InFlight::default(),
            channel_setup: None,
        }
    }

    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email_input = email.into();
        self.status.reset();
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn form(&self) -> Option<&PreferenceSelection> {
        self.form.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Whether the save control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_set()
            && self
                .form
                .as_ref()
                .is_some_and(|f| f.validate_for_submit().is_ok())
    }

    /// Leave the email step and open the form.
    ///
    /// With a client, the saved account is looked up and used to prefill
    /// the form. A failed lookup falls back to the configured defaults.
    pub async fn continue_with_email(
        &mut self,
        client: Option<&SubmissionClient>,
    ) -> Result<(), ValidationError> {
        let email = self.email_input.trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !is_valid_email(&email) {
            let err = ValidationError::InvalidEmail;
            self.status = SubmissionStatus::error(err.to_string());
            return Err(err);
        }

        let profile = match client {
            Some(client) => match client.lookup_user(&email).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Could not load saved preferences for {}: {}", email, e);
                    None
                }
            },
            None => None,
        };

        let form = match profile {
            Some(mut profile) => {
                tracing::debug!("Prefilling preferences for {}", email);
                // The account typed here wins over whatever the record says.
                profile.email = email.clone();
                PreferenceSelection::from_profile(&profile, &self.defaults)
            }
            None => PreferenceSelection::with_defaults(email.clone(), &self.defaults),
        };

        if self
            .channel_setup
            .as_ref()
            .is_some_and(|setup| setup.email() != email)
        {
            self.channel_setup = None;
        }

        self.email_input = email;
        self.form = Some(form);
        self.status.reset();
        Ok(())
    }

    /// Apply a user edit to the form. Any edit clears the status line.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut PreferenceSelection) -> R) -> Option<R> {
        let form = self.form.as_mut()?;
        let result = f(form);
        self.status.reset();
        Some(result)
    }

    pub async fn submit(&mut self, client: &SubmissionClient) -> &SubmissionStatus {
        if self.in_flight.is_set() {
            tracing::warn!("Preferences submission already in progress");
            return &self.status;
        }

        let Some(form) = self.form.as_ref() else {
            tracing::warn!("Preferences submitted before an account was chosen");
            return &self.status;
        };

        if let Err(e) = form.validate_for_submit() {
            self.status = SubmissionStatus::error(e.to_string());
            return &self.status;
        }

        let request = form.to_update_request();
        let email = request.email.clone();

        let result = {
            let _guard = self.in_flight.begin();
            client.update_preferences(&request).await
        };

        match result {
            Ok(_) => {
                tracing::info!("Saved preferences for {}", email);
                self.status = SubmissionStatus::success(PREFERENCES_SAVED_MESSAGE);
                if self.channel_setup.is_none() {
                    let setup = NotificationChannelSetup::new(email).on_complete(|config| {
                        tracing::info!(
                            "Slack integration completed for {} ({})",
                            config.email,
                            config.channel_name
                        );
                    });
                    self.channel_setup = Some(setup);
                }
            }
            Err(e) => {
                tracing::warn!("Saving preferences for {} failed: {}", email, e);
                self.status = SubmissionStatus::error(PREFERENCES_FAILED_MESSAGE);
            }
        }

        &self.status
    }

    /// Locked until the first successful save for this account, then
    /// unlocked for good.
    pub fn is_channel_setup_unlocked(&self) -> bool {
        self.channel_setup.is_some()
    }

    pub fn channel_setup(&mut self) -> Option<&mut NotificationChannelSetup> {
        self.channel_setup.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::endpoints;
    use crate::client::testing::{RecordingTransport, Reply};
    use serde_json::json;
    use std::time::Duration;

    async fn open_page(client: Option<&SubmissionClient>) -> PreferencesPage {
        let mut page = PreferencesPage::new(DeliveryDefaults::default());
        page.set_email("reader@example.com");
        page.continue_with_email(client).await.unwrap();
        page
    }

    fn select_one_and_three(page: &mut PreferencesPage) {
        page.edit(|f| {
            f.set_topic_selected(1, true);
            f.set_topic_selected(3, true);
            f.set_max_articles(5).unwrap();
        });
    }

    #[tokio::test]
    async fn test_invalid_email_stays_on_email_step() {
        let mut page = PreferencesPage::new(DeliveryDefaults::default());
        page.set_email("not-an-email");

        let err = page.continue_with_email(None).await.unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(
            page.status(),
            &SubmissionStatus::error("Please enter a valid email address.")
        );
        assert!(page.form().is_none());

        page.set_email("");
        assert_eq!(
            page.continue_with_email(None).await,
            Err(ValidationError::EmptyEmail)
        );
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected_without_network() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let mut page = open_page(None).await;

        assert!(!page.can_submit());
        let status = page.submit(&client).await.clone();

        assert_eq!(status, SubmissionStatus::error("Please select at least one topic."));
        assert!(transport.calls().is_empty());
        assert!(!page.is_channel_setup_unlocked());
    }

    #[tokio::test]
    async fn test_successful_save_unlocks_channel_setup() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport.clone());
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);

        assert!(page.can_submit());
        page.submit(&client).await;

        assert_eq!(page.status(), &SubmissionStatus::success(PREFERENCES_SAVED_MESSAGE));
        assert!(page.is_channel_setup_unlocked());
        assert_eq!(
            page.channel_setup().unwrap().email(),
            "reader@example.com"
        );

        let calls = transport.calls_to(endpoints::UPDATE_PREFERENCES);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].form_values("email"), vec!["reader@example.com"]);
        assert_eq!(calls[0].form_values("topics"), vec!["1", "3"]);
        assert_eq!(calls[0].form_values("priority_1"), vec!["1"]);
        assert_eq!(calls[0].form_values("priority_3"), vec!["1"]);
        assert_eq!(calls[0].form_values("max_articles"), vec!["5"]);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_channel_setup_locked() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::UPDATE_PREFERENCES, Reply::Fail);
        let client = SubmissionClient::new(transport);
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);

        page.submit(&client).await;

        assert_eq!(page.status(), &SubmissionStatus::error(PREFERENCES_FAILED_MESSAGE));
        assert!(!page.is_channel_setup_unlocked());
        assert!(page.channel_setup().is_none());
        assert!(!page.is_in_flight());
    }

    #[tokio::test]
    async fn test_edit_resets_status_but_keeps_channel_setup() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::UPDATE_PREFERENCES, Reply::Json(json!({"success": true})));
        transport.reply(endpoints::UPDATE_PREFERENCES, Reply::Fail);
        let client = SubmissionClient::new(transport);
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);
        page.submit(&client).await;
        assert!(page.status().is_success());

        page.edit(|f| f.set_topic_selected(2, true));
        assert!(page.status().is_idle());
        assert!(page.is_channel_setup_unlocked());

        page.submit(&client).await;
        assert!(page.status().is_error());
        assert!(page.channel_setup().is_some());
    }

    #[tokio::test]
    async fn test_html_reply_keeps_channel_setup_locked() {
        let transport = RecordingTransport::new();
        transport.reply(
            endpoints::UPDATE_PREFERENCES,
            Reply::Json(serde_json::Value::String("<html>User not found.</html>".into())),
        );
        let client = SubmissionClient::new(transport);
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);

        page.submit(&client).await;

        assert_eq!(page.status(), &SubmissionStatus::error(PREFERENCES_FAILED_MESSAGE));
        assert!(!page.is_channel_setup_unlocked());
    }

    #[tokio::test]
    async fn test_switching_account_relocks_channel_setup() {
        let transport = RecordingTransport::new();
        let client = SubmissionClient::new(transport);
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);
        page.submit(&client).await;
        assert!(page.is_channel_setup_unlocked());

        page.set_email("other@example.com");
        page.continue_with_email(None).await.unwrap();
        assert!(!page.is_channel_setup_unlocked());
    }

    #[tokio::test]
    async fn test_cancelled_save_clears_in_flight() {
        let transport = RecordingTransport::new();
        transport.reply(endpoints::UPDATE_PREFERENCES, Reply::Hang);
        let client = SubmissionClient::new(transport);
        let mut page = open_page(None).await;
        select_one_and_three(&mut page);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), page.submit(&client)).await;

        assert!(timed_out.is_err());
        assert!(!page.is_in_flight());
        assert!(page.can_submit());
    }

    #[tokio::test]
    async fn test_prefill_from_saved_account() {
        let transport = RecordingTransport::new();
        transport.reply(
            "/api/user/reader%40example.com",
            Reply::Json(json!({
                "success": true,
                "user": {
                    "email": "reader@example.com",
                    "timezone": "Asia/Tokyo",
                    "frequency": "monthly",
                    "max_articles": 15,
                    "preferences": [{"topic_id": 7, "priority": 3, "is_active": true}]
                }
            })),
        );
        let client = SubmissionClient::new(transport);

        let page = open_page(Some(&client)).await;
        let form = page.form().unwrap();
        assert_eq!(form.selected_topic_ids(), vec![7]);
        assert_eq!(form.timezone(), "Asia/Tokyo");
        assert_eq!(form.max_articles(), 15);
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_back_to_defaults() {
        let transport = RecordingTransport::new();
        transport.reply("/api/user/reader%40example.com", Reply::Fail);
        let client = SubmissionClient::new(transport);

        let page = open_page(Some(&client)).await;
        let form = page.form().unwrap();
        assert!(form.selected_topic_ids().is_empty());
        assert_eq!(form.email(), "reader@example.com");
    }
}

use crate::app::ValidationError;
use crate::client::SubmissionClient;
use crate::domain::{is_valid_email, SubmissionStatus};
use crate::workflow::InFlight;

pub const SUBSCRIBED_MESSAGE: &str = "Successfully subscribed! Redirecting to preferences...";
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "An error occurred. Please try again later.";

pub struct SubscribePage {
    email: String,
    status: SubmissionStatus,
    in_flight: InFlight,
    redirect: Option<String>,
}

impl SubscribePage {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            status: SubmissionStatus::Idle,
            in_flight: InFlight::default(),
            redirect: None,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.status.reset();
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Where to go next after a successful subscription.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub async fn submit(&mut self, client: &SubmissionClient) -> &SubmissionStatus {
        if self.in_flight.is_set() {
            return &self.status;
        }

        let email = self.email.trim().to_string();
        if let Err(e) = validate(&email) {
            self.status = SubmissionStatus::error(e.to_string());
            return &self.status;
        }

        let result = {
            let _guard = self.in_flight.begin();
            client.subscribe(&email).await
        };

        match result {
            Ok(ack) => {
                tracing::info!("Subscribed {}", email);
                self.redirect = Some(
                    ack.redirect_url
                        .unwrap_or_else(|| format!("/preferences/{}", email)),
                );
                self.status = SubmissionStatus::success(
                    ack.message.unwrap_or_else(|| SUBSCRIBED_MESSAGE.to_string()),
                );
            }
            Err(e) => {
                tracing::warn!("Subscription for {} failed: {}", email, e);
                self.status = SubmissionStatus::error(SUBSCRIBE_FAILED_MESSAGE);
            }
        }

        &self.status
    }
}

impl Default for SubscribePage {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

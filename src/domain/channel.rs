use serde::Serialize;

use crate::app::ValidationError;

pub const SLACK_WEBHOOK_HOST: &str = "hooks.slack.com";
pub const DEFAULT_CHANNEL_NAME: &str = "#ai-news";
pub const SLACK_WEBHOOK_GUIDE_URL: &str = "https://slack.com/apps/A0F7XDUAZ-incoming-webhooks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Slack,
}

/// Body of `POST /api/slack/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookTestRequest {
    pub webhook_url: String,
    pub channel_name: String,
}

/// Body of `POST /api/notifications/setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationChannelConfig {
    pub email: String,
    pub channel_type: ChannelType,
    pub webhook_url: String,
    pub channel_name: String,
    pub enabled: bool,
}

impl NotificationChannelConfig {
    pub fn slack(email: impl Into<String>, webhook_url: impl Into<String>, channel_name: &str) -> Self {
        Self {
            email: email.into(),
            channel_type: ChannelType::Slack,
            webhook_url: webhook_url.into(),
            channel_name: channel_name_or_default(channel_name),
            enabled: true,
        }
    }

    pub fn test_request(&self) -> WebhookTestRequest {
        WebhookTestRequest {
            webhook_url: self.webhook_url.clone(),
            channel_name: self.channel_name.clone(),
        }
    }
}

pub fn channel_name_or_default(channel_name: &str) -> String {
    if channel_name.is_empty() {
        DEFAULT_CHANNEL_NAME.to_string()
    } else {
        channel_name.to_string()
    }
}

/// Substring check only, matching what the service itself accepts.
pub fn validate_webhook_url(webhook_url: &str) -> Result<(), ValidationError> {
    if webhook_url.is_empty() {
        return Err(ValidationError::EmptyWebhookUrl);
    }
    if !webhook_url.contains(SLACK_WEBHOOK_HOST) {
        return Err(ValidationError::InvalidWebhookUrl);
    }
    Ok(())
}

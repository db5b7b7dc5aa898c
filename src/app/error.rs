use thiserror::Error;

use crate::config::ConfigError;

/// Client-side validation failures. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an email address.")]
    EmptyEmail,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please select at least one topic.")]
    EmptyTopicSelection,

    #[error("Unknown topic: {0}")]
    UnknownTopic(u32),

    #[error("Topic {0} is not selected")]
    TopicNotSelected(u32),

    #[error("Priority must be 1, 2 or 3 (got {0})")]
    PriorityOutOfRange(u8),

    #[error("Preferred time must be HH:MM (got {0})")]
    InvalidTime(String),

    #[error("Unsupported timezone: {0}")]
    UnsupportedTimezone(String),

    #[error("Unsupported frequency: {0}")]
    UnsupportedFrequency(String),

    #[error("Max articles must be 3, 5, 10 or 15 (got {0})")]
    UnsupportedMaxArticles(u32),

    #[error("Please provide a Slack webhook URL")]
    EmptyWebhookUrl,

    #[error("Please provide a valid Slack webhook URL")]
    InvalidWebhookUrl,
}

#[derive(Error, Debug)]
pub enum NewsDailyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any non-2xx response or network failure. Status codes are not
    /// distinguished.
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl NewsDailyError {
    pub fn transport(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, NewsDailyError>;

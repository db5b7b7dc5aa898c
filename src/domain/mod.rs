pub mod channel;
pub mod email;
pub mod preferences;
pub mod profile;
pub mod stats;
pub mod status;
pub mod topic;

pub use channel::{
    channel_name_or_default, validate_webhook_url, ChannelType, NotificationChannelConfig,
    WebhookTestRequest, DEFAULT_CHANNEL_NAME,
};
pub use email::is_valid_email;
pub use preferences::{Frequency, PreferenceSelection, Priority, UpdatePreferencesRequest};
pub use profile::{TopicPreference, UserProfile};
pub use stats::{Article, HomeStats, StatsResponse};
pub use status::SubmissionStatus;
pub use topic::{Topic, TopicCatalog};

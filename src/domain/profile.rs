use serde::{Deserialize, Serialize};

/// A saved account as returned by `GET /api/user/<email>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub preferred_time: Option<String>,
    pub timezone: Option<String>,
    pub frequency: Option<String>,
    pub max_articles: Option<u32>,
    pub preferences: Vec<TopicPreference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPreference {
    pub topic_id: u32,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

use chrono::NaiveDateTime;
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub stats: Option<HomeStats>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeStats {
    pub total_subscribers: u64,
    pub total_topics: u64,
    pub daily_articles: u64,
    pub avg_articles_per_user: Option<u64>,
    pub recent_articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "General".to_string()
}

impl Article {
    pub fn display_title(&self) -> String {
        decode_html_entities(&self.title).to_string()
    }

    pub fn display_description(&self) -> String {
        self.description
            .as_deref()
            .map(|d| decode_html_entities(d).to_string())
            .unwrap_or_default()
    }

    pub fn display_source(&self) -> &str {
        self.source.as_deref().unwrap_or("Unknown")
    }

    /// The backend sends naive ISO-8601 timestamps, with or without
    /// fractional seconds.
    pub fn published(&self) -> Option<NaiveDateTime> {
        let raw = self.published_at.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

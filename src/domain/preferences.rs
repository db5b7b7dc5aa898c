use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::app::ValidationError;
use crate::config::DeliveryDefaults;
use crate::domain::{TopicCatalog, UserProfile};

pub const MAX_ARTICLE_CHOICES: [u32; 4] = [3, 5, 10, 15];

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(ValidationError::UnsupportedFrequency(s.to_string())),
        }
    }
}

/// Per-topic ranking. Serialized as its numeric level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    #[default]
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(ValidationError::PriorityOutOfRange(other)),
        }
    }
}

/// Body of `POST /update-preferences`, sent form-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePreferencesRequest {
    pub email: String,
    pub preferred_time: String,
    pub timezone: String,
    pub frequency: Frequency,
    pub max_articles: u32,
    pub topics: Vec<u32>,
    pub priorities: BTreeMap<u32, u8>,
}

impl UpdatePreferencesRequest {
    /// Form fields in the order the service reads them: one `topics` entry
    /// per selected id and a `priority_<id>` field for each.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("email".to_string(), self.email.clone()),
            ("preferred_time".to_string(), self.preferred_time.clone()),
            ("timezone".to_string(), self.timezone.clone()),
            ("frequency".to_string(), self.frequency.to_string()),
            ("max_articles".to_string(), self.max_articles.to_string()),
        ];
        for id in &self.topics {
            fields.push(("topics".to_string(), id.to_string()));
        }
        for (id, level) in &self.priorities {
            fields.push((format!("priority_{id}"), level.to_string()));
        }
        fields
    }
}

/// Mutable preferences state owned by one preferences page.
///
/// Selected topics and their priorities live in one map, so a topic is
/// selected exactly when it has a priority.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSelection {
    email: String,
    topics: BTreeMap<u32, Priority>,
    preferred_time: NaiveTime,
    timezone: String,
    frequency: Frequency,
    max_articles: u32,
}

impl PreferenceSelection {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            topics: BTreeMap::new(),
            preferred_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            timezone: "Asia/Kolkata".to_string(),
            frequency: Frequency::Daily,
            max_articles: 5,
        }
    }

    /// Start from configured defaults. Invalid configured values are logged
    /// and the built-in default is kept.
    pub fn with_defaults(email: impl Into<String>, defaults: &DeliveryDefaults) -> Self {
        let mut selection = Self::new(email);
        if let Err(e) = selection.set_preferred_time(&defaults.preferred_time) {
            tracing::warn!("Ignoring configured preferred_time: {}", e);
        }
        if let Err(e) = selection.set_timezone(&defaults.timezone) {
            tracing::warn!("Ignoring configured timezone: {}", e);
        }
        selection.set_frequency(defaults.frequency);
        if let Err(e) = selection.set_max_articles(defaults.max_articles) {
            tracing::warn!("Ignoring configured max_articles: {}", e);
        }
        selection
    }

    /// Prefill from a saved profile. Unknown topics are dropped and
    /// out-of-range priorities fall back to High.
    pub fn from_profile(profile: &UserProfile, defaults: &DeliveryDefaults) -> Self {
        let mut selection = Self::with_defaults(profile.email.clone(), defaults);

        if let Some(time) = profile.preferred_time.as_deref() {
            if let Err(e) = selection.set_preferred_time(time) {
                tracing::warn!("Ignoring saved preferred_time: {}", e);
            }
        }
        if let Some(tz) = profile.timezone.as_deref() {
            if let Err(e) = selection.set_timezone(tz) {
                tracing::warn!("Ignoring saved timezone: {}", e);
            }
        }
        if let Some(frequency) = profile.frequency.as_deref() {
            match frequency.parse::<Frequency>() {
                Ok(frequency) => selection.set_frequency(frequency),
                Err(e) => tracing::warn!("Ignoring saved frequency: {}", e),
            }
        }
        if let Some(max) = profile.max_articles {
            if let Err(e) = selection.set_max_articles(max) {
                tracing::warn!("Ignoring saved max_articles: {}", e);
            }
        }

        for pref in profile.preferences.iter().filter(|p| p.is_active) {
            if !TopicCatalog::contains(pref.topic_id) {
                tracing::debug!("Dropping unknown topic {} from profile", pref.topic_id);
                continue;
            }
            let priority = pref
                .priority
                .and_then(|p| Priority::try_from(p).ok())
                .unwrap_or_default();
            selection.topics.insert(pref.topic_id, priority);
        }

        selection
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn selected_topic_ids(&self) -> Vec<u32> {
        self.topics.keys().copied().collect()
    }

    pub fn is_selected(&self, topic_id: u32) -> bool {
        self.topics.contains_key(&topic_id)
    }

    pub fn priority(&self, topic_id: u32) -> Option<Priority> {
        self.topics.get(&topic_id).copied()
    }

    pub fn priorities(&self) -> &BTreeMap<u32, Priority> {
        &self.topics
    }

    pub fn preferred_time(&self) -> NaiveTime {
        self.preferred_time
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn max_articles(&self) -> u32 {
        self.max_articles
    }

    /// Include or exclude a topic. Returns whether anything changed.
    ///
    /// Unknown topic ids are ignored with a warning.
    pub fn set_topic_selected(&mut self, topic_id: u32, included: bool) -> bool {
        if !TopicCatalog::contains(topic_id) {
            tracing::warn!("Ignoring selection of unknown topic {}", topic_id);
            return false;
        }

        if included {
            if self.topics.contains_key(&topic_id) {
                return false;
            }
            self.topics.insert(topic_id, Priority::High);
            true
        } else {
            self.topics.remove(&topic_id).is_some()
        }
    }

    pub fn set_priority(&mut self, topic_id: u32, level: u8) -> Result<(), ValidationError> {
        let priority = Priority::try_from(level)?;
        match self.topics.get_mut(&topic_id) {
            Some(slot) => {
                *slot = priority;
                Ok(())
            }
            None => Err(ValidationError::TopicNotSelected(topic_id)),
        }
    }

    pub fn set_preferred_time(&mut self, time: &str) -> Result<(), ValidationError> {
        let parsed = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidTime(time.to_string()))?;
        self.preferred_time = parsed;
        Ok(())
    }

    pub fn set_timezone(&mut self, timezone: &str) -> Result<(), ValidationError> {
        if !TopicCatalog::is_offered_timezone(timezone) {
            return Err(ValidationError::UnsupportedTimezone(timezone.to_string()));
        }
        self.timezone = timezone.to_string();
        Ok(())
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn set_max_articles(&mut self, max_articles: u32) -> Result<(), ValidationError> {
        if !MAX_ARTICLE_CHOICES.contains(&max_articles) {
            return Err(ValidationError::UnsupportedMaxArticles(max_articles));
        }
        self.max_articles = max_articles;
        Ok(())
    }

    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        if self.topics.is_empty() {
            return Err(ValidationError::EmptyTopicSelection);
        }
        Ok(())
    }

    pub fn to_update_request(&self) -> UpdatePreferencesRequest {
        UpdatePreferencesRequest {
            email: self.email.clone(),
            preferred_time: self.preferred_time.format(TIME_FORMAT).to_string(),
            timezone: self.timezone.clone(),
            frequency: self.frequency,
            max_articles: self.max_articles,
            topics: self.selected_topic_ids(),
            priorities: self
                .topics
                .iter()
                .map(|(id, p)| (*id, p.level()))
                .collect(),
        }
    }
}

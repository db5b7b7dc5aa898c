pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::domain::Frequency;

#[derive(Parser)]
#[command(name = "newsdaily")]
#[command(about = "Subscribe to AI News Daily and manage delivery preferences", long_about = None)]
pub struct Cli {
    /// Base URL of the subscription service (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show subscriber counts and the latest articles
    Stats,
    /// List the available topics
    Topics,
    /// Subscribe an email address
    Subscribe {
        /// Email address to subscribe
        email: String,
    },
    /// Update delivery preferences, optionally adding a Slack channel
    Preferences(PreferencesArgs),
    /// Slack integration helpers
    Slack {
        #[command(subcommand)]
        action: SlackAction,
    },
}

#[derive(Args)]
pub struct PreferencesArgs {
    /// Account email address
    pub email: String,

    /// Topic to include, as ID or ID:PRIORITY (1=High, 2=Medium, 3=Low).
    /// Replaces any saved selection when given.
    #[arg(short, long = "topic", value_parser = parse_topic_arg)]
    pub topics: Vec<(u32, u8)>,

    /// Preferred delivery time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Delivery timezone
    #[arg(long)]
    pub timezone: Option<String>,

    /// daily, weekly or monthly
    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Option<Frequency>,

    /// Maximum articles per email (3, 5, 10 or 15)
    #[arg(long)]
    pub max_articles: Option<u32>,

    /// Don't load the saved preferences first
    #[arg(long)]
    pub no_prefill: bool,

    /// Slack incoming webhook to add after saving
    #[arg(long)]
    pub slack_webhook: Option<String>,

    /// Slack channel name (default: #ai-news)
    #[arg(long, requires = "slack_webhook")]
    pub slack_channel: Option<String>,
}

#[derive(Subcommand)]
pub enum SlackAction {
    /// Show how to create an incoming webhook
    Guide {
        /// Open the Slack incoming-webhooks page in a browser
        #[arg(long)]
        open: bool,
    },
}

fn parse_topic_arg(s: &str) -> Result<(u32, u8), String> {
    let (id, priority) = s.split_once(':').unwrap_or((s, "1"));
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid topic id: {}", id))?;
    let priority = priority
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("Invalid priority: {}", priority))?;
    Ok((id, priority))
}

fn parse_frequency(s: &str) -> Result<Frequency, String> {
    s.parse::<Frequency>().map_err(|e| e.to_string())
}

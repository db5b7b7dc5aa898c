//! # newsdaily
//!
//! Client and command-line front end for the AI News Daily subscription
//! service.
//!
//! ## Architecture
//!
//! ```text
//! Page workflow → PreferenceSelection → SubmissionClient → Transport
//!                                     ↘ NotificationChannelSetup
//! ```
//!
//! - [`domain`]: topics, preference state, request and response bodies
//! - [`client`]: the transport seam and typed endpoint calls
//! - [`workflow`]: the subscribe, preferences and home pages, plus the
//!   webhook channel setup state machine
//!
//! ## Quick Start
//!
//! ```bash
//! # Subscribe
//! newsdaily subscribe reader@example.com
//!
//! # Pick topics and add a Slack channel
//! newsdaily preferences reader@example.com --topic 1 --topic 3:2 \
//!     --slack-webhook https://hooks.slack.com/services/T000/B000/xxxx
//!
//! # Landing page numbers
//! newsdaily stats
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the loaded config to a
/// [`SubmissionClient`](client::SubmissionClient).
pub mod app;

/// Command-line interface using clap.
///
/// - `stats` - Subscriber counts and recent articles
/// - `topics` - The topic catalog
/// - `subscribe <email>` - Subscribe an address
/// - `preferences <email>` - Save preferences, optionally add Slack
/// - `slack guide` - Webhook setup steps
pub mod cli;

/// Configuration loaded from `~/.config/newsdaily/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Topic`](domain::Topic) and [`TopicCatalog`](domain::TopicCatalog): static reference data
/// - [`PreferenceSelection`](domain::PreferenceSelection): per-page preference state
/// - [`NotificationChannelConfig`](domain::NotificationChannelConfig): webhook channel body
/// - [`SubmissionStatus`](domain::SubmissionStatus): idle/success/error
pub mod domain;

/// Outbound calls to the subscription service.
///
/// - [`Transport`](client::Transport): Async trait for one request/response
/// - [`HttpTransport`](client::HttpTransport): reqwest-based implementation
/// - [`SubmissionClient`](client::SubmissionClient): typed endpoint calls
pub mod client;

/// Page-level flows built from the pieces above.
pub mod workflow;

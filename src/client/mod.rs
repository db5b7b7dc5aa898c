pub mod api;
pub mod http_transport;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::app::Result;

pub use api::{endpoints, SubmissionClient};
pub use http_transport::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request payload. `/update-preferences` is read as a form; every other
/// POST takes JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// What the service sends back from a successful POST. Every field is
/// optional; a 2xx with an empty body is still an ack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerAck {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub redirect_url: Option<String>,
}

/// One request, one JSON response.
///
/// Implementations return `Ok` only for 2xx responses and never follow
/// redirects. Everything else (3xx, 4xx, 5xx, connection failure, timeout)
/// is a single
/// [`NewsDailyError::Transport`](crate::app::NewsDailyError::Transport).
#[async_trait]
pub trait Transport {
    async fn send(&self, method: Method, path: &str, body: Option<Body>) -> Result<Value>;
}

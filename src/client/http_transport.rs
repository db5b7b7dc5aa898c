use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::{NewsDailyError, Result};
use crate::client::{Body, Method, Transport};
use crate::config::ApiConfig;

pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| NewsDailyError::Other(format!("Failed to build HTTP client: {e}")))?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Endpoint paths are resolved relative to the base URL, so a base of
    /// `https://host/app` maps `/api/stats` to `https://host/app/api/stats`.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Body>) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        tracing::debug!("{:?} {}", method, url);

        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let request = match body {
            Some(Body::Json(body)) => request.json(&body),
            Some(Body::Form(fields)) => request.form(&fields),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| NewsDailyError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsDailyError::transport(path, format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| NewsDailyError::transport(path, e))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!("Non-JSON body from {}: {}", path, e);
                Ok(Value::String(text))
            }
        }
    }
}

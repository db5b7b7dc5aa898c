use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::app::{NewsDailyError, Result};
use crate::client::{Body, Method, ServerAck, Transport};
use crate::domain::{
    NotificationChannelConfig, StatsResponse, UpdatePreferencesRequest, UserProfile,
    WebhookTestRequest,
};

pub mod endpoints {
    pub const STATS: &str = "/api/stats";
    pub const SUBSCRIBE: &str = "/api/subscribe";
    pub const UPDATE_PREFERENCES: &str = "/update-preferences";
    pub const USER: &str = "/api/user/";
    pub const SLACK_TEST: &str = "/api/slack/test";
    pub const NOTIFICATION_SETUP: &str = "/api/notifications/setup";
}

/// Typed calls against the subscription service.
///
/// Each method issues exactly one request. There is no retry and no
/// idempotency key; repeated calls are repeated requests.
#[derive(Clone)]
pub struct SubmissionClient {
    transport: Arc<dyn Transport + Send + Sync>,
}

impl SubmissionClient {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self { transport }
    }

    /// POST `payload` as JSON to `endpoint`. A 2xx reply whose body says
    /// `"success": false` is treated like any other failure.
    pub async fn submit<P>(&self, endpoint: &str, payload: &P) -> Result<ServerAck>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload).map_err(|e| NewsDailyError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        self.post(endpoint, Body::Json(body)).await
    }

    async fn post(&self, endpoint: &str, body: Body) -> Result<ServerAck> {
        let reply = self.transport.send(Method::Post, endpoint, Some(body)).await?;
        let ack = parse_ack(endpoint, reply)?;

        if ack.success == Some(false) {
            let reason = ack.error.unwrap_or_else(|| "request rejected".to_string());
            return Err(NewsDailyError::transport(endpoint, reason));
        }

        Ok(ack)
    }

    pub async fn fetch_stats(&self) -> Result<StatsResponse> {
        let reply = self.transport.send(Method::Get, endpoints::STATS, None).await?;
        serde_json::from_value(reply).map_err(|e| NewsDailyError::Decode {
            endpoint: endpoints::STATS.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn subscribe(&self, email: &str) -> Result<ServerAck> {
        self.submit(endpoints::SUBSCRIBE, &serde_json::json!({ "email": email }))
            .await
    }

    pub async fn update_preferences(&self, request: &UpdatePreferencesRequest) -> Result<ServerAck> {
        self.post(
            endpoints::UPDATE_PREFERENCES,
            Body::Form(request.form_fields()),
        )
        .await
    }

    /// Fetch a saved account. `Ok(None)` when the service answers but has
    /// no usable user record.
    pub async fn lookup_user(&self, email: &str) -> Result<Option<UserProfile>> {
        let path = user_path(email);
        let reply = self.transport.send(Method::Get, &path, None).await?;

        if reply.get("success").and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }

        match reply.get("user") {
            Some(user) => serde_json::from_value(user.clone())
                .map(Some)
                .map_err(|e| NewsDailyError::Decode {
                    endpoint: path,
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub async fn test_slack_webhook(&self, request: &WebhookTestRequest) -> Result<ServerAck> {
        self.submit(endpoints::SLACK_TEST, request).await
    }

    pub async fn setup_notification_channel(
        &self,
        config: &NotificationChannelConfig,
    ) -> Result<ServerAck> {
        self.submit(endpoints::NOTIFICATION_SETUP, config).await
    }
}

fn user_path(email: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(email.as_bytes()).collect();
    format!("{}{}", endpoints::USER, encoded)
}

/// An empty body is a bare ack. Anything that is not a JSON object, such as
/// an HTML page, is a failure.
fn parse_ack(endpoint: &str, reply: Value) -> Result<ServerAck> {
    match reply {
        Value::Null => Ok(ServerAck::default()),
        Value::Object(_) => Ok(serde_json::from_value(reply).unwrap_or_else(|e| {
            tracing::debug!("Ignoring unexpected ack shape from {}: {}", endpoint, e);
            ServerAck::default()
        })),
        _ => Err(NewsDailyError::transport(endpoint, "reply is not a JSON object")),
    }
}

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{NewsDailyError, Result};
use crate::client::{Body, Method, Transport};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Fail,
    /// Never answers.
    Hang,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Body>,
}

/// Test double that records every request and answers from a per-path
/// queue. Unscripted paths get an empty JSON object.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }
}

impl RecordedCall {
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Some(Body::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Every value sent under `name` in a form body.
    pub fn form_values(&self, name: &str) -> Vec<&str> {
        match &self.body {
            Some(Body::Form(fields)) => fields
                .iter()
                .filter(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Body>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Fail) => Err(NewsDailyError::transport(path, "simulated failure")),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(Value::Object(Default::default())),
        }
    }
}

//! In-memory repositories for tests

use async_trait::async_trait;
use serde_json::{Value, json};
use statuswatch_client::ClientError;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{MessageRepository, StatusRepository};

/// Replays a fixed script of fetch results and records every cursor it was asked for
///
/// Once the script runs out every fetch answers with an empty list.
#[derive(Default)]
pub struct ScriptedStatuses {
    script: Mutex<VecDeque<Result<Value, ClientError>>>,
    calls: Mutex<Vec<i64>>,
}

impl ScriptedStatuses {
    pub fn new(script: Vec<Result<Value, ClientError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Cursors passed to `fetch`, in call order
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusRepository for ScriptedStatuses {
    async fn fetch(&self, since: i64) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(since);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"homeworks": []})))
    }
}

/// Records delivered messages; fails any message containing a configured marker
#[derive(Default)]
pub struct RecordingMessages {
    sent: Mutex<Vec<(String, String)>>,
    attempts: Mutex<usize>,
    fail_when_contains: Vec<String>,
}

impl RecordingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(markers: &[&str]) -> Self {
        Self {
            fail_when_contains: markers.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Successfully delivered `(channel_id, text)` pairs
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    /// Delivery attempts, successful or not
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MessageRepository for RecordingMessages {
    async fn deliver(&self, channel_id: &str, text: &str) -> Result<(), ClientError> {
        *self.attempts.lock().unwrap() += 1;

        if self.fail_when_contains.iter().any(|m| text.contains(m)) {
            return Err(ClientError::Rejected("Bad Request: chat not found".to_string()));
        }

        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

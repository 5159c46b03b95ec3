//! In-memory `RestClient` for unit tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use today_pr_core::{Error, Result};

use crate::RestClient;

/// Serves canned JSON per path and records every request
#[derive(Default)]
pub(crate) struct FakeClient {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, body: Value) -> Self {
        self.responses.insert(path.into(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

#[async_trait]
impl RestClient for FakeClient {
    async fn get(&self, path: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(path.to_string());
        self.responses.get(path).cloned().ok_or_else(|| Error::Api {
            status: "404 Not Found".to_string(),
            path: path.to_string(),
            message: "Not Found".to_string(),
        })
    }
}

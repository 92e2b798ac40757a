use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

use crate::capabilities::CapabilitySpec;
use crate::models::message::Message;
use crate::providers::base::{Completion, Provider, Usage};

/// What a [`MockProvider`] was asked to complete
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub capability_names: Vec<String>,
}

/// A mock provider that returns pre-configured completions for testing
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<Completion>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Completion>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Create a mock provider whose turns may also fail
    pub fn with_results(results: Vec<Result<Completion>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(results)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Provider for MockProvider {
    fn from_env() -> Result<Self> {
        Ok(Self::default())
    }

    fn complete(
        &self,
        messages: &[Message],
        capabilities: &[&CapabilitySpec],
    ) -> Result<(Completion, Usage)> {
        self.requests
            .lock()
            .map_err(|_| anyhow!("mock provider lock poisoned"))?
            .push(RecordedRequest {
                messages: messages.to_vec(),
                capability_names: capabilities.iter().map(|c| c.name.clone()).collect(),
            });

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| anyhow!("mock provider lock poisoned"))?;
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok((Completion::text(""), Usage::default()))
        } else {
            responses.remove(0).map(|completion| (completion, Usage::default()))
        }
    }
}

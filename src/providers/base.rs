use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::capabilities::CapabilitySpec;
use crate::models::intent::CallIntent;
use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// What the model produced for one request: free text, and possibly
/// a request to invoke a capability
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub call_intent: Option<CallIntent>,
}

impl Completion {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            call_intent: None,
        }
    }

    pub fn call(intent: CallIntent) -> Self {
        Self {
            text: String::new(),
            call_intent: Some(intent),
        }
    }
}

/// Base trait for language model completion services
pub trait Provider: Send + Sync {
    /// Create a provider instance from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Complete the conversation in `messages`, offering the model `capabilities`
    fn complete(
        &self,
        messages: &[Message],
        capabilities: &[&CapabilitySpec],
    ) -> Result<(Completion, Usage)>;
}

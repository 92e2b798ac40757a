use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client; // blocking API, one turn completes before the next starts
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::{
    base::{Completion, Provider, Usage},
    configs::{OpenAiProviderConfig, ProviderConfig},
    utils::{
        capabilities_to_openai_spec, check_openai_context_length_error, messages_to_openai_spec,
        openai_response_to_completion,
    },
};
use crate::capabilities::CapabilitySpec;
use crate::models::message::Message;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn get_usage(data: &Value) -> Result<Usage> {
        let usage = data
            .get("usage")
            .ok_or_else(|| anyhow!("No usage data in response"))?;

        let input_tokens = usage
            .get("prompt_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let output_tokens = usage
            .get("completion_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let total_tokens = usage
            .get("total_tokens")
            .and_then(|v| v.as_i64())
            .map(|v| v as i32)
            .or_else(|| match (input_tokens, output_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });

        Ok(Usage::new(input_tokens, output_tokens, total_tokens))
    }

    fn build_payload(
        &self,
        messages: &[Message],
        capabilities: &[&CapabilitySpec],
    ) -> Result<Value> {
        let tools_spec = capabilities_to_openai_spec(capabilities);

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_openai_spec(messages),
        });

        if let Some(object) = payload.as_object_mut() {
            if !tools_spec.is_empty() {
                object.insert("tools".to_string(), json!(tools_spec));
            }
            if let Some(temp) = self.config.temperature {
                object.insert("temperature".to_string(), json!(temp));
            }
            if let Some(tokens) = self.config.max_tokens {
                object.insert("max_tokens".to_string(), json!(tokens));
            }
        }

        Ok(payload)
    }

    fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            // Error bodies carry an "error" object worth inspecting
            StatusCode::BAD_REQUEST => Ok(response.json()?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => Err(anyhow!("Request failed: {}", status)),
        }
    }
}

impl Provider for OpenAiProvider {
    fn from_env() -> Result<Self> {
        let config = OpenAiProviderConfig::from_env()?;
        Self::new(config)
    }

    fn complete(
        &self,
        messages: &[Message],
        capabilities: &[&CapabilitySpec],
    ) -> Result<(Completion, Usage)> {
        let payload = self.build_payload(messages, capabilities)?;
        tracing::debug!(
            model = %self.config.model,
            messages = messages.len(),
            capabilities = capabilities.len(),
            "requesting completion"
        );

        let response = self.post(payload)?;

        if let Some(error) = response.get("error") {
            if let Some(err) = check_openai_context_length_error(error) {
                return Err(err.into());
            }
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        let completion = openai_response_to_completion(&response)?;
        let usage = Self::get_usage(&response).unwrap_or_default();

        Ok((completion, usage))
    }
}

use anyhow::{anyhow, Result};
use regex::Regex;
use serde_json::{json, Value};

use super::base::Completion;
use crate::capabilities::CapabilitySpec;
use crate::models::intent::CallIntent;
use crate::models::message::Message;

const FUNCTION_NAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Convert capability specs to OpenAI's API tool specification.
///
/// Specs the API would refuse (a name outside `FUNCTION_NAME_PATTERN`, or a
/// name already advertised) are left out with a warning, so one bad
/// registration does not break every completion.
pub fn capabilities_to_openai_spec(capabilities: &[&CapabilitySpec]) -> Vec<Value> {
    let mut names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for spec in capabilities {
        if !is_valid_function_name(&spec.name) {
            tracing::warn!(
                capability = %spec.name,
                pattern = FUNCTION_NAME_PATTERN,
                "capability name is not accepted by the API, not advertising it"
            );
            continue;
        }
        if !names.insert(spec.name.as_str()) {
            tracing::warn!(capability = %spec.name, "duplicate capability name, not advertising it");
            continue;
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": spec.name,
                "description": spec.description,
                "parameters": spec.parameters_schema(),
            }
        }));
    }

    result
}

/// Convert OpenAI's API response to a completion.
///
/// Name and arguments of a call are passed through untouched, even when
/// empty or malformed; judging them is the parser's job. Only the first tool
/// call is kept. The legacy `function_call` field is read when there are no
/// tool calls.
pub fn openai_response_to_completion(response: &Value) -> Result<Completion> {
    let message = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("No message in response"))?;

    let text = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let tool_calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .filter(|calls| !calls.is_empty());

    let function = match tool_calls {
        Some(calls) => {
            if calls.len() > 1 {
                tracing::warn!(
                    count = calls.len(),
                    "model requested several tool calls, dispatching only the first"
                );
            }
            calls[0].get("function")
        }
        None => message.get("function_call"),
    };

    Ok(Completion {
        text,
        call_intent: function.map(function_to_call_intent),
    })
}

fn function_to_call_intent(function: &Value) -> CallIntent {
    let name = function
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let arguments = match function.get("arguments") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(raw.clone()),
        Some(other) => Some(other.to_string()),
    };

    CallIntent { name, arguments }
}

fn is_valid_function_name(name: &str) -> bool {
    Regex::new(FUNCTION_NAME_PATTERN)
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

#[derive(Debug, thiserror::Error)]
#[error("Input message too long. Message: {0}")]
pub struct InitialMessageTooLargeError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<InitialMessageTooLargeError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(InitialMessageTooLargeError(message))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{ChangeTimezone, Capability, ParameterSpec, SendEmail};

    const OPENAI_TOOL_USE_RESPONSE: &str = r#"{
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {
                        "name": "send_email",
                        "arguments": "{\"email_title\": \"\"}"
                    }
                }]
            }
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 25,
            "total_tokens": 35
        }
    }"#;

    #[test]
    fn test_messages_to_openai_spec() {
        let messages = vec![
            Message::system("You are a bot"),
            Message::assistant("Hello!"),
            Message::user("How are you?"),
        ];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(spec.len(), 3);
        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[0]["content"], "You are a bot");
        assert_eq!(spec[1]["role"], "assistant");
        assert_eq!(spec[2]["role"], "user");
        assert_eq!(spec[2]["content"], "How are you?");
    }

    #[test]
    fn test_capabilities_to_openai_spec() {
        let timezone = ChangeTimezone::new();
        let email = SendEmail::new();
        let spec = capabilities_to_openai_spec(&[timezone.spec(), email.spec()]);

        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0]["type"], "function");
        assert_eq!(spec[0]["function"]["name"], "change_timezone");
        assert_eq!(spec[1]["function"]["name"], "send_email");
        assert_eq!(
            spec[1]["function"]["parameters"]["required"],
            json!(["receiver_email_address", "email_title"])
        );
    }

    #[test]
    fn test_capabilities_to_openai_spec_skips_bad_names() {
        let spaced = CapabilitySpec::new("send email", "Bad name");
        let timezone = ChangeTimezone::new();
        let spec = capabilities_to_openai_spec(&[&spaced, timezone.spec()]);
        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["function"]["name"], "change_timezone");

        let first = CapabilitySpec::new("echo", "One")
            .with_parameter("text", ParameterSpec::string("Text"));
        let second = CapabilitySpec::new("echo", "Two");
        let spec = capabilities_to_openai_spec(&[&first, &second]);
        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["function"]["description"], "One");
    }

    #[test]
    fn test_capabilities_to_openai_spec_empty() {
        assert!(capabilities_to_openai_spec(&[]).is_empty());
    }

    #[test]
    fn test_is_valid_function_name() {
        assert!(is_valid_function_name("hello-world"));
        assert!(is_valid_function_name("hello_world"));
        assert!(!is_valid_function_name("hello world"));
        assert!(!is_valid_function_name("hello@world"));
        assert!(!is_valid_function_name(""));
    }

    #[test]
    fn test_response_to_completion_text() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Hello there"}
            }]
        });

        let completion = openai_response_to_completion(&response)?;
        assert_eq!(completion, Completion::text("Hello there"));
        Ok(())
    }

    #[test]
    fn test_response_to_completion_tool_call() -> Result<()> {
        let response: Value = serde_json::from_str(OPENAI_TOOL_USE_RESPONSE)?;
        let completion = openai_response_to_completion(&response)?;

        assert_eq!(completion.text, "");
        assert_eq!(
            completion.call_intent,
            Some(CallIntent::new("send_email", r#"{"email_title": ""}"#))
        );
        Ok(())
    }

    #[test]
    fn test_response_keeps_malformed_arguments_raw() -> Result<()> {
        let mut response: Value = serde_json::from_str(OPENAI_TOOL_USE_RESPONSE)?;
        response["choices"][0]["message"]["tool_calls"][0]["function"]["arguments"] =
            json!("invalid json {");

        let completion = openai_response_to_completion(&response)?;
        let intent = completion.call_intent.unwrap();
        assert_eq!(intent.arguments.as_deref(), Some("invalid json {"));
        Ok(())
    }

    #[test]
    fn test_response_keeps_first_tool_call() -> Result<()> {
        let mut response: Value = serde_json::from_str(OPENAI_TOOL_USE_RESPONSE)?;
        let second = json!({
            "id": "call_2",
            "type": "function",
            "function": {"name": "change_timezone", "arguments": "{}"}
        });
        response["choices"][0]["message"]["tool_calls"]
            .as_array_mut()
            .unwrap()
            .push(second);

        let completion = openai_response_to_completion(&response)?;
        assert_eq!(completion.call_intent.unwrap().name, "send_email");
        Ok(())
    }

    #[test]
    fn test_response_legacy_function_call() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "function_call": {"name": "change_timezone"}
                }
            }]
        });

        let completion = openai_response_to_completion(&response)?;
        assert_eq!(
            completion.call_intent,
            Some(CallIntent::without_arguments("change_timezone"))
        );
        Ok(())
    }

    #[test]
    fn test_response_object_arguments_are_serialized() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {
                    "function_call": {
                        "name": "change_timezone",
                        "arguments": {"target_timezone": "UTC"}
                    }
                }
            }]
        });

        let intent = openai_response_to_completion(&response)?.call_intent.unwrap();
        assert_eq!(intent.arguments.as_deref(), Some(r#"{"target_timezone":"UTC"}"#));
        Ok(())
    }

    #[test]
    fn test_response_without_choices_fails() {
        assert!(openai_response_to_completion(&json!({"choices": []})).is_err());
    }

    #[test]
    fn test_check_openai_context_length_error() {
        let error = json!({
            "code": "context_length_exceeded",
            "message": "This message is too long"
        });

        let result = check_openai_context_length_error(&error);
        assert_eq!(
            result.unwrap().to_string(),
            "Input message too long. Message: This message is too long"
        );

        let error = json!({
            "code": "other_error",
            "message": "Some other error"
        });
        assert!(check_openai_context_length_error(&error).is_none());
    }
}

use crate::capabilities::CapabilityRegistry;
use crate::errors::{ArgumentError, CapabilityError, CapabilityResult};
use crate::models::intent::{Arguments, CallIntent};

const EMPTY_ARGUMENTS: &str = "{}";

/// Decode a call intent into the capability name and its arguments.
///
/// The name must be non-empty and registered before the arguments are looked
/// at. Missing or empty argument text decodes as an empty object; anything
/// that is not a JSON object is rejected as a whole.
pub fn parse(
    registry: &CapabilityRegistry,
    intent: &CallIntent,
) -> CapabilityResult<(String, Arguments)> {
    if intent.name.is_empty() {
        return Err(CapabilityError::InvalidFunction(
            "call intent has no function name".to_string(),
        ));
    }

    if !registry.contains(&intent.name) {
        return Err(CapabilityError::InvalidFunction(format!(
            "name={} arguments={}",
            intent.name,
            intent.arguments.as_deref().unwrap_or_default()
        )));
    }

    let raw = intent
        .arguments
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .unwrap_or(EMPTY_ARGUMENTS);
    let args = decode_arguments(raw)?;

    Ok((intent.name.clone(), args))
}

fn decode_arguments(raw: &str) -> Result<Arguments, ArgumentError> {
    serde_json::from_str::<Arguments>(raw).map_err(|e| ArgumentError::Malformed {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

use serde_json::Value;

use crate::capabilities::{CapabilityRegistry, CapabilitySpec, ParameterType};
use crate::errors::{ArgumentError, CapabilityResult};
use crate::models::intent::Arguments;

/// Placeholder models emit when they do not know a string value
const PLACEHOLDER_VALUE: &str = "any";

/// Validate `args` against the schema of the registered capability `name`.
pub fn validate_arguments(
    registry: &CapabilityRegistry,
    name: &str,
    args: &Arguments,
) -> CapabilityResult<()> {
    let capability = registry.get(name)?;
    validate(capability.spec(), args)?;
    Ok(())
}

/// Check each supplied argument against its declared type, in the order the
/// arguments were supplied, stopping at the first bad one.
///
/// Only supplied keys are checked. A call that leaves out a required
/// parameter entirely still passes.
pub fn validate(spec: &CapabilitySpec, args: &Arguments) -> Result<(), ArgumentError> {
    for (key, value) in args {
        let parameter = spec
            .parameter(key)
            .ok_or_else(|| ArgumentError::UnknownField(key.clone()))?;

        if !is_argument_valid(value, &parameter.kind) {
            return Err(ArgumentError::InvalidField {
                field: key.clone(),
                description: parameter.description.clone(),
            });
        }
    }
    Ok(())
}

pub fn is_argument_valid(value: &Value, kind: &ParameterType) -> bool {
    match kind {
        // only the empty string, the placeholder and null are rejected
        ParameterType::String => match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty() && s != PLACEHOLDER_VALUE,
            _ => true,
        },
        ParameterType::Integer => match value {
            Value::Bool(flag) => *flag,
            other => other.as_f64().is_some_and(|n| n > 0.0),
        },
        ParameterType::Boolean => true,
        ParameterType::Other(_) => false,
    }
}

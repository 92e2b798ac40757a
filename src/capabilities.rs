use anyhow::Result;
use serde_json::Value;

use crate::models::intent::Arguments;

pub mod change_timezone;
pub mod registry;
pub mod send_email;
pub mod spec;

pub use change_timezone::ChangeTimezone;
pub use registry::CapabilityRegistry;
pub use send_email::SendEmail;
pub use spec::{CapabilitySpec, ParameterSpec, ParameterType};

/// An action the agent can perform on the model's behalf
pub trait Capability: Send + Sync {
    /// The schema the model sees. Must not change after registration.
    fn spec(&self) -> &CapabilitySpec;

    /// Run the capability with already validated arguments and return
    /// a confirmation for the user
    fn invoke(&self, args: &Arguments) -> Result<String>;

    fn name(&self) -> &str {
        &self.spec().name
    }
}

/// Render an argument as text, failing if it is absent or null. Strings are
/// used as-is, other values in their JSON form.
pub(crate) fn text_argument(args: &Arguments, key: &str) -> Result<String> {
    match args.get(key) {
        None | Some(Value::Null) => Err(anyhow::anyhow!("missing argument '{}'", key)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

use anyhow::Result;

use super::{text_argument, Capability, CapabilitySpec, ParameterSpec};
use crate::models::intent::Arguments;

pub struct ChangeTimezone {
    spec: CapabilitySpec,
}

impl ChangeTimezone {
    pub fn new() -> Self {
        Self {
            spec: CapabilitySpec::new("change_timezone", "Help user to change timezone")
                .with_parameter(
                    "target_timezone",
                    ParameterSpec::string(
                        "The target timezone the user want to switch to, ask the user to get the target timezone",
                    )
                    .required(),
                ),
        }
    }
}

impl Default for ChangeTimezone {
    fn default() -> Self {
        Self::new()
    }
}

impl Capability for ChangeTimezone {
    fn spec(&self) -> &CapabilitySpec {
        &self.spec
    }

    fn invoke(&self, args: &Arguments) -> Result<String> {
        let timezone = text_argument(args, "target_timezone")?;
        Ok(format!("Switched your timezone to {} successfully!", timezone))
    }
}

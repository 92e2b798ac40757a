use anyhow::Result;

use super::{text_argument, Capability, CapabilitySpec, ParameterSpec};
use crate::models::intent::Arguments;

pub struct SendEmail {
    spec: CapabilitySpec,
}

impl SendEmail {
    pub fn new() -> Self {
        Self {
            spec: CapabilitySpec::new("send_email", "Send email for user")
                .with_parameter(
                    "receiver_email_address",
                    ParameterSpec::string(
                        "The email address of receiver, ask the user to get the email address",
                    )
                    .required(),
                )
                .with_parameter(
                    "email_title",
                    ParameterSpec::string("The title of email, ask the user to get the email title")
                        .required(),
                ),
        }
    }
}

impl Default for SendEmail {
    fn default() -> Self {
        Self::new()
    }
}

impl Capability for SendEmail {
    fn spec(&self) -> &CapabilitySpec {
        &self.spec
    }

    fn invoke(&self, args: &Arguments) -> Result<String> {
        let title = text_argument(args, "email_title")?;
        let receiver = text_argument(args, "receiver_email_address")?;
        Ok(format!(
            "An email with title[{}] has been sent to {} successfully!",
            title, receiver
        ))
    }
}

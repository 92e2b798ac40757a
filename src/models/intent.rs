use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded arguments of a call, keyed by parameter name. Keys keep the order
/// in which the model wrote them.
pub type Arguments = Map<String, Value>;

/// A model-issued request to invoke a named capability.
///
/// The arguments are kept exactly as the model produced them; decoding happens
/// in [`crate::parser::parse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallIntent {
    /// Name of the capability to invoke, possibly empty
    #[serde(default)]
    pub name: String,
    /// Serialized argument object, if the model sent one
    #[serde(default)]
    pub arguments: Option<String>,
}

impl CallIntent {
    pub fn new<N, A>(name: N, arguments: A) -> Self
    where
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: Some(arguments.into()),
        }
    }

    /// A call intent that carries no argument text at all
    pub fn without_arguments<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_deserialize_with_missing_fields() -> Result<()> {
        let intent: CallIntent = serde_json::from_str("{}")?;
        assert_eq!(intent.name, "");
        assert!(intent.arguments.is_none());

        let intent: CallIntent =
            serde_json::from_str(r#"{"name": "send_email", "arguments": "{}"}"#)?;
        assert_eq!(intent, CallIntent::new("send_email", "{}"));
        Ok(())
    }

    #[test]
    fn test_arguments_keep_written_order() -> Result<()> {
        let args: Arguments = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)?;
        let keys: Vec<&str> = args.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        Ok(())
    }
}

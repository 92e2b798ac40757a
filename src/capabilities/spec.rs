use indexmap::IndexMap;
use serde_json::{json, Value};
use std::fmt;

/// Primitive type a capability parameter is declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Integer,
    Boolean,
    /// Any type name the validator does not know how to check
    Other(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::Other(name) => name,
        }
    }
}

impl From<&str> for ParameterType {
    fn from(name: &str) -> Self {
        match name {
            "string" => ParameterType::String,
            "integer" => ParameterType::Integer,
            "boolean" => ParameterType::Boolean,
            other => ParameterType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one parameter of a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub kind: ParameterType,
    /// Human readable description; also the text used to ask the user for it
    pub description: String,
    pub required: bool,
}

impl ParameterSpec {
    pub fn new<T, D>(kind: T, description: D) -> Self
    where
        T: Into<ParameterType>,
        D: Into<String>,
    {
        Self {
            kind: kind.into(),
            description: description.into(),
            required: false,
        }
    }

    pub fn string<D: Into<String>>(description: D) -> Self {
        Self::new(ParameterType::String, description)
    }

    pub fn integer<D: Into<String>>(description: D) -> Self {
        Self::new(ParameterType::Integer, description)
    }

    pub fn boolean<D: Into<String>>(description: D) -> Self {
        Self::new(ParameterType::Boolean, description)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Name, description and typed parameter schema of a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySpec {
    pub name: String,
    pub description: String,
    pub parameters: IndexMap<String, ParameterSpec>,
}

impl CapabilitySpec {
    pub fn new<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn with_parameter<N: Into<String>>(mut self, name: N, parameter: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.get(name)
    }

    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|(_, p)| p.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// JSON schema of the parameter object, in the shape function-calling APIs expect
    pub fn parameters_schema(&self) -> Value {
        let properties: serde_json::Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, p)| {
                (
                    name.clone(),
                    json!({
                        "type": p.kind.as_str(),
                        "description": p.description,
                    }),
                )
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_parameters(),
        })
    }
}

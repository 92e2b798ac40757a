use indexmap::IndexMap;

use super::{Capability, CapabilitySpec};
use crate::errors::{CapabilityError, CapabilityResult};

/// Capabilities keyed by name, in registration order
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: IndexMap<String, Box<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under its spec name. A later registration with
    /// the same name replaces the earlier one and keeps its position.
    pub fn register<C>(&mut self, capability: C)
    where
        C: Capability + 'static,
    {
        let name = capability.name().to_string();
        if self.capabilities.contains_key(&name) {
            tracing::debug!(capability = %name, "replacing registered capability");
        }
        self.capabilities.insert(name, Box::new(capability));
    }

    pub fn get(&self, name: &str) -> CapabilityResult<&dyn Capability> {
        self.capabilities
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| CapabilityError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    pub fn specs(&self) -> Vec<&CapabilitySpec> {
        self.capabilities.values().map(|c| c.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

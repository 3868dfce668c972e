//! Tool registry
//!
//! Keys are the lower-cased `namespace_tool` name. Iteration follows
//! registration order; re-registering a key replaces the earlier entry in
//! place, so the last registration wins without reordering the list.

use super::{ToolArgs, ToolDefinition, ToolProvider, ToolSignature};
use crate::types::Result;
use std::collections::HashMap;
use tracing::{debug, info};

/// Registry key normalization (case-insensitive names)
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub key: String,
    pub definition: ToolDefinition,
}

impl RegisteredTool {
    pub fn signature(&self) -> &ToolSignature {
        &self.definition.signature
    }

    pub fn invoke(&self, args: &ToolArgs<'_>) -> Result<String> {
        self.definition.invoke(args)
    }
}

#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from providers, registering them in the given order
    pub fn from_providers(providers: &[Box<dyn ToolProvider>]) -> Self {
        let mut registry = Self::new();
        for provider in providers {
            registry.register(provider.as_ref());
        }
        info!("Registered tools from {} provider(s)", providers.len());
        registry
    }

    /// Register every tool of a provider. Returns how many tools it contributed.
    pub fn register(&mut self, provider: &dyn ToolProvider) -> usize {
        let namespace = provider.namespace();
        let definitions = provider.tools();
        let count = definitions.len();

        for definition in definitions {
            let key = normalize(&format!("{}_{}", namespace, definition.signature.name));
            self.insert(key, definition);
        }

        debug!("Provider '{}' contributed {} tool(s)", namespace, count);
        count
    }

    fn insert(&mut self, key: String, definition: ToolDefinition) {
        match self.index.get(&key) {
            Some(&slot) => {
                debug!("Replacing previously registered tool '{}'", key);
                self.tools[slot].definition = definition;
            }
            None => {
                self.index.insert(key.clone(), self.tools.len());
                self.tools.push(RegisteredTool { key, definition });
            }
        }
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(&normalize(name)).map(|&slot| &self.tools[slot])
    }

    /// All `(key, signature)` pairs in registration order
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &ToolSignature)> + '_ {
        self.tools.iter().map(|t| (t.key.as_str(), t.signature()))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

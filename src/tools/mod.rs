//! Tool providers and the tool registry
//!
//! A provider contributes a static table of tools, each one a signature
//! (name, description, typed parameters) paired with the closure that
//! runs it. Providers are registered once at startup; the registry is
//! read-only while the server is serving.

mod args;
mod registry;

pub mod calculator;
pub mod crypto;
pub mod string;
pub mod system_log;
pub mod time;
pub mod user;

pub use args::{ArgValue, ToolArgs};
pub(crate) use args::json_kind;
pub use registry::{normalize, RegisteredTool, ToolRegistry};

use crate::config::UserConfig;
use crate::types::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Primitive parameter types a tool can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Long,
    Double,
    Boolean,
    String,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub ty: PrimitiveType,
    pub description: String,
}

/// Name, description and ordered parameters of a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSignature {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolSignature {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter. Declaration order is argument order.
    pub fn param(
        mut self,
        name: impl Into<String>,
        ty: PrimitiveType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParamSpec {
            name: name.into(),
            ty,
            description: description.into(),
        });
        self
    }

    /// Attach the function that runs this tool
    pub fn handler<F>(self, handler: F) -> ToolDefinition
    where
        F: Fn(&ToolArgs<'_>) -> Result<String> + Send + Sync + 'static,
    {
        ToolDefinition {
            signature: self,
            handler: Arc::new(handler),
        }
    }
}

/// Invocation function of a tool. Returns the display text of the result.
pub type ToolHandler = Arc<dyn Fn(&ToolArgs<'_>) -> Result<String> + Send + Sync>;

#[derive(Clone)]
pub struct ToolDefinition {
    pub signature: ToolSignature,
    handler: ToolHandler,
}

impl ToolDefinition {
    pub fn invoke(&self, args: &ToolArgs<'_>) -> Result<String> {
        (self.handler)(args)
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A collaborator that supplies tools to the registry
pub trait ToolProvider: Send + Sync {
    /// Prefix of every registry key this provider contributes
    fn namespace(&self) -> &str;

    fn tools(&self) -> Vec<ToolDefinition>;
}

/// Names accepted in `providers.enabled`, in registration order
pub const BUILTIN_PROVIDERS: &[&str] = &["calculator", "string", "time", "user", "crypto", "systemlog"];

/// Build the enabled built-in providers in their fixed registration order
pub fn builtin_providers(config: &UserConfig) -> Result<Vec<Box<dyn ToolProvider>>> {
    let mut providers: Vec<Box<dyn ToolProvider>> = Vec::new();

    for name in BUILTIN_PROVIDERS {
        if !config.providers.is_enabled(name) {
            info!("Provider '{}' disabled by configuration", name);
            continue;
        }

        match *name {
            "calculator" => providers.push(Box::new(calculator::CalculatorTools)),
            "string" => providers.push(Box::new(string::StringTools)),
            "time" => providers.push(Box::new(time::TimeTools)),
            "user" => providers.push(Box::new(user::UserTools::new())),
            "crypto" => providers.push(Box::new(crypto::CryptoTools)),
            "systemlog" => match &config.system_log.database {
                Some(path) => providers.push(Box::new(system_log::SystemLogTools::open(path)?)),
                None => warn!("No system_log.database configured, skipping systemlog tools"),
            },
            _ => {}
        }
    }

    Ok(providers)
}

/// Resolve `tool` on `provider` and run it with raw JSON arguments
#[cfg(test)]
pub(crate) fn call(provider: &dyn ToolProvider, tool: &str, arguments: serde_json::Value) -> Result<String> {
    let definition = provider
        .tools()
        .into_iter()
        .find(|d| d.signature.name == tool)
        .ok_or_else(|| crate::types::ToolError::UnknownTool(tool.to_string()))?;

    let raw = match arguments {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    let values = crate::mcp::coerce::coerce_arguments(&definition.signature, &raw)?;
    definition.invoke(&ToolArgs::new(&definition.signature, values))
}

//! Built-in defaults

use crate::config::user_config::ServerSettings;

pub const DEFAULT_SERVER_NAME: &str = "toolmcp";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Prefix of the text of every tool-level error result
pub const DEFAULT_ERROR_PREFIX: &str = "错误: ";

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
        }
    }
}

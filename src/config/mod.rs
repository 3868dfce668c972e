//! Configuration system for toolmcp
//!
//! Configuration is read from the first TOML file found in:
//! 1. An explicit `--config` path
//! 2. Project config (`./.toolmcp.toml`)
//! 3. `$TOOLMCP_CONFIG`
//! 4. User-global config (`~/.config/toolmcp/config.toml`)
//!
//! Anything not set falls back to the built-in defaults.

mod defaults;
mod loader;
mod user_config;

pub use defaults::{DEFAULT_ERROR_PREFIX, DEFAULT_PROTOCOL_VERSION, DEFAULT_SERVER_NAME};
pub use loader::ConfigLoader;
pub use user_config::{ProviderSettings, ServerSettings, SystemLogSettings, UserConfig};

//! User configuration file parsing

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub server: ServerSettings,
    pub providers: ProviderSettings,
    pub system_log: SystemLogSettings,
}

/// Identity reported by `initialize`, and the tool error text prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub error_prefix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Providers to register; `None` registers every built-in provider
    pub enabled: Option<Vec<String>>,
}

impl ProviderSettings {
    pub fn is_enabled(&self, name: &str) -> bool {
        match &self.enabled {
            Some(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name)),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemLogSettings {
    /// SQLite database holding the `system_issue_log` table
    pub database: Option<PathBuf>,
}

//! Configuration loader
//!
//! Search order (first existing file wins):
//! 1. Explicit path (`--config`), which must exist
//! 2. ./.toolmcp.toml (project-specific)
//! 3. $TOOLMCP_CONFIG (environment variable)
//! 4. ~/.config/toolmcp/config.toml (user-global)

use crate::config::UserConfig;
use crate::types::ToolError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ConfigLoader {
    config: UserConfig,
    source: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(explicit: Option<&Path>) -> Result<Self, ToolError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ToolError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from(path);
        }

        for path in Self::candidates() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self {
            config: UserConfig::default(),
            source: None,
        })
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".toolmcp.toml"));
        }

        if let Ok(config_path) = std::env::var("TOOLMCP_CONFIG") {
            candidates.push(PathBuf::from(config_path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("toolmcp").join("config.toml"));
        }

        candidates
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ToolError> {
        debug!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| ToolError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn parse(content: &str) -> Result<UserConfig, ToolError> {
        toml::from_str(content)
            .map_err(|e| ToolError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn into_config(self) -> UserConfig {
        self.config
    }

    /// File the configuration came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

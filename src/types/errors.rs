use thiserror::Error;

use crate::tools::PrimitiveType;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Argument '{param}' must be {expected}, got {found}")]
    ArgumentType {
        param: String,
        expected: PrimitiveType,
        found: &'static str,
    },

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("{0}")]
    Invocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;

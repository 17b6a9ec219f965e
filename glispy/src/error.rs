// Top-level error type for string-in, value-out entry points

use crate::config::ConfigError;
use crate::parser::ParseError;
use crate::runtime::error::RuntimeError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GlispyError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load prelude '{}': {message}", .path.display())]
    Prelude { path: PathBuf, message: String },
}

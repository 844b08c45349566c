/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the config module

use thiserror::Error;

/// Errors raised while loading an evaluation configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

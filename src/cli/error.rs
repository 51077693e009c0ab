//! CLI error type

use crate::config::ConfigError;
use crate::error::RetroError;
use crate::query::QueryError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to serialize output: {0}")]
    SerializationError(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Retro(#[from] RetroError),
}

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        CliError::Retro(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError(err.to_string())
    }
}

//! Crate-wide error type

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::inventory::InventoryError;
use crate::query::{QueryError, Tool};
use crate::runner::RunError;
use crate::tables::TableError;

/// Any failure between a request and a decoded frame
#[derive(Debug, thiserror::Error)]
pub enum RetroError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} output is plain text and cannot be decoded into a frame")]
    NotTabular(Tool),
    #[error("No field dictionary loaded for {0}")]
    MissingDictionary(Tool),
}

//! Retro Query - typed access to Retrosheet event files
//!
//! Provides:
//! - Query compilation for the bevent/bgame/box tools (columns, dates, franchises)
//! - Typed decoding of their delimited output
//! - Static lookup tables (field dictionaries, franchise history, player bios)
//! - A process layer and session API tying them together
//! - Named frames with game-date and player-name joins

pub mod config;
pub mod decode;
pub mod error;
pub mod frame;
pub mod inventory;
pub mod query;
pub mod runner;
pub mod session;
pub mod tables;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, RetroConfig, RetroConfigBuilder};
pub use decode::{DecodeError, FieldValue, OutputDecoder, TypedRow, decode};
pub use error::RetroError;
pub use frame::Frame;
pub use inventory::{Inventory, InventoryError, scan_bounds};
pub use query::{
    ColumnSelection, CompiledColumns, DateQuery, DayMonth, GameId, Query, QueryCompiler,
    QueryError, QueryPlan, QueryRequest, Tool, YearBounds,
};
pub use runner::{ProcessRunner, RunError, ToolRunner};
pub use session::RetroSession;
pub use tables::{BioTable, FieldDictionary, FranchiseTable, TableError, Tables};

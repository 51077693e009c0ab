//! Query compiler
//!
//! Builds the argument lists for Retrosheet's bevent, bgame and box tools:
//! - **Column set compilation** - validation and `-f` range compression
//! - **Date/identity resolution** - `-y`, `-s`, `-e`, `-i`
//! - **Franchise resolution** - the event file extension for a team and season
//! - **Composition** - one argument list per season
//!
//! ## Example
//!
//! ```
//! use retro_query::query::{ColumnSelection, QueryCompiler, QueryRequest, YearBounds};
//! use retro_query::tables::{FranchiseTable, Tables};
//!
//! let franchises = FranchiseTable::from_json(
//!     r#"{"ATL": [[1966, 2023, "NL", "Atlanta Braves", ".EVN"]]}"#,
//! )?;
//! let tables = Tables::with_franchises(franchises);
//! let compiler = QueryCompiler::new(&tables, YearBounds::new(1918, 2023));
//!
//! let request = QueryRequest::bevent("ATL", 2019).columns(ColumnSelection::new([0, 1, 2, 5]));
//! let plan = compiler.compile(&request)?;
//! assert_eq!(plan.queries[0].to_string(), "bevent -y 2019 -f 0-2,5 2019ATL.EVN");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod columns;
mod compiler;
mod dates;
mod error;
mod franchise;
mod tool;

pub use columns::{
    ColumnSelection, CompiledColumns, LinkedColumnMetadata, compile as compile_columns,
    compress_range,
};
pub use compiler::{Query, QueryCompiler, QueryPlan, QueryRequest};
pub use dates::{DateQuery, DateResolver, DayMonth, FIRST_SEASON, GameId, GameSequence, YearBounds};
pub use error::QueryError;
pub use franchise::FranchiseResolver;
pub use tool::{BGAME_DATE_COLUMN, BGAME_TIME_COLUMN, BGAME_TIMESTAMP_COLUMN, Tool};

//! Error types for query compilation

use thiserror::Error;

use super::tool::Tool;

/// Errors raised while turning caller input into tool argument lists
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Empty or out-of-range column selection
    #[error("Invalid column selection for {tool}: {reason}")]
    InvalidColumnSet { tool: Tool, reason: String },

    /// Start bound falls after the end bound
    #[error("Invalid date range for {year}: start {start} is after end {end}")]
    InvalidDateRange {
        year: i32,
        start: String,
        end: String,
    },

    /// A start/end bound that is not a calendar day
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Season outside the years with event data
    #[error("Invalid year {year}: seasons run {first} through {last}")]
    InvalidYear { year: i32, first: i32, last: i32 },

    /// First season of a range after its last season
    #[error("Invalid season range: {first} is after {last}")]
    InvalidSeasonRange { first: i32, last: i32 },

    /// Malformed game id, unknown team, or bad game-sequence digit
    #[error("Invalid game identifier '{id}': {reason}")]
    InvalidGameIdentifier { id: String, reason: String },

    /// Team code absent from the franchise table
    #[error("Unknown team '{team}': not present in the franchise table ({known} teams known)")]
    UnknownTeam { team: String, known: usize },

    /// No franchise segment of the team covers the year
    #[error("{team} did not play during the {year} season (active: {active})")]
    TeamInactiveForYear {
        team: String,
        year: i32,
        active: String,
    },

    /// Every season of a range was skipped as inactive
    #[error("{team} played no seasons between {first} and {last}")]
    NoActiveSeasons { team: String, first: i32, last: i32 },
}

//! The Retrosheet tools a query can target

use serde::{Deserialize, Serialize};

/// bgame column holding the game date.
pub const BGAME_DATE_COLUMN: u16 = 1;

/// bgame column holding the game start time, reported without its date.
pub const BGAME_TIME_COLUMN: u16 = 4;

/// bgame column reporting an already formatted timestamp.
pub const BGAME_TIMESTAMP_COLUMN: u16 = 22;

/// External query tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Per-play fields (pitch sequences, base state, fielders)
    Bevent,
    /// Per-game summary fields (start time, weather, lineups)
    Bgame,
    /// Human-readable box score, no column selection
    Box,
}

impl Tool {
    /// Executable name passed as the first argument
    pub fn program(&self) -> &'static str {
        match self {
            Tool::Bevent => "bevent",
            Tool::Bgame => "bgame",
            Tool::Box => "box",
        }
    }

    /// Highest valid column index, or `None` when the tool takes no `-f` argument
    pub fn max_column(&self) -> Option<u16> {
        match self {
            Tool::Bevent => Some(96),
            Tool::Bgame => Some(84),
            Tool::Box => None,
        }
    }

    /// The tool's own spelling of "every column"
    pub fn all_columns_shorthand(&self) -> Option<&'static str> {
        match self {
            Tool::Bevent => Some("0-96"),
            Tool::Bgame => Some("0-84"),
            Tool::Box => None,
        }
    }

    /// `(date, time)` column pair that must be decoded together
    pub fn linked_columns(&self) -> Option<(u16, u16)> {
        match self {
            Tool::Bgame => Some((BGAME_DATE_COLUMN, BGAME_TIME_COLUMN)),
            Tool::Bevent | Tool::Box => None,
        }
    }

    /// Whether output from this tool decodes into rows
    pub fn is_tabular(&self) -> bool {
        self.max_column().is_some()
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bevent" => Ok(Tool::Bevent),
            "bgame" => Ok(Tool::Bgame),
            "box" => Ok(Tool::Box),
            other => Err(format!(
                "Unknown tool: {}. Valid options: bevent, bgame, box",
                other
            )),
        }
    }
}

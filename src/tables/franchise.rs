//! Historical franchise records
//!
//! `team_extensions.json` maps a team code to one or two segments, each an
//! array `[first_year, last_year, league, full_name, file_extension]`. A
//! second segment appears when the franchise relocated or was renamed under
//! the same code.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{TableError, read_table};

/// One historical identity of a team code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseSegment {
    pub first_year: i32,
    pub last_year: i32,
    pub league: String,
    pub name: String,
    /// Event file extension, e.g. `.EVN`
    pub extension: String,
}

impl FranchiseSegment {
    pub fn contains(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }
}

impl std::fmt::Display for FranchiseSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first_year, self.last_year)
    }
}

/// The ordered segments of one team code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FranchiseHistory {
    Single(FranchiseSegment),
    Relocated(FranchiseSegment, FranchiseSegment),
}

impl FranchiseHistory {
    /// Build a history, enforcing 1-2 non-overlapping segments
    pub fn from_segments(
        team: &str,
        segments: Vec<FranchiseSegment>,
    ) -> Result<Self, TableError> {
        for segment in &segments {
            if segment.first_year > segment.last_year {
                return Err(TableError::InvalidSegments {
                    team: team.to_string(),
                    reason: format!("segment {} runs backwards", segment),
                });
            }
        }

        let count = segments.len();
        let mut iter = segments.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(only), None, None) => Ok(FranchiseHistory::Single(only)),
            (Some(first), Some(second), None) => {
                if first.last_year >= second.first_year && second.last_year >= first.first_year {
                    return Err(TableError::InvalidSegments {
                        team: team.to_string(),
                        reason: format!("segments {} and {} overlap", first, second),
                    });
                }
                Ok(FranchiseHistory::Relocated(first, second))
            }
            _ => Err(TableError::SegmentCount {
                team: team.to_string(),
                count,
            }),
        }
    }

    /// Segments in table order
    pub fn segments(&self) -> Vec<&FranchiseSegment> {
        match self {
            FranchiseHistory::Single(only) => vec![only],
            FranchiseHistory::Relocated(first, second) => vec![first, second],
        }
    }

    /// The segment whose inclusive year range contains `year`
    pub fn segment_for(&self, year: i32) -> Option<&FranchiseSegment> {
        self.segments().into_iter().find(|s| s.contains(year))
    }

    /// Human-readable active years, e.g. `1966-2023, 1876-1900`
    pub fn active_years(&self) -> String {
        self.segments()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

type RawSegment = (i32, i32, String, String, String);

/// Team code -> franchise history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FranchiseTable {
    teams: BTreeMap<String, FranchiseHistory>,
}

impl FranchiseTable {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, Vec<RawSegment>> = serde_json::from_str(json)?;
        let mut teams = BTreeMap::new();

        for (team, segments) in raw {
            let segments = segments
                .into_iter()
                .map(|(first_year, last_year, league, name, extension)| FranchiseSegment {
                    first_year,
                    last_year,
                    league,
                    name,
                    extension,
                })
                .collect();
            let code = team.to_uppercase();
            let history = FranchiseHistory::from_segments(&code, segments)?;
            teams.insert(code, history);
        }

        Ok(Self { teams })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_json(&read_table(path)?)
    }

    pub fn insert(&mut self, team: &str, history: FranchiseHistory) {
        self.teams.insert(team.to_uppercase(), history);
    }

    pub fn contains(&self, team: &str) -> bool {
        self.teams.contains_key(team)
    }

    pub fn history(&self, team: &str) -> Option<&FranchiseHistory> {
        self.teams.get(team)
    }

    /// Known team codes, sorted
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

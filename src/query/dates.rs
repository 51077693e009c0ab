//! Date range and game id resolution
//!
//! Produces the `-y`, `-s`, `-e` and `-i` arguments of a query. A game id
//! and a start/end bound are mutually exclusive; when both are given the id
//! wins and the bounds are dropped; the query compiler warns once per request.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tables::FranchiseTable;

use super::error::QueryError;

/// No major league games were played before this season.
pub const FIRST_SEASON: i32 = 1876;

static GAME_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z0-9]{3})(\d{4})(\d{2})(\d{2})(\d)$").unwrap());

/// Seasons with event data on hand
///
/// `first` is the earliest season found in the inventory and serves as the
/// default start of a season range. Validation always accepts every season
/// from [`FIRST_SEASON`] through `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBounds {
    pub first: i32,
    pub last: i32,
}

impl YearBounds {
    pub fn new(first: i32, last: i32) -> Self {
        Self {
            first: first.max(FIRST_SEASON),
            last,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (FIRST_SEASON..=self.last).contains(&year)
    }

    pub fn check(&self, year: i32) -> Result<(), QueryError> {
        if self.contains(year) {
            Ok(())
        } else {
            Err(QueryError::InvalidYear {
                year,
                first: FIRST_SEASON,
                last: self.last,
            })
        }
    }
}

/// A month/day bound, applied to whichever season is being queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayMonth {
    month: u32,
    day: u32,
}

impl DayMonth {
    pub fn new(month: u32, day: u32) -> Result<Self, QueryError> {
        // 2000 is a leap year, so Feb 29 passes here and is checked per season later.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(QueryError::InvalidDate {
                value: format!("{:02}{:02}", month, day),
                reason: "month must be 01-12 and day must exist in that month".to_string(),
            });
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The bound as a date in `year`
    pub fn in_year(&self, year: i32) -> Result<NaiveDate, QueryError> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).ok_or_else(|| {
            QueryError::InvalidDate {
                value: self.mmdd(),
                reason: format!("not a day of the {} season", year),
            }
        })
    }

    /// Zero-padded `MMDD` as the tools expect
    pub fn mmdd(&self) -> String {
        format!("{:02}{:02}", self.month, self.day)
    }
}

impl From<NaiveDate> for DayMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl std::fmt::Display for DayMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mmdd())
    }
}

impl std::str::FromStr for DayMonth {
    type Err = QueryError;

    /// Accepts `MMDD`, `MDD` (a leading zero lost to integer formatting),
    /// `MM-DD`, `MM/DD`, or a full `YYYY-MM-DD` date whose year is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = |reason: &str| QueryError::InvalidDate {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date.into());
        }

        if let Some((month, day)) = value.split_once(['-', '/']) {
            let month = month.parse().map_err(|_| invalid("month is not a number"))?;
            let day = day.parse().map_err(|_| invalid("day is not a number"))?;
            return Self::new(month, day);
        }

        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected MMDD, MM-DD, MM/DD or YYYY-MM-DD"));
        }

        let (month, day) = match value.len() {
            3 => value.split_at(1),
            4 => value.split_at(2),
            _ => return Err(invalid("expected MMDD, MM-DD, MM/DD or YYYY-MM-DD")),
        };
        let month = month.parse().map_err(|_| invalid("month is not a number"))?;
        let day = day.parse().map_err(|_| invalid("day is not a number"))?;
        Self::new(month, day)
    }
}

/// Position of a game within its calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameSequence {
    /// Only game of the day (`0`)
    Single,
    /// First game of a double-header (`1`)
    FirstOfDoubleHeader,
    /// Second game of a double-header (`2`)
    SecondOfDoubleHeader,
}

impl GameSequence {
    pub fn digit(&self) -> char {
        match self {
            GameSequence::Single => '0',
            GameSequence::FirstOfDoubleHeader => '1',
            GameSequence::SecondOfDoubleHeader => '2',
        }
    }
}

/// A validated game identifier, e.g. `ATL201904150`
///
/// Layout: 3-character home team code, 4-digit year, 2-digit month,
/// 2-digit day, 1-digit game sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameId {
    id: String,
    team: String,
    date: NaiveDate,
    sequence: GameSequence,
}

impl GameId {
    /// Check the id's shape, calendar date and sequence digit
    ///
    /// Team existence and season bounds need the lookup tables; see
    /// [`DateResolver::game_id`].
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let id = raw.trim().to_uppercase();
        let invalid = |reason: String| QueryError::InvalidGameIdentifier {
            id: id.clone(),
            reason,
        };

        let caps = GAME_ID_REGEX.captures(&id).ok_or_else(|| {
            invalid(
                "expected 3-character team code, 4-digit year, 2-digit month, \
                 2-digit day and 1-digit game sequence (e.g. ATL201904150)"
                    .to_string(),
            )
        })?;

        let year: i32 = caps[2].parse().map_err(|_| invalid("bad year".to_string()))?;
        let month: u32 = caps[3].parse().map_err(|_| invalid("bad month".to_string()))?;
        let day: u32 = caps[4].parse().map_err(|_| invalid("bad day".to_string()))?;

        let sequence = match &caps[5] {
            "0" => GameSequence::Single,
            "1" => GameSequence::FirstOfDoubleHeader,
            "2" => GameSequence::SecondOfDoubleHeader,
            other => {
                return Err(invalid(format!(
                    "game sequence must be 0, 1 or 2, {} entered",
                    other
                )));
            }
        };

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            invalid(format!("{}-{:02}-{:02} is not a calendar date", year, month, day))
        })?;

        Ok(Self {
            team: caps[1].to_string(),
            id: id.clone(),
            date,
            sequence,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn season(&self) -> i32 {
        self.date.year()
    }

    /// Calendar date the game was played
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> GameSequence {
        self.sequence
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Date selection for a query: optional bounds, or a single game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateQuery {
    pub start: Option<DayMonth>,
    pub end: Option<DayMonth>,
    pub game_id: Option<String>,
}

impl DateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: DayMonth) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DayMonth) -> Self {
        self.end = Some(end);
        self
    }

    pub fn game_id(mut self, id: impl Into<String>) -> Self {
        self.game_id = Some(id.into());
        self
    }

    /// Whether an id and a bound were both supplied
    pub fn has_conflict(&self) -> bool {
        self.game_id.is_some() && (self.start.is_some() || self.end.is_some())
    }
}

/// Resolves a season plus [`DateQuery`] into tool arguments
pub struct DateResolver<'a> {
    bounds: YearBounds,
    franchises: &'a FranchiseTable,
}

impl<'a> DateResolver<'a> {
    pub fn new(bounds: YearBounds, franchises: &'a FranchiseTable) -> Self {
        Self { bounds, franchises }
    }

    /// Parse and fully validate a game id
    pub fn game_id(&self, raw: &str) -> Result<GameId, QueryError> {
        let id = GameId::parse(raw)?;

        if !self.franchises.contains(id.team()) {
            return Err(QueryError::InvalidGameIdentifier {
                id: id.to_string(),
                reason: format!(
                    "first three characters '{}' are not a known team code",
                    id.team()
                ),
            });
        }

        if !self.bounds.contains(id.season()) {
            return Err(QueryError::InvalidGameIdentifier {
                id: id.to_string(),
                reason: format!(
                    "season {} outside {} through {}",
                    id.season(),
                    FIRST_SEASON,
                    self.bounds.last
                ),
            });
        }

        Ok(id)
    }

    /// `["-y", year]` plus `-s`/`-e` bounds, or `["-y", season, "-i", id]`
    ///
    /// A game id takes precedence; start/end are ignored when both are set.
    pub fn resolve(&self, year: i32, query: &DateQuery) -> Result<Vec<String>, QueryError> {
        self.bounds.check(year)?;

        if let Some(raw) = &query.game_id {
            let id = self.game_id(raw)?;
            return Ok(vec![
                "-y".to_string(),
                id.season().to_string(),
                "-i".to_string(),
                id.to_string(),
            ]);
        }

        let start = query.start.map(|s| s.in_year(year)).transpose()?;
        let end = query.end.map(|e| e.in_year(year)).transpose()?;

        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(QueryError::InvalidDateRange {
                year,
                start: start.format("%m%d").to_string(),
                end: end.format("%m%d").to_string(),
            });
        }

        let mut args = vec!["-y".to_string(), year.to_string()];
        if let Some(start) = query.start {
            args.push("-s".to_string());
            args.push(start.mmdd());
        }
        if let Some(end) = query.end {
            args.push("-e".to_string());
            args.push(end.mmdd());
        }
        Ok(args)
    }
}

//! Command arguments and handlers

pub mod box_score;
pub mod query;

use clap::{Args, ValueEnum};

/// Output format for tabular commands
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Inclusive season range given as `2019` or `2019-2021`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeasonRange {
    pub first: i32,
    pub last: i32,
}

/// Parse a `--years` value
pub fn parse_seasons(value: &str) -> Result<SeasonRange, String> {
    let year = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|_| format!("'{}' is not a year", s.trim()))
    };

    let (first, last) = match value.split_once('-') {
        Some((first, last)) => (year(first)?, year(last)?),
        None => {
            let season = year(value)?;
            (season, season)
        }
    };
    if first > last {
        return Err(format!("season range {}-{} is reversed", first, last));
    }
    Ok(SeasonRange { first, last })
}

/// Arguments shared by bevent and bgame
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Three-letter team code, e.g. ATL
    #[arg(long, short = 't')]
    pub team: String,

    /// Season or inclusive range, e.g. 2019 or 2019-2021
    #[arg(long, short = 'y', value_parser = parse_seasons)]
    pub years: SeasonRange,

    /// Column list in range notation, e.g. 0-2,5; defaults to the tool's standard set
    #[arg(long, short = 'f')]
    pub columns: Option<String>,

    /// First month/day to include (MMDD, M-D or YYYY-MM-DD)
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Last month/day to include
    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Restrict to one game; overrides --start/--end
    #[arg(long, short = 'i')]
    pub id: Option<String>,

    /// Add a date column after this game id column
    #[arg(long, value_name = "COLUMN")]
    pub game_dates: Option<String>,

    /// Add player name columns after these player id columns
    #[arg(long, value_name = "COLUMN")]
    pub names: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for box
#[derive(Args, Debug, Clone)]
pub struct BoxArgs {
    /// Game id, e.g. ATL201904150; team and season default to the id's
    #[arg(long, short = 'i')]
    pub id: Option<String>,

    #[arg(long, short = 't')]
    pub team: Option<String>,

    #[arg(long, short = 'y', value_parser = parse_seasons)]
    pub years: Option<SeasonRange>,

    #[arg(long, short = 's')]
    pub start: Option<String>,

    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Print the tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,
}

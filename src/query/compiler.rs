//! Query compilation: one argument list per requested season
//!
//! Every list has the shape
//! `[tool, "-y", year, ("-s", MMDD)?, ("-e", MMDD)?, ("-i", id)?, "-f", range, "<year><team><ext>"]`,
//! with the `-f` pair omitted for box.

use tracing::{debug, warn};

use crate::tables::Tables;

use super::columns::{ColumnSelection, CompiledColumns, compile};
use super::dates::{DateQuery, DateResolver, DayMonth, YearBounds};
use super::error::QueryError;
use super::franchise::FranchiseResolver;
use super::tool::Tool;

/// What a caller wants queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub tool: Tool,
    pub team: String,
    pub first_season: i32,
    pub last_season: i32,
    /// `None` selects the tool's default columns
    pub columns: Option<ColumnSelection>,
    pub dates: DateQuery,
}

impl QueryRequest {
    pub fn new(tool: Tool, team: &str, season: i32) -> Self {
        Self {
            tool,
            team: team.trim().to_uppercase(),
            first_season: season,
            last_season: season,
            columns: None,
            dates: DateQuery::default(),
        }
    }

    pub fn bevent(team: &str, season: i32) -> Self {
        Self::new(Tool::Bevent, team, season)
    }

    pub fn bgame(team: &str, season: i32) -> Self {
        Self::new(Tool::Bgame, team, season)
    }

    pub fn box_score(team: &str, season: i32) -> Self {
        Self::new(Tool::Box, team, season)
    }

    /// Inclusive season range
    pub fn seasons(mut self, first: i32, last: i32) -> Self {
        self.first_season = first;
        self.last_season = last;
        self
    }

    pub fn columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn start(mut self, start: DayMonth) -> Self {
        self.dates.start = Some(start);
        self
    }

    pub fn end(mut self, end: DayMonth) -> Self {
        self.dates.end = Some(end);
        self
    }

    pub fn game_id(mut self, id: impl Into<String>) -> Self {
        self.dates.game_id = Some(id.into());
        self
    }
}

/// One fully formed tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub tool: Tool,
    pub season: i32,
    /// Full argument list, tool name first
    pub arguments: Vec<String>,
}

impl Query {
    pub fn program(&self) -> &str {
        self.tool.program()
    }

    /// Arguments after the tool name
    pub fn args(&self) -> &[String] {
        &self.arguments[1..]
    }

    /// Event file the query reads, e.g. `2019ATL.EVN`
    pub fn event_file(&self) -> &str {
        self.arguments.last().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.arguments.join(" "))
    }
}

/// Compiled queries plus the column metadata their output decodes against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub tool: Tool,
    pub queries: Vec<Query>,
    /// `None` for box
    pub columns: Option<CompiledColumns>,
}

/// Composes column, date and franchise resolution
pub struct QueryCompiler<'a> {
    tables: &'a Tables,
    bounds: YearBounds,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(tables: &'a Tables, bounds: YearBounds) -> Self {
        Self { tables, bounds }
    }

    /// Column metadata for a request, applying the tool's defaults when unset
    pub fn compile_columns(
        &self,
        request: &QueryRequest,
    ) -> Result<Option<CompiledColumns>, QueryError> {
        if !request.tool.is_tabular() {
            return Ok(None);
        }

        let compiled = match &request.columns {
            Some(selection) => compile(selection, request.tool)?,
            None => {
                let defaults = self
                    .tables
                    .fields(request.tool)
                    .map(|dict| dict.default_selection())
                    .unwrap_or_default();
                compile(&defaults, request.tool)?
            }
        };
        Ok(Some(compiled))
    }

    /// Build one query per season of the request
    ///
    /// Seasons the team did not play are skipped with a warning; any other
    /// failure aborts the whole plan.
    pub fn compile(&self, request: &QueryRequest) -> Result<QueryPlan, QueryError> {
        if request.first_season > request.last_season {
            return Err(QueryError::InvalidSeasonRange {
                first: request.first_season,
                last: request.last_season,
            });
        }

        let franchises = FranchiseResolver::new(&self.tables.franchises);
        franchises.check_team(&request.team)?;

        let columns = self.compile_columns(request)?;
        let column_args = columns.as_ref().map(CompiledColumns::args).unwrap_or_default();
        let dates = DateResolver::new(self.bounds, &self.tables.franchises);
        if let Some(id) = &request.dates.game_id
            && request.dates.has_conflict()
        {
            warn!(
                "Game id and start/end are mutually exclusive; using game id {} and ignoring start/end",
                id
            );
        }

        let mut queries = Vec::new();
        for season in request.first_season..=request.last_season {
            let date_args = dates.resolve(season, &request.dates)?;

            let extension = match franchises.resolve(&request.team, season) {
                Ok(extension) => extension,
                Err(err @ QueryError::TeamInactiveForYear { .. }) => {
                    warn!("Skipping season {}: {}", season, err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut arguments = Vec::with_capacity(date_args.len() + column_args.len() + 2);
            arguments.push(request.tool.program().to_string());
            arguments.extend(date_args);
            arguments.extend(column_args.iter().cloned());
            arguments.push(format!("{}{}{}", season, request.team, extension));

            let query = Query {
                tool: request.tool,
                season,
                arguments,
            };
            debug!("Compiled query: {}", query);
            queries.push(query);
        }

        if queries.is_empty() {
            return Err(QueryError::NoActiveSeasons {
                team: request.team.clone(),
                first: request.first_season,
                last: request.last_season,
            });
        }

        Ok(QueryPlan {
            tool: request.tool,
            queries,
            columns,
        })
    }
}

//! End-to-end queries: compile, run, decode, name
//!
//! A [`RetroSession`] owns the loaded tables, the season bounds and a
//! [`ToolRunner`]. Everything it needs is fixed at construction, so one
//! session serves any number of requests.

use tracing::{debug, info};

use crate::config::RetroConfig;
use crate::decode::{DecodeError, OutputDecoder};
use crate::error::RetroError;
use crate::frame::Frame;
use crate::query::{
    ColumnSelection, DayMonth, QueryCompiler, QueryPlan, QueryRequest, Tool, YearBounds,
};
use crate::runner::{ProcessRunner, ToolRunner};
use crate::tables::Tables;

pub struct RetroSession<R: ToolRunner> {
    tables: Tables,
    bounds: YearBounds,
    runner: R,
}

impl RetroSession<ProcessRunner> {
    /// Load tables and bounds from `config` and run the real executables
    pub fn open(config: &RetroConfig) -> Result<Self, RetroError> {
        let mut runner = ProcessRunner::new(&config.events_dir);
        if let Some(bin_dir) = &config.bin_dir {
            runner = runner.with_bin_dir(bin_dir);
        }
        let tables = Tables::load(&config.tables_dir)?;
        let bounds = config.resolve_year_bounds()?;
        info!(
            "Session over {} with seasons {}-{}",
            config.events_dir.display(),
            bounds.first,
            bounds.last
        );
        Ok(Self::new(tables, bounds, runner))
    }
}

impl<R: ToolRunner> RetroSession<R> {
    pub fn new(tables: Tables, bounds: YearBounds, runner: R) -> Self {
        Self {
            tables,
            bounds,
            runner,
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn compiler(&self) -> QueryCompiler<'_> {
        QueryCompiler::new(&self.tables, self.bounds)
    }

    /// Compile a request without running anything
    pub fn plan(&self, request: &QueryRequest) -> Result<QueryPlan, RetroError> {
        Ok(self.compiler().compile(request)?)
    }

    /// Raw standard output of every query in the plan, in season order
    ///
    /// Every non-empty chunk must end in a newline; a cut-off season fails
    /// the whole plan with `TruncatedOutput` instead of being decoded.
    pub fn run_plan(&self, plan: &QueryPlan) -> Result<String, RetroError> {
        let mut output = String::new();
        for query in &plan.queries {
            let chunk = self.runner.run(query)?;
            debug!("{} returned {} bytes", query.event_file(), chunk.len());
            check_complete(&chunk)?;
            output.push_str(&chunk);
        }
        Ok(output)
    }

    /// Run a bevent/bgame request and decode its output into a named frame
    pub fn query(&self, request: &QueryRequest) -> Result<Frame, RetroError> {
        if !request.tool.is_tabular() {
            return Err(RetroError::NotTabular(request.tool));
        }

        let plan = self.plan(request)?;
        let columns = plan
            .columns
            .as_ref()
            .ok_or(RetroError::NotTabular(request.tool))?;
        let dictionary = self
            .tables
            .fields(request.tool)
            .ok_or(RetroError::MissingDictionary(request.tool))?;

        let raw = self.run_plan(&plan)?;
        let rows = OutputDecoder::for_columns(columns).decode(&raw)?;
        info!(
            "{} {} {}-{}: {} rows",
            request.tool,
            request.team,
            request.first_season,
            request.last_season,
            rows.len()
        );
        Ok(Frame::from_rows(dictionary, &columns.columns, rows))
    }

    /// Event-level rows for one team and season
    pub fn bevent(
        &self,
        team: &str,
        season: i32,
        columns: Option<ColumnSelection>,
        start: Option<DayMonth>,
        end: Option<DayMonth>,
    ) -> Result<Frame, RetroError> {
        self.query(&tabular_request(Tool::Bevent, team, season, columns, start, end))
    }

    /// Game-level rows for one team and season
    pub fn bgame(
        &self,
        team: &str,
        season: i32,
        columns: Option<ColumnSelection>,
        start: Option<DayMonth>,
        end: Option<DayMonth>,
    ) -> Result<Frame, RetroError> {
        self.query(&tabular_request(Tool::Bgame, team, season, columns, start, end))
    }

    /// Box score text for one game
    pub fn box_score(&self, game_id: &str) -> Result<String, RetroError> {
        let id = crate::query::GameId::parse(game_id)?;
        let request = QueryRequest::box_score(id.team(), id.season()).game_id(id.as_str());
        self.box_scores(&request)
    }

    /// Box score text for any box request
    pub fn box_scores(&self, request: &QueryRequest) -> Result<String, RetroError> {
        let plan = self.plan(request)?;
        self.run_plan(&plan)
    }
}

fn check_complete(chunk: &str) -> Result<(), DecodeError> {
    if chunk.is_empty() || chunk.ends_with('\n') {
        return Ok(());
    }
    Err(DecodeError::TruncatedOutput {
        last_line: chunk.lines().last().unwrap_or_default().to_string(),
    })
}

fn tabular_request(
    tool: Tool,
    team: &str,
    season: i32,
    columns: Option<ColumnSelection>,
    start: Option<DayMonth>,
    end: Option<DayMonth>,
) -> QueryRequest {
    let mut request = QueryRequest::new(tool, team, season);
    request.columns = columns;
    request.dates.start = start;
    request.dates.end = end;
    request
}

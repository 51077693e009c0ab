//! bevent/bgame command implementation

use crate::cli::commands::{OutputFormat, QueryArgs};
use crate::cli::error::CliError;
use crate::cli::output::{format_json, format_plan, format_table};
use crate::config::RetroConfig;
use crate::query::{ColumnSelection, QueryRequest, Tool};
use crate::session::RetroSession;

/// Build the library request from command arguments
pub fn build_request(tool: Tool, args: &QueryArgs) -> Result<QueryRequest, CliError> {
    let mut request =
        QueryRequest::new(tool, &args.team, args.years.first).seasons(args.years.first, args.years.last);

    if let Some(columns) = &args.columns {
        request = request.columns(ColumnSelection::parse(tool, columns)?);
    }
    if let Some(start) = &args.start {
        request = request.start(start.parse()?);
    }
    if let Some(end) = &args.end {
        request = request.end(end.parse()?);
    }
    if let Some(id) = &args.id {
        request = request.game_id(id.as_str());
    }
    Ok(request)
}

/// Handle the bevent and bgame commands
pub fn handle_query(tool: Tool, args: &QueryArgs, config: &RetroConfig) -> Result<(), CliError> {
    let request = build_request(tool, args)?;
    let session = RetroSession::open(config)?;

    if args.dry_run {
        let plan = session.plan(&request)?;
        print!("{}", format_plan(&plan));
        return Ok(());
    }

    let mut frame = session.query(&request)?;
    if let Some(column) = &args.game_dates
        && !frame.insert_game_dates(column)
    {
        return Err(CliError::InvalidArgument(format!(
            "--game-dates: no column named '{}'",
            column
        )));
    }
    for column in &args.names {
        if !frame.insert_names(column, &session.tables().bio) {
            return Err(CliError::InvalidArgument(format!(
                "--names: no column named '{}'",
                column
            )));
        }
    }

    match args.format {
        OutputFormat::Table => print!("{}", format_table(&frame)),
        OutputFormat::Json => println!("{}", format_json(&frame)?),
    }
    Ok(())
}

//! box command implementation

use crate::cli::commands::BoxArgs;
use crate::cli::error::CliError;
use crate::cli::output::format_plan;
use crate::config::RetroConfig;
use crate::query::{GameId, QueryRequest};
use crate::session::RetroSession;

/// Build a box request; team and season come from the game id unless given
pub fn build_request(args: &BoxArgs) -> Result<QueryRequest, CliError> {
    let id = args.id.as_deref().map(GameId::parse).transpose()?;

    let team = match (&args.team, &id) {
        (Some(team), _) => team.clone(),
        (None, Some(id)) => id.team().to_string(),
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "box needs --id or --team".to_string(),
            ));
        }
    };
    let (first, last) = match (args.years, &id) {
        (Some(years), _) => (years.first, years.last),
        (None, Some(id)) => (id.season(), id.season()),
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "box needs --id or --years".to_string(),
            ));
        }
    };

    let mut request = QueryRequest::box_score(&team, first).seasons(first, last);
    if let Some(id) = &id {
        request = request.game_id(id.as_str());
    }
    if let Some(start) = &args.start {
        request = request.start(start.parse()?);
    }
    if let Some(end) = &args.end {
        request = request.end(end.parse()?);
    }
    Ok(request)
}

/// Handle the box command
pub fn handle_box(args: &BoxArgs, config: &RetroConfig) -> Result<(), CliError> {
    let request = build_request(args)?;
    let session = RetroSession::open(config)?;

    if args.dry_run {
        print!("{}", format_plan(&session.plan(&request)?));
        return Ok(());
    }

    print!("{}", session.box_scores(&request)?);
    Ok(())
}

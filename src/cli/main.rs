//! retro-query: run Retrosheet's bevent, bgame and box tools and print typed output

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use retro_query::RetroConfig;
use retro_query::Tool;
use retro_query::cli::CliError;
use retro_query::cli::commands::box_score::handle_box;
use retro_query::cli::commands::query::handle_query;
use retro_query::cli::commands::{BoxArgs, QueryArgs};

#[derive(Parser, Debug)]
#[command(
    name = "retro-query",
    version,
    about = "Query Retrosheet event files through bevent, bgame and box",
    disable_help_subcommand = true
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of .EVA/.EVN event files
    #[arg(long, global = true, value_name = "DIR")]
    events_dir: Option<PathBuf>,

    /// Directory of the JSON lookup tables
    #[arg(long, global = true, value_name = "DIR")]
    tables_dir: Option<PathBuf>,

    /// Directory holding the bevent/bgame/box executables
    #[arg(long, global = true, value_name = "DIR")]
    bin_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Event-level rows
    Bevent(QueryArgs),
    /// Game-level rows
    Bgame(QueryArgs),
    /// Box score text
    Box(BoxArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<RetroConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => RetroConfig::load(path)?,
        None => RetroConfig::default(),
    };
    if let Some(dir) = &cli.events_dir {
        config.events_dir = dir.clone();
    }
    if let Some(dir) = &cli.tables_dir {
        config.tables_dir = dir.clone();
    }
    if let Some(dir) = &cli.bin_dir {
        config.bin_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    match &cli.command {
        Commands::Bevent(args) => handle_query(Tool::Bevent, args, &config),
        Commands::Bgame(args) => handle_query(Tool::Bgame, args, &config),
        Commands::Box(args) => handle_box(args, &config),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    run(Cli::parse())?;
    Ok(())
}

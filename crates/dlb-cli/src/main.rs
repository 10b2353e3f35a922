//! # dlb CLI entry point
//!
//! Parses command-line arguments, opens the catalog, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dlb_cli::browse::{
    run_act, run_acts, run_chain, run_jurisdictions, run_section, ActArgs, ActsArgs, ChainArgs,
    SectionArgs,
};
use dlb_cli::search::{run_search, SearchArgs};
use dlb_cli::session::{run_session, SessionArgs};
use dlb_cli::{CliConfig, Context};

/// Digital Law Book
///
/// Browse jurisdictions, acts, and sections; search the catalog; replay
/// reader sessions with bookmarks and annotations.
#[derive(Parser, Debug)]
#[command(name = "dlb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document (YAML or JSON). Overrides the config file.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every jurisdiction with its ancestor path.
    Jurisdictions,

    /// Print the root-first ancestor chain of a jurisdiction.
    Chain(ChainArgs),

    /// List acts visible from a jurisdiction.
    Acts(ActsArgs),

    /// Show an act with its chapters and sections.
    Act(ActArgs),

    /// Show a section with its public annotations.
    Section(SectionArgs),

    /// Search section text.
    Search(SearchArgs),

    /// Replay a scripted reader session.
    Session(SessionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dlb starting");

    let ctx = match CliConfig::resolve(cli.config.as_deref(), cli.catalog.clone())
        .and_then(|config| Context::from_config(&config, cli.json))
    {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Jurisdictions => run_jurisdictions(&ctx),
        Commands::Chain(args) => run_chain(&args, &ctx),
        Commands::Acts(args) => run_acts(&args, &ctx),
        Commands::Act(args) => run_act(&args, &ctx),
        Commands::Section(args) => run_section(&args, &ctx),
        Commands::Search(args) => run_search(&args, &ctx),
        Commands::Session(args) => run_session(&args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

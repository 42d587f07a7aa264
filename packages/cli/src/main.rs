mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, check, inspect, migrate, ApplyArgs, CheckArgs, InspectArgs, MigrateArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - inspect, migrate and script page builder sessions
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./pagecraft.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log editor activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the pages of a session and outline their trees
    Inspect(InspectArgs),

    /// Rewrite a session file (legacy or current) in the current format
    Migrate(MigrateArgs),

    /// Replay a JSON list of intents against a session
    Apply(ApplyArgs),

    /// Validate every page tree and look for unknown widgets
    Check(CheckArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd, cli.config.as_deref())?;

    match cli.command {
        Command::Inspect(args) => inspect(args, &config),
        Command::Migrate(args) => migrate(args, &config),
        Command::Apply(args) => apply(args, &config),
        Command::Check(args) => check(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

use super::{read_stored, write_session};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::EditSession;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Session file to migrate
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn migrate(args: MigrateArgs, config: &Config) -> Result<()> {
    let stored = read_stored(&args.input)?;
    let legacy = stored.is_legacy();

    let session = EditSession::from_stored(stored, config.editor.clone())
        .with_context(|| format!("Cannot migrate {}", args.input.display()))?;
    write_session(&session, args.output.as_deref())?;

    if let Some(output) = &args.output {
        let from = if legacy { "legacy tree" } else { "session" };
        println!(
            "{} Migrated {} {} → {} ({} pages)",
            "✓".green(),
            from,
            args.input.display(),
            output.display(),
            session.documents().len()
        );
    }

    Ok(())
}

use super::{load_session, write_session};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Intent, IntentResult};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Session file to edit
    pub session: PathBuf,

    /// JSON array of intents
    pub intents: PathBuf,

    /// Write the result here instead of back to the session file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report outcomes without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Tally of intent outcomes
#[derive(Debug, Default)]
struct Outcomes {
    changed: usize,
    noop: usize,
    refused: usize,
}

pub fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let mut session = load_session(&args.session, &config.editor)?;

    let script = fs::read_to_string(&args.intents)
        .with_context(|| format!("Cannot read {}", args.intents.display()))?;
    let intents: Vec<Intent> = serde_json::from_str(&script)
        .with_context(|| format!("{} is not a list of intents", args.intents.display()))?;

    println!(
        "{}",
        format!("▶️  Applying {} intents...", intents.len())
            .bright_blue()
            .bold()
    );

    let mut outcomes = Outcomes::default();
    for (step, intent) in intents.into_iter().enumerate() {
        let name = intent.name();
        let result = session.dispatch(intent);
        print_outcome(step + 1, name, &result);

        match result {
            IntentResult::Applied | IntentResult::Created { .. } => outcomes.changed += 1,
            IntentResult::Noop { .. } => outcomes.noop += 1,
            IntentResult::Refused { .. } => outcomes.refused += 1,
        }
    }

    println!();
    println!(
        "{} {} applied, {} no-op, {} refused",
        if outcomes.refused == 0 {
            "✅".green()
        } else {
            "⚠️".yellow()
        },
        outcomes.changed,
        outcomes.noop,
        outcomes.refused
    );

    if args.dry_run {
        println!("{}", "(dry run, nothing written)".dimmed());
        return Ok(());
    }

    let target = args.output.as_deref().unwrap_or(args.session.as_path());
    write_session(&session, Some(target))?;
    println!("   Wrote {}", target.display());

    Ok(())
}

fn print_outcome(step: usize, name: &str, result: &IntentResult) {
    let step = format!("{:>3}.", step).dimmed();
    match result {
        IntentResult::Applied => println!("{} {} {}", step, "✓".green(), name),
        IntentResult::Created { id } => {
            println!("{} {} {} → {}", step, "✓".green(), name, id.bright_white())
        }
        IntentResult::Noop { reason } => {
            println!("{} {} {} {}", step, "·".dimmed(), name, format!("({})", reason).dimmed())
        }
        IntentResult::Refused { reason } => {
            println!("{} {} {} - {}", step, "✗".red(), name, reason.red())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{write, LEGACY_TREE};
    use pagecraft_editor::StoredSession;

    const SCRIPT: &str = r#"[
        { "type": "add_node", "kind": "component", "componentRef": "text" },
        { "type": "delete_node", "nodeId": "map" },
        { "type": "delete_node", "nodeId": "ghost" },
        { "type": "create_page", "title": "About" }
    ]"#;

    #[test]
    fn test_apply_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let session = write(dir.path(), "session.json", LEGACY_TREE);
        let intents = write(dir.path(), "intents.json", SCRIPT);

        let args = ApplyArgs {
            session: session.clone(),
            intents,
            output: None,
            dry_run: false,
        };
        apply(args, &Config::default()).unwrap();

        let content = fs::read_to_string(&session).unwrap();
        let persisted = StoredSession::from_json(&content).unwrap().into_persisted();
        assert_eq!(persisted.documents.len(), 2);

        let home = &persisted.documents[0];
        let main = &home.tree.children()[0];
        assert_eq!(main.children().len(), 2);
        assert_eq!(main.children()[0].id, "hero");
        assert_eq!(main.children()[1].component_ref.as_deref(), Some("text"));

        let about = &persisted.documents[1];
        assert_eq!(about.slug, "about");
        assert_eq!(persisted.current_document_id.as_deref(), Some(about.id.as_str()));
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let session = write(dir.path(), "session.json", LEGACY_TREE);
        let intents = write(dir.path(), "intents.json", SCRIPT);

        let args = ApplyArgs {
            session: session.clone(),
            intents,
            output: None,
            dry_run: true,
        };
        apply(args, &Config::default()).unwrap();

        assert_eq!(fs::read_to_string(&session).unwrap(), LEGACY_TREE);
    }

    #[test]
    fn test_bad_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = write(dir.path(), "session.json", LEGACY_TREE);
        let intents = write(dir.path(), "intents.json", r#"[{ "type": "explode" }]"#);

        let args = ApplyArgs {
            session,
            intents,
            output: None,
            dry_run: false,
        };
        assert!(apply(args, &Config::default()).is_err());
    }
}

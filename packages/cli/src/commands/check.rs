use super::read_stored;
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{unresolved_refs, Document, WidgetRegistry};
use pagecraft_tree::validate_tree;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Session file to check
    pub input: PathBuf,

    /// Fail on widgets missing from `knownWidgets`
    #[arg(long)]
    pub strict: bool,
}

/// Problems found on one page
#[derive(Debug, Default)]
struct PageReport {
    invalid: Option<String>,
    unknown_widgets: Vec<String>,
}

pub fn check(args: CheckArgs, config: &Config) -> Result<()> {
    let session = read_stored(&args.input)?.into_persisted();
    let registry = config.registry();

    println!("🔍 {} {}", "Checking".green().bold(), args.input.display());
    if config.known_widgets.is_empty() {
        println!("{}", "   (no knownWidgets configured, skipping widget check)".dimmed());
    }
    println!();

    let mut invalid_pages = 0;
    let mut unknown_widgets = 0;

    for page in &session.documents {
        let report = check_page(page, &registry, !config.known_widgets.is_empty());

        match &report.invalid {
            None => println!("  {} /{}", "✓".green(), page.slug),
            Some(reason) => {
                invalid_pages += 1;
                println!("  {} /{} - {}", "✗".red(), page.slug, reason.red());
            }
        }
        for widget in &report.unknown_widgets {
            unknown_widgets += 1;
            println!("      {} unknown widget {}", "⚠️".yellow(), widget.yellow());
        }
    }

    println!();
    println!("   Pages checked: {}", session.documents.len());
    if invalid_pages > 0 {
        println!("   {} {}", "Invalid pages:".red(), invalid_pages);
    }
    if unknown_widgets > 0 {
        println!("   {} {}", "Unknown widgets:".yellow(), unknown_widgets);
    }

    if invalid_pages > 0 || (args.strict && unknown_widgets > 0) {
        bail!(
            "{} invalid page(s), {} unknown widget(s)",
            invalid_pages,
            unknown_widgets
        );
    }

    Ok(())
}

fn check_page<R: WidgetRegistry>(page: &Document, registry: &R, check_widgets: bool) -> PageReport {
    PageReport {
        invalid: validate_tree(&page.tree).err().map(|e| e.to_string()),
        unknown_widgets: if check_widgets {
            unresolved_refs(&page.tree, registry)
        } else {
            Vec::new()
        },
    }
}

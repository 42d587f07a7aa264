use super::load_session;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_tree::{count_nodes, Node, NodeKind};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Session file (current or legacy format)
    pub input: PathBuf,

    /// Only list pages, without tree outlines
    #[arg(long)]
    pub pages_only: bool,
}

pub fn inspect(args: InspectArgs, config: &Config) -> Result<()> {
    let session = load_session(&args.input, &config.editor)?;

    println!(
        "📄 {} {}",
        args.input.display().to_string().bright_white(),
        format!("({} pages)", session.documents().len()).dimmed()
    );
    println!();

    for page in session.documents() {
        let marker = if session.current_document_id() == Some(page.id.as_str()) {
            "*".green().bold()
        } else {
            " ".normal()
        };

        println!(
            "{} {} {} {}",
            marker,
            page.title.bright_white().bold(),
            format!("/{}", page.slug).cyan(),
            format!("[{} nodes]", count_nodes(&page.tree)).dimmed()
        );

        if !args.pages_only {
            print!("{}", render_outline(&page.tree));
            println!();
        }
    }

    Ok(())
}

/// Indented outline of a tree, one node per line
pub fn render_outline(tree: &Node) -> String {
    let mut out = String::new();
    write_outline(tree, 1, &mut out);
    out
}

fn write_outline(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = match node.kind {
        NodeKind::Document => writeln!(out, "{}document {}", indent, node.id),
        NodeKind::Section => writeln!(out, "{}section {}", indent, node.id),
        NodeKind::Component => writeln!(
            out,
            "{}<{}> {}",
            indent,
            node.component_ref.as_deref().unwrap_or("?"),
            node.id
        ),
    };

    for child in node.children() {
        write_outline(child, depth + 1, out);
    }
}

//! Printing results to stdout.

use color_eyre::eyre::Result;
use serde::Serialize;
use thesaurus_shared::{Children, NodeId, RelatedTerm, RelationType, Term, TermTree, TermType};

/// Result output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn term(term: &Term, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(term),
        OutputFormat::Text => {
            println!("{}", term_line(term));
            if let Some(alt) = &term.alternate_name {
                println!("  alternate: {alt}");
            }
            Ok(())
        }
    }
}

pub(crate) fn terms(terms: &[Term], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(terms),
        OutputFormat::Text => {
            if terms.is_empty() {
                println!("(no terms)");
            }
            for term in terms {
                println!("{}", term_line(term));
            }
            Ok(())
        }
    }
}

pub(crate) fn related(related: &[RelatedTerm], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(related),
        OutputFormat::Text => {
            if related.is_empty() {
                println!("(no related terms)");
            }
            for entry in related {
                let tag = match entry.relation_type {
                    RelationType::Parent => "parent",
                    RelationType::Child => "child",
                    RelationType::Relative => "relative",
                };
                println!("{tag:<9} {}", term_line(&entry.term));
            }
            Ok(())
        }
    }
}

/// Entries with their expanded children, one level of indentation each.
pub(crate) fn tree(tree: &TermTree, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(tree),
        OutputFormat::Text => {
            if tree.entries().is_empty() {
                println!("(no entries)");
            }
            for &entry in tree.entries() {
                print_subtree(tree, entry, 0);
            }
            Ok(())
        }
    }
}

/// Path from the top down to the entry.
pub(crate) fn path(tree: &TermTree, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(tree),
        OutputFormat::Text => {
            let Some(&start) = tree.entries().first() else {
                println!("(no path)");
                return Ok(());
            };
            for (depth, id) in tree.ancestry(start).into_iter().rev().enumerate() {
                println!("{}{}", "  ".repeat(depth), term_line(tree.node(id).term()));
            }
            Ok(())
        }
    }
}

fn print_subtree(tree: &TermTree, id: NodeId, depth: usize) {
    let node = tree.node(id);
    let marker = match node.children() {
        Children::Deferred => "+",
        Children::Expanded(ids) if !ids.is_empty() => "-",
        _ => " ",
    };
    println!("{}{marker} {}", "  ".repeat(depth), term_line(node.term()));
    for &child in node.children().ids() {
        print_subtree(tree, child, depth + 1);
    }
}

fn term_line(term: &Term) -> String {
    let kind = match term.term_type {
        TermType::Descriptor => "descriptor",
        TermType::NodeLabel => "node label",
    };
    let name = term.name.as_deref().unwrap_or("(untranslated)");
    format!("{name}  <{}>  [{kind}]", term.id)
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

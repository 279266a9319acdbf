//! Shared types, error model, catalog vocabulary and configuration for the
//! thesaurus workspace.
//!
//! This crate is the foundation depended on by all other thesaurus crates.
//! It provides:
//! - [`ThesaurusError`], the unified error type
//! - Domain types ([`Term`], [`RelatedTerm`], [`TermTree`])
//! - Raw catalog records ([`RawRecord`], [`RawEdge`], [`ConceptGraph`]) and
//!   the [`CatalogTransport`] trait that produces them
//! - Configuration ([`AppConfig`], [`ServiceSettings`], config loading)

pub mod config;
pub mod error;
pub mod transport;
pub mod tree;
pub mod types;
pub mod vocab;
pub mod wire;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LanguageConfig, RecordFormat, SearchConfig, ServiceConfig, ServiceSettings,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, ThesaurusError};
pub use transport::CatalogTransport;
pub use tree::{Children, NodeId, TermTree, TreeNode};
pub use types::{RelatedTerm, RelationType, Term, TermType};
pub use vocab::{EntryKind, MatchMode, RelationKind};
pub use wire::{ConceptGraph, GraphObject, LocalizedString, RawEdge, RawRecord, Statement, predicates};

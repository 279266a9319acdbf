//! Reconciliation core for the thesaurus workspace.
//!
//! Turns raw catalog records into [`Term`](thesaurus_shared::Term)s, merges
//! and filters keyword searches, and builds hierarchy trees. All catalog
//! access goes through a [`CatalogTransport`](thesaurus_shared::CatalogTransport);
//! [`ThesaurusService`] is the entry point for callers.

mod catalog;
pub mod hierarchy;
pub mod matcher;
pub mod normalize;
pub mod related;
pub mod relation;
pub mod service;

#[cfg(test)]
mod testing;

pub use hierarchy::HierarchyBuilder;
pub use service::ThesaurusService;

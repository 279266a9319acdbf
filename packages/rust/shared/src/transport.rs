//! The seam between the reconciliation core and whatever talks to the
//! catalog.

use async_trait::async_trait;

use crate::error::Result;
use crate::vocab::{EntryKind, MatchMode, RelationKind};
use crate::wire::{ConceptGraph, RawEdge, RawRecord};

/// Read-only access to the remote concept catalog.
///
/// Implementations report failures as errors; callers in the core turn
/// every error into "no data" so a single bad entry never aborts a
/// multi-step expansion.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch one entry with its label in `language`. `Ok(None)` when the
    /// catalog does not know the id.
    async fn fetch_record(&self, id: &str, language: &str) -> Result<Option<RawRecord>>;

    /// Fetch the full concept graph of one entry (all languages).
    async fn fetch_graph(&self, id: &str) -> Result<Option<ConceptGraph>>;

    /// Edges of `relation` leaving `id`, without target details.
    async fn fetch_edges(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Vec<RawEdge>>;

    /// Full records of the entries reached over `relation` from `id`.
    async fn fetch_related(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Vec<RawRecord>>;

    /// Entries of `kind` that have no parent.
    async fn fetch_topmost(&self, kind: EntryKind, language: &str) -> Result<Vec<RawRecord>>;

    /// Concepts whose label matches `keyword` under `mode`.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        language: &str,
        mode: MatchMode,
    ) -> Result<Vec<RawRecord>>;
}

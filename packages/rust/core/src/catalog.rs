//! Catalog access that never fails.
//!
//! Every transport error is logged and turned into "no data", so one
//! unreachable entry cannot abort a search or a tree expansion.

use tracing::{debug, warn};

use thesaurus_shared::{
    CatalogTransport, ConceptGraph, EntryKind, MatchMode, RawEdge, RawRecord, RelationKind,
};

/// Borrowed view of a transport with errors mapped to empty results.
pub(crate) struct LenientCatalog<'a, C: ?Sized> {
    transport: &'a C,
}

impl<'a, C> LenientCatalog<'a, C>
where
    C: CatalogTransport + ?Sized,
{
    pub(crate) fn new(transport: &'a C) -> Self {
        Self { transport }
    }

    pub(crate) async fn record(&self, id: &str, language: &str) -> Option<RawRecord> {
        match self.transport.fetch_record(id, language).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                debug!(id, "entry not found");
                None
            }
            Err(e) => {
                warn!(id, error = %e, "fetching entry failed");
                None
            }
        }
    }

    pub(crate) async fn graph(&self, id: &str) -> Option<ConceptGraph> {
        match self.transport.fetch_graph(id).await {
            Ok(Some(graph)) => Some(graph),
            Ok(None) => {
                debug!(id, "concept graph not found");
                None
            }
            Err(e) => {
                warn!(id, error = %e, "fetching concept graph failed");
                None
            }
        }
    }

    pub(crate) async fn edges(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Vec<RawEdge> {
        self.transport
            .fetch_edges(id, relation, language)
            .await
            .unwrap_or_else(|e| {
                warn!(id, %relation, error = %e, "fetching edges failed");
                Vec::new()
            })
    }

    pub(crate) async fn related(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Vec<RawRecord> {
        self.transport
            .fetch_related(id, relation, language)
            .await
            .unwrap_or_else(|e| {
                warn!(id, %relation, error = %e, "fetching related entries failed");
                Vec::new()
            })
    }

    pub(crate) async fn topmost(&self, kind: EntryKind, language: &str) -> Vec<RawRecord> {
        self.transport
            .fetch_topmost(kind, language)
            .await
            .unwrap_or_else(|e| {
                warn!(?kind, error = %e, "fetching topmost entries failed");
                Vec::new()
            })
    }

    pub(crate) async fn search(
        &self,
        keyword: &str,
        language: &str,
        mode: MatchMode,
    ) -> Vec<RawRecord> {
        self.transport
            .search_by_keyword(keyword, language, mode)
            .await
            .unwrap_or_else(|e| {
                warn!(keyword, %mode, error = %e, "keyword search failed");
                Vec::new()
            })
    }
}

//! Every neighbour of an entry, tagged with how it relates.

use tracing::{debug, instrument};

use thesaurus_shared::{CatalogTransport, RelatedTerm, RelationKind};

use crate::catalog::LenientCatalog;
use crate::normalize::normalize_record;
use crate::relation::relation_type;

/// Collect the entries reachable from `id` over each relation kind.
///
/// Entries reachable over several relations appear once per relation.
/// Relations that fail to load contribute nothing.
#[instrument(skip(transport))]
pub async fn related_terms<C>(transport: &C, id: &str, language: &str) -> Vec<RelatedTerm>
where
    C: CatalogTransport + ?Sized,
{
    let catalog = LenientCatalog::new(transport);
    let mut related = Vec::new();

    for relation in RelationKind::ALL {
        let records = catalog.related(id, relation, language).await;
        related.extend(records.iter().map(|record| RelatedTerm {
            term: normalize_record(record, language),
            relation_type: relation_type(relation),
        }));
    }

    debug!(count = related.len(), "collected related terms");
    related
}

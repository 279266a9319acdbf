//! Tree views over the catalog: the top level, one level below an entry,
//! and the path from an entry up to the top.

use std::collections::HashSet;

use tracing::{debug, error, instrument, warn};

use thesaurus_shared::{
    CatalogTransport, EntryKind, RawRecord, RelationKind, TermTree, TermType,
};

use crate::catalog::LenientCatalog;
use crate::normalize::normalize_record;
use crate::relation::{PARENT_RELATION_ORDER, child_relation_for, entry_kind_of};

/// Builds [`TermTree`]s by walking catalog relations.
pub struct HierarchyBuilder<'a, C: ?Sized> {
    catalog: LenientCatalog<'a, C>,
}

impl<'a, C> HierarchyBuilder<'a, C>
where
    C: CatalogTransport + ?Sized,
{
    pub fn new(transport: &'a C) -> Self {
        Self {
            catalog: LenientCatalog::new(transport),
        }
    }

    /// The supergroups. Their parents are left uncomputed and their
    /// children are deferred.
    #[instrument(skip(self))]
    pub async fn top_level(&self, language: &str) -> TermTree {
        let records = self.catalog.topmost(EntryKind::Supergroup, language).await;

        let mut tree = TermTree::new();
        for record in &records {
            let node = tree.insert(normalize_record(record, language));
            tree.defer_children(node);
            tree.push_entry(node);
        }

        debug!(count = tree.entries().len(), "loaded top level");
        tree
    }

    /// Children of `id`, each linked to the entry itself as its one parent.
    ///
    /// Structural children (groups) are returned with deferred children.
    /// Concept children get their own children fetched right away, so a
    /// client can tell leaves from inner nodes.
    #[instrument(skip(self))]
    pub async fn next_level(&self, id: &str, language: &str) -> TermTree {
        let mut tree = TermTree::new();

        let Some(parent_record) = self.catalog.record(id, language).await else {
            error!(id, "entry could not be fetched, returning no children");
            return tree;
        };
        let parent = tree.insert(normalize_record(&parent_record, language));

        for child_record in self.fetch_children(id, language).await {
            let child = tree.insert(normalize_record(&child_record, language));
            tree.link(parent, child);

            if tree.node(child).term().term_type == TermType::NodeLabel {
                tree.defer_children(child);
            } else {
                for grandchild_record in self.fetch_children(&child_record.uri, language).await {
                    let grandchild = tree.insert(normalize_record(&grandchild_record, language));
                    tree.link(child, grandchild);
                }
                tree.mark_children_expanded(child);
            }

            tree.push_entry(child);
        }

        tree.mark_children_expanded(parent);
        tree
    }

    /// The chain of first parents from `id` up to an entry with none.
    ///
    /// The returned tree has `id` as its only entry. Each step follows the
    /// first `broader` parent, falling back to the first group. An entry
    /// already on the path ends the walk, so cyclic catalogs terminate.
    ///
    /// The last node on the path has `parents` computed and empty. That
    /// holds both for a real top-level entry and for a node whose parent
    /// was already on the path; the two cannot be told apart from the tree.
    /// The cycle case is logged at warn.
    #[instrument(skip(self))]
    pub async fn path_to_top(&self, id: &str, language: &str) -> TermTree {
        let mut tree = TermTree::new();

        let Some(record) = self.catalog.record(id, language).await else {
            error!(id, "entry could not be fetched, returning no path");
            return tree;
        };

        let start = tree.insert(normalize_record(&record, language));
        tree.push_entry(start);

        let mut visited: HashSet<String> = HashSet::from([id.to_string(), record.uri.clone()]);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if tree.node(current).parents().is_some() {
                continue;
            }

            let current_id = tree.node(current).id().to_string();
            match self.first_parent(&current_id, language).await {
                Some(parent_record) if visited.insert(parent_record.uri.clone()) => {
                    let parent = tree.insert(normalize_record(&parent_record, language));
                    tree.link(parent, current);
                    stack.push(parent);
                }
                Some(parent_record) => {
                    warn!(
                        id = %current_id,
                        parent = %parent_record.uri,
                        "parent already on path, stopping"
                    );
                    tree.mark_parents_computed(current);
                }
                None => tree.mark_parents_computed(current),
            }
        }

        debug!(depth = tree.len(), "built path to top");
        tree
    }

    /// First parent over the preferred relation that yields any.
    async fn first_parent(&self, id: &str, language: &str) -> Option<RawRecord> {
        for relation in PARENT_RELATION_ORDER {
            let parents = self.catalog.related(id, relation, language).await;
            if let Some(first) = parents.into_iter().next() {
                return Some(first);
            }
        }
        None
    }

    /// Child records of `id` over the relation its kind uses.
    ///
    /// Group members that also have a broader concept are skipped: they
    /// appear under that concept instead. Edges labeled with a different
    /// relation are ignored. Children that cannot be fetched are skipped
    /// with a warning.
    async fn fetch_children(&self, id: &str, language: &str) -> Vec<RawRecord> {
        let relation = child_relation_for(entry_kind_of(id));
        let edges = self.catalog.edges(id, relation, language).await;

        let mut children = Vec::with_capacity(edges.len());
        for edge in edges {
            let target = edge.target.as_str();

            if RelationKind::from_uri(&edge.relation) != Some(relation) {
                debug!(
                    parent = id,
                    child = target,
                    relation = %edge.relation,
                    "edge has unexpected relation, skipping"
                );
                continue;
            }

            if relation == RelationKind::GroupMember
                && !self
                    .catalog
                    .edges(target, RelationKind::Broader, language)
                    .await
                    .is_empty()
            {
                debug!(group = id, member = target, "member has a broader concept, skipping");
                continue;
            }

            match self.catalog.record(target, language).await {
                Some(record) => children.push(record),
                None => warn!(parent = id, child = target, "child could not be fetched, skipping"),
            }
        }

        children
    }
}

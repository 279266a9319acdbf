//! In-memory catalog for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use thesaurus_shared::{
    CatalogTransport, ConceptGraph, EntryKind, LocalizedString, MatchMode, RawEdge, RawRecord,
    RelationKind, Result, ThesaurusError,
};

use crate::relation::entry_kind_of;

pub(crate) const GEMET: &str = "http://www.eionet.europa.eu/gemet";

pub(crate) fn concept(n: u32) -> String {
    format!("{GEMET}/concept/{n}")
}

pub(crate) fn group(n: u32) -> String {
    format!("{GEMET}/group/{n}")
}

pub(crate) fn supergroup(n: u32) -> String {
    format!("{GEMET}/supergroup/{n}")
}

/// Catalog backed by maps, built with chained setters.
#[derive(Default)]
pub(crate) struct MemoryCatalog {
    /// id -> language -> label
    labels: HashMap<String, HashMap<String, String>>,
    /// Insertion order of ids, for stable search results.
    order: Vec<String>,
    edges: Vec<(String, RelationKind, String)>,
    /// Edges listed under one relation but labeled with another URI.
    stray_edges: Vec<(String, RelationKind, String, String)>,
    topmost: Vec<String>,
    graphs: HashMap<String, ConceptGraph>,
    failing: HashSet<String>,
    requests: AtomicUsize,
}

impl MemoryCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entry(mut self, id: &str, language: &str, label: &str) -> Self {
        if !self.labels.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.labels
            .entry(id.to_string())
            .or_default()
            .insert(language.to_string(), label.to_string());
        self
    }

    /// One-way edge.
    pub(crate) fn edge(mut self, source: &str, relation: RelationKind, target: &str) -> Self {
        self.edges
            .push((source.to_string(), relation, target.to_string()));
        self
    }

    /// Edge returned when `listed_under` is requested, but reporting
    /// `relation_uri` as its relation.
    pub(crate) fn stray_edge(
        mut self,
        source: &str,
        listed_under: RelationKind,
        relation_uri: &str,
        target: &str,
    ) -> Self {
        self.stray_edges.push((
            source.to_string(),
            listed_under,
            relation_uri.to_string(),
            target.to_string(),
        ));
        self
    }

    /// `narrower` plus the inverse `broader`.
    pub(crate) fn narrower(self, parent: &str, child: &str) -> Self {
        self.edge(parent, RelationKind::Narrower, child)
            .edge(child, RelationKind::Broader, parent)
    }

    /// `groupMember` plus the inverse `group`.
    pub(crate) fn member(self, group: &str, member: &str) -> Self {
        self.edge(group, RelationKind::GroupMember, member)
            .edge(member, RelationKind::Group, group)
    }

    pub(crate) fn top(mut self, id: &str) -> Self {
        self.topmost.push(id.to_string());
        self
    }

    pub(crate) fn graph(mut self, graph: ConceptGraph) -> Self {
        self.graphs.insert(graph.subject.clone(), graph);
        self
    }

    /// Every request touching `key` (an id or a keyword) fails.
    pub(crate) fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Number of transport calls made so far.
    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn check(&self, key: &str) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(key) {
            return Err(ThesaurusError::Network(format!("connection refused for {key}")));
        }
        Ok(())
    }

    fn record(&self, id: &str, language: &str) -> Option<RawRecord> {
        let labels = self.labels.get(id)?;
        Some(RawRecord {
            uri: id.to_string(),
            preferred_label: labels.get(language).map(|label| LocalizedString {
                string: label.clone(),
                language: Some(language.to_string()),
            }),
            definition: None,
            thesaurus: Some(entry_kind_of(id).thesaurus_uri()),
        })
    }

    fn targets<'a>(
        &'a self,
        id: &'a str,
        relation: RelationKind,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |(source, kind, _)| source == id && *kind == relation)
            .map(|(_, _, target)| target.as_str())
    }
}

fn matches(label: &str, keyword: &str, mode: MatchMode) -> bool {
    let label = label.to_lowercase();
    let keyword = keyword.to_lowercase();
    match mode {
        MatchMode::Exact => label == keyword,
        MatchMode::BeginsWith => label.starts_with(&keyword),
        MatchMode::EndsWith => label.ends_with(&keyword),
        MatchMode::Contains | MatchMode::CheckAll => label.contains(&keyword),
    }
}

#[async_trait]
impl CatalogTransport for MemoryCatalog {
    async fn fetch_record(&self, id: &str, language: &str) -> Result<Option<RawRecord>> {
        self.check(id)?;
        Ok(self.record(id, language))
    }

    async fn fetch_graph(&self, id: &str) -> Result<Option<ConceptGraph>> {
        self.check(id)?;
        Ok(self.graphs.get(id).cloned())
    }

    async fn fetch_edges(
        &self,
        id: &str,
        relation: RelationKind,
        _language: &str,
    ) -> Result<Vec<RawEdge>> {
        self.check(id)?;
        Ok(self
            .targets(id, relation)
            .map(|target| RawEdge {
                source: id.to_string(),
                relation: relation.uri(),
                target: target.to_string(),
            })
            .chain(
                self.stray_edges
                    .iter()
                    .filter(|(source, listed, _, _)| source == id && *listed == relation)
                    .map(|(source, _, uri, target)| RawEdge {
                        source: source.clone(),
                        relation: uri.clone(),
                        target: target.clone(),
                    }),
            )
            .collect())
    }

    async fn fetch_related(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Vec<RawRecord>> {
        self.check(id)?;
        Ok(self
            .targets(id, relation)
            .filter_map(|target| self.record(target, language))
            .collect())
    }

    async fn fetch_topmost(&self, kind: EntryKind, language: &str) -> Result<Vec<RawRecord>> {
        self.check(kind.segment())?;
        Ok(self
            .topmost
            .iter()
            .filter(|id| entry_kind_of(id) == kind)
            .filter_map(|id| self.record(id, language))
            .collect())
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        language: &str,
        mode: MatchMode,
    ) -> Result<Vec<RawRecord>> {
        self.check(keyword)?;
        Ok(self
            .order
            .iter()
            .filter(|id| entry_kind_of(id) == EntryKind::Concept)
            .filter(|id| {
                self.labels[id.as_str()]
                    .get(language)
                    .is_some_and(|label| matches(label, keyword, mode))
            })
            .filter_map(|id| self.record(id, language))
            .collect())
    }
}

//! Conversion of raw catalog records into [`Term`]s.
//!
//! Two wire shapes reach this module: flat JSON records whose label is
//! already scoped to one language, and RDF concept graphs carrying every
//! language at once. Both end up as the same `Term`.

use thesaurus_shared::{ConceptGraph, RawRecord, Term, TermType, predicates};

/// Label predicates tried in order when reading a name from a graph.
const NAME_PREDICATES: [&str; 5] = [
    predicates::SKOS_PREF_LABEL,
    predicates::SKOSXL_PREF_LABEL,
    predicates::SKOS_OFFICIAL_NAME,
    predicates::GEONAMES_OFFICIAL_NAME,
    predicates::SKOS_ALT_LABEL,
];

/// One raw record in either representation.
#[derive(Debug, Clone, Copy)]
pub enum RawConcept<'a> {
    Flat(&'a RawRecord),
    Graph(&'a ConceptGraph),
}

impl<'a> From<&'a RawRecord> for RawConcept<'a> {
    fn from(record: &'a RawRecord) -> Self {
        Self::Flat(record)
    }
}

impl<'a> From<&'a ConceptGraph> for RawConcept<'a> {
    fn from(graph: &'a ConceptGraph) -> Self {
        Self::Graph(graph)
    }
}

impl RawConcept<'_> {
    /// Identifier of the described entry.
    pub fn id(&self) -> &str {
        match self {
            Self::Flat(record) => &record.uri,
            Self::Graph(graph) => &graph.subject,
        }
    }

    /// Name in `language`, if the record carries one.
    pub fn name(&self, language: &str) -> Option<String> {
        match self {
            Self::Flat(record) => record_name(record, language),
            Self::Graph(graph) => graph_name(graph, language),
        }
    }
}

/// Convert a raw record into a term named in `language`.
///
/// A missing translation is not an error: the term keeps its id and type
/// and gets no name.
pub fn normalize<'a>(raw: impl Into<RawConcept<'a>>, language: &str) -> Term {
    let raw = raw.into();
    let id = raw.id().to_string();
    let mut term = Term::new(id.clone(), raw.name(language), term_type_for(&id));
    term.alternate_id = Some(id);
    term
}

/// Shorthand for the flat JSON shape.
pub fn normalize_record(record: &RawRecord, language: &str) -> Term {
    normalize(record, language)
}

/// Concepts are descriptors; groups, supergroups and anything else are
/// structural labels.
pub fn term_type_for(id: &str) -> TermType {
    if id.split('/').any(|segment| segment == "concept") {
        TermType::Descriptor
    } else {
        TermType::NodeLabel
    }
}

fn record_name(record: &RawRecord, language: &str) -> Option<String> {
    let label = record.preferred_label.as_ref()?;
    if let Some(tag) = label.language.as_deref() {
        if !tag.eq_ignore_ascii_case(language) {
            return None;
        }
    }
    Some(label.string.clone()).filter(|name| !name.is_empty())
}

fn graph_name(graph: &ConceptGraph, language: &str) -> Option<String> {
    NAME_PREDICATES
        .iter()
        .find_map(|predicate| graph.literal(predicate, language))
        .map(str::to_string)
}

//! Raw records as the catalog delivers them, before normalization.
//!
//! Two representations exist: the flat JSON records of the REST endpoints
//! ([`RawRecord`], [`RawEdge`]) and the structured graph of an RDF concept
//! document ([`ConceptGraph`]).

use serde::{Deserialize, Serialize};

/// Well-known predicate IRIs read from concept graphs.
pub mod predicates {
    pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const SKOSXL_PREF_LABEL: &str = "http://www.w3.org/2008/05/skos-xl#prefLabel";
    pub const SKOS_OFFICIAL_NAME: &str = "http://www.w3.org/2004/02/skos/core#officialName";
    pub const GEONAMES_OFFICIAL_NAME: &str = "http://www.geonames.org/ontology#officialName";
    pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
}

// ---------------------------------------------------------------------------
// JSON records
// ---------------------------------------------------------------------------

/// A string tagged with its language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One concept, group or supergroup as returned by the JSON endpoints.
///
/// The label is already scoped to the language passed in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_label: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<LocalizedString>,
    /// Thesaurus URI the entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesaurus: Option<String>,
}

impl RawRecord {
    /// Build a record with a preferred label (mostly for fakes and tests).
    pub fn labeled(uri: impl Into<String>, label: impl Into<String>, language: &str) -> Self {
        Self {
            uri: uri.into(),
            preferred_label: Some(LocalizedString {
                string: label.into(),
                language: Some(language.to_string()),
            }),
            definition: None,
            thesaurus: None,
        }
    }
}

/// A single relation edge `{source, relation, target}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub relation: String,
    pub target: String,
}

// ---------------------------------------------------------------------------
// Concept graph
// ---------------------------------------------------------------------------

/// Object of a graph statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphObject {
    Literal {
        value: String,
        language: Option<String>,
    },
    Resource(String),
}

/// A predicate/object pair about the graph's subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub predicate: String,
    pub object: GraphObject,
}

/// All statements the catalog published about one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptGraph {
    /// URI of the described entry.
    pub subject: String,
    pub statements: Vec<Statement>,
}

impl ConceptGraph {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            statements: Vec::new(),
        }
    }

    pub fn push_literal(&mut self, predicate: &str, value: &str, language: Option<&str>) {
        self.statements.push(Statement {
            predicate: predicate.to_string(),
            object: GraphObject::Literal {
                value: value.to_string(),
                language: language.map(str::to_string),
            },
        });
    }

    pub fn push_resource(&mut self, predicate: &str, iri: &str) {
        self.statements.push(Statement {
            predicate: predicate.to_string(),
            object: GraphObject::Resource(iri.to_string()),
        });
    }

    /// First literal of `predicate` tagged with `language`. Tags compare
    /// ASCII case-insensitively, as for flat records.
    pub fn literal(&self, predicate: &str, language: &str) -> Option<&str> {
        self.statements
            .iter()
            .filter(|s| s.predicate == predicate)
            .find_map(|s| match &s.object {
                GraphObject::Literal {
                    value,
                    language: Some(lang),
                } if lang.eq_ignore_ascii_case(language) => Some(value.as_str()),
                _ => None,
            })
    }

}

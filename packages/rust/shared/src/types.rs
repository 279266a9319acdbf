//! Core domain types handed to callers: normalized vocabulary entries and
//! their relation tags.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TermType
// ---------------------------------------------------------------------------

/// Whether an entry is a citable concept or an organizational node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TermType {
    /// Ordinary vocabulary concept.
    Descriptor,
    /// Group or supergroup used only to structure the hierarchy.
    NodeLabel,
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// A normalized vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Catalog URI, globally unique.
    pub id: String,
    /// Display name in the requested language; `None` when the catalog has
    /// no label in that language.
    #[serde(default)]
    pub name: Option<String>,
    /// Entry type derived from the id.
    #[serde(rename = "type")]
    pub term_type: TermType,
    /// Id under which frontends classify the entry as a catalog term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<String>,
    /// Name in the configured alternate language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
}

impl Term {
    /// Create a term without alternate data.
    pub fn new(id: impl Into<String>, name: Option<String>, term_type: TermType) -> Self {
        Self {
            id: id.into(),
            name,
            term_type,
            alternate_id: None,
            alternate_name: None,
        }
    }

    /// Return this term with the given alternate-language name.
    pub fn with_alternate_name(mut self, alternate_name: Option<String>) -> Self {
        self.alternate_name = alternate_name;
        self
    }

    /// Display name, or an empty string when untranslated.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// RelatedTerm
// ---------------------------------------------------------------------------

/// Direction of an edge as seen from the queried entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    Parent,
    Child,
    Relative,
}

/// A term reached over one edge from a queried entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTerm {
    #[serde(flatten)]
    pub term: Term,
    pub relation_type: RelationType,
}

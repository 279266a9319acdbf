//! Catalog vocabulary: relation kinds, entry kinds and keyword match modes,
//! together with the URIs and wire values the catalog API expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThesaurusError;

const SKOS_CORE: &str = "http://www.w3.org/2004/02/skos/core#";
const GEMET_SCHEMA: &str = "http://www.eionet.europa.eu/gemet/2004/06/gemet-schema.rdf#";

// ---------------------------------------------------------------------------
// RelationKind
// ---------------------------------------------------------------------------

/// A typed edge between two catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    Narrower,
    Broader,
    Related,
    /// From a group or supergroup to the group containing it.
    Group,
    /// From a group to one of its members.
    GroupMember,
}

impl RelationKind {
    /// Every relation kind, in fan-out order.
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Narrower,
        RelationKind::Broader,
        RelationKind::Related,
        RelationKind::Group,
        RelationKind::GroupMember,
    ];

    /// Local name used in the catalog schemas.
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Narrower => "narrower",
            Self::Broader => "broader",
            Self::Related => "related",
            Self::Group => "group",
            Self::GroupMember => "groupMember",
        }
    }

    /// Full relation URI, as passed in `relation_uri` request parameters.
    pub fn uri(self) -> String {
        match self {
            Self::Narrower | Self::Broader | Self::Related => {
                format!("{SKOS_CORE}{}", self.local_name())
            }
            Self::Group | Self::GroupMember => format!("{GEMET_SCHEMA}{}", self.local_name()),
        }
    }

    /// Resolve a relation from its URI or bare local name.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let local = uri.rsplit(|c: char| c == '#' || c == '/').next().unwrap_or(uri);
        Self::ALL.into_iter().find(|kind| kind.local_name() == local)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

// ---------------------------------------------------------------------------
// EntryKind
// ---------------------------------------------------------------------------

/// What kind of catalog entry an id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Concept,
    Group,
    Supergroup,
}

impl EntryKind {
    /// Id path segment identifying this kind.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
        }
    }

    /// Thesaurus URI, as passed in `thesaurus_uri` request parameters.
    pub fn thesaurus_uri(self) -> String {
        format!("http://www.eionet.europa.eu/gemet/{}/", self.segment())
    }
}

// ---------------------------------------------------------------------------
// MatchMode
// ---------------------------------------------------------------------------

/// Keyword search mode understood by the catalog's keyword endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    Exact,
    BeginsWith,
    EndsWith,
    Contains,
    CheckAll,
}

impl MatchMode {
    /// Numeric `search_mode` request parameter.
    pub fn wire_value(self) -> u8 {
        match self {
            Self::Exact => 0,
            Self::BeginsWith => 1,
            Self::EndsWith => 2,
            Self::Contains => 3,
            Self::CheckAll => 4,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::BeginsWith => "begins-with",
            Self::EndsWith => "ends-with",
            Self::Contains => "contains",
            Self::CheckAll => "check-all",
        };
        f.write_str(name)
    }
}

impl FromStr for MatchMode {
    type Err = ThesaurusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "exact" => Ok(Self::Exact),
            "begins-with" => Ok(Self::BeginsWith),
            "ends-with" => Ok(Self::EndsWith),
            "contains" => Ok(Self::Contains),
            "check-all" => Ok(Self::CheckAll),
            other => Err(ThesaurusError::validation(format!(
                "unknown match mode '{other}': expected exact, begins-with, ends-with, contains or check-all"
            ))),
        }
    }
}

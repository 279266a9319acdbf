//! RDF/XML concept document parser.
//!
//! Handles the subset of RDF/XML the catalog publishes:
//! - `rdf:RDF` root with one node element per described resource
//! - node elements of any type (`<skos:Concept rdf:about="...">`,
//!   `rdf:Description`)
//! - property elements carrying either `rdf:resource` or a literal with an
//!   inherited `xml:lang`

use roxmltree::{Document, Node};
use thesaurus_shared::{ConceptGraph, Result, ThesaurusError};

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse the statements about `subject` out of an RDF/XML document.
pub(crate) fn parse_concept_graph(content: &str, subject: &str) -> Result<ConceptGraph> {
    let doc = Document::parse(content)
        .map_err(|e| ThesaurusError::parse(format!("invalid RDF/XML for {subject}: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().namespace() != Some(RDF_NS) || root.tag_name().name() != "RDF" {
        return Err(ThesaurusError::parse(format!(
            "document for {subject} has no rdf:RDF root"
        )));
    }

    let mut graph = ConceptGraph::new(subject);

    for node in root.children().filter(Node::is_element) {
        if node.attribute((RDF_NS, "about")) != Some(subject) {
            continue;
        }

        for prop in node.children().filter(Node::is_element) {
            let predicate = expanded_name(&prop);

            if let Some(iri) = prop.attribute((RDF_NS, "resource")) {
                graph.push_resource(&predicate, iri);
                continue;
            }

            // Nested structures have no text of their own
            let Some(text) = prop.text().map(str::trim).filter(|t| !t.is_empty()) else {
                continue;
            };
            graph.push_literal(&predicate, text, language_of(&prop));
        }
    }

    Ok(graph)
}

/// Namespace IRI followed by the local name.
fn expanded_name(node: &Node<'_, '_>) -> String {
    let tag = node.tag_name();
    format!("{}{}", tag.namespace().unwrap_or(""), tag.name())
}

/// Closest `xml:lang` in scope.
fn language_of<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.ancestors()
        .find_map(|n| n.attribute((XML_NS, "lang")))
}

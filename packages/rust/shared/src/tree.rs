//! Hierarchy views over catalog terms.
//!
//! A [`TermTree`] is an arena of [`TreeNode`]s materialized for a single
//! request. Nodes refer to each other by [`NodeId`], and every parent/child
//! edge is recorded through [`TermTree::link`], which writes both directions
//! at once.

use serde::Serialize;

use crate::types::Term;

/// Index of a node inside its [`TermTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

/// Child state of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "nodes", rename_all = "camelCase")]
pub enum Children {
    /// Not computed.
    Unknown,
    /// The entry has children that were not fetched; expand on demand.
    Deferred,
    /// Children were fetched (possibly none).
    Expanded(Vec<NodeId>),
}

impl Children {
    /// Ids of the expanded children, empty unless [`Children::Expanded`].
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Self::Expanded(ids) => ids,
            Self::Unknown | Self::Deferred => &[],
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }
}

/// A term plus its links inside a [`TermTree`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    #[serde(flatten)]
    term: Term,
    /// `None` until parents are computed.
    parents: Option<Vec<NodeId>>,
    children: Children,
}

impl TreeNode {
    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn id(&self) -> &str {
        &self.term.id
    }

    /// Parent ids, or `None` when parents were never computed.
    pub fn parents(&self) -> Option<&[NodeId]> {
        self.parents.as_deref()
    }

    pub fn children(&self) -> &Children {
        &self.children
    }
}

/// Arena of tree nodes plus the entries an operation returned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TermTree {
    nodes: Vec<TreeNode>,
    entries: Vec<NodeId>,
}

impl TermTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with uncomputed parents and children.
    pub fn insert(&mut self, term: Term) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            term,
            parents: None,
            children: Children::Unknown,
        });
        id
    }

    /// Mark a node as one of the results of the operation.
    pub fn push_entry(&mut self, id: NodeId) {
        self.entries.push(id);
    }

    /// Nodes returned by the operation, in result order.
    pub fn entries(&self) -> &[NodeId] {
        &self.entries
    }

    /// Iterate the entry nodes.
    pub fn entry_nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.entries.iter().map(|id| self.node(*id))
    }

    /// Look up a node. Ids are only valid for the tree that issued them.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record `parent` as a parent of `child` and `child` as a child of
    /// `parent`. A real child replaces the deferred marker.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0]
            .parents
            .get_or_insert_with(Vec::new)
            .push(parent);

        let children = &mut self.nodes[parent.0].children;
        match children {
            Children::Expanded(ids) => ids.push(child),
            Children::Unknown | Children::Deferred => *children = Children::Expanded(vec![child]),
        }
    }

    /// Mark a node as having children that were not fetched.
    pub fn defer_children(&mut self, id: NodeId) {
        let children = &mut self.nodes[id.0].children;
        if matches!(children, Children::Unknown) {
            *children = Children::Deferred;
        }
    }

    /// Mark a node's children as computed, keeping any already linked.
    pub fn mark_children_expanded(&mut self, id: NodeId) {
        let children = &mut self.nodes[id.0].children;
        if !matches!(children, Children::Expanded(_)) {
            *children = Children::Expanded(Vec::new());
        }
    }

    /// Mark a node's parents as computed, keeping any already linked.
    pub fn mark_parents_computed(&mut self, id: NodeId) {
        self.nodes[id.0].parents.get_or_insert_with(Vec::new);
    }

    /// Expanded child nodes of `id`.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.node(id).children().ids().iter().map(|c| self.node(*c))
    }

    /// Follow first parents from `id` upwards, starting with `id` itself.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(&parent) = self.node(current).parents().and_then(|p| p.first()) {
            if path.contains(&parent) || path.len() > self.nodes.len() {
                break;
            }
            path.push(parent);
            current = parent;
        }
        path
    }
}

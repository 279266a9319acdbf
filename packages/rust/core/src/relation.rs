//! Classification of catalog relations and entries.

use thesaurus_shared::{EntryKind, RelationKind, RelationType};

/// Relations tried, in order, when looking for the parent of an entry.
pub const PARENT_RELATION_ORDER: [RelationKind; 2] = [RelationKind::Broader, RelationKind::Group];

/// How a relation reads from the source entry's point of view.
pub fn relation_type(kind: RelationKind) -> RelationType {
    match kind {
        RelationKind::Narrower | RelationKind::GroupMember => RelationType::Child,
        RelationKind::Broader | RelationKind::Group => RelationType::Parent,
        RelationKind::Related => RelationType::Relative,
    }
}

/// Classify an entry by the thesaurus segment of its id.
pub fn entry_kind_of(id: &str) -> EntryKind {
    let has_segment = |kind: EntryKind| id.split('/').any(|s| s == kind.segment());
    if has_segment(EntryKind::Supergroup) {
        EntryKind::Supergroup
    } else if has_segment(EntryKind::Group) {
        EntryKind::Group
    } else {
        EntryKind::Concept
    }
}

/// The relation that leads from an entry of `kind` to its children.
///
/// Groups list their members; concepts and supergroups use `narrower`.
pub fn child_relation_for(kind: EntryKind) -> RelationKind {
    match kind {
        EntryKind::Group => RelationKind::GroupMember,
        EntryKind::Concept | EntryKind::Supergroup => RelationKind::Narrower,
    }
}

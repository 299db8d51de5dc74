//! Mutation journal records.
//!
//! Every structural or attribute change to the [`Dom`](super::Dom) appends a
//! [`MutationRecord`] with a monotonically increasing sequence number.
//! Watchers keep a cursor and read batches with `Dom::mutations_since`; a
//! whole batch is consumed per tick, which coalesces rapid DOM writes into a
//! single logical transition per watcher.

use super::node::NodeId;

/// Which attribute family changed. Matches the `style`/`class` attribute
/// filter of the original observation contract; text changes are not
/// journaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Style,
    Class,
}

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// An attribute of `target` changed.
    Attributes {
        target: NodeId,
        attribute: AttributeKind,
    },
    /// The child list of `parent` changed.
    ChildList {
        parent: NodeId,
        added: Vec<NodeId>,
        removed: Vec<NodeId>,
    },
}

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Monotonically increasing sequence number, starting at 0.
    pub seq: u64,
    pub kind: MutationKind,
}

impl MutationRecord {
    /// Whether this record reports the removal of `node` from its parent.
    pub fn removed(&self, node: NodeId) -> bool {
        match &self.kind {
            MutationKind::ChildList { removed, .. } => removed.contains(&node),
            _ => false,
        }
    }

    /// Whether this record is an attribute mutation on `node`.
    pub fn touches_attributes_of(&self, node: NodeId) -> bool {
        matches!(&self.kind, MutationKind::Attributes { target, .. } if *target == node)
    }
}

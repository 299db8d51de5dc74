//! Tree queries: lookup by id, class, or kind, and predicate searches.

use crate::style::Resize;

use super::node::NodeId;
use super::tree::Dom;

impl Dom {
    /// Find the first node (pre-order from the body) with the given id.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk_depth_first(self.body())
            .into_iter()
            .find(|&n| self.get(n).map(|d| d.id.as_deref() == Some(id)).unwrap_or(false))
    }

    /// Find the first node (pre-order from the body) carrying `class`.
    pub fn query_by_class(&self, class: &str) -> Option<NodeId> {
        self.walk_depth_first(self.body())
            .into_iter()
            .find(|&n| self.get(n).map(|d| d.has_class(class)).unwrap_or(false))
    }

    /// All attached nodes of the given kind, in pre-order.
    pub fn query_by_kind(&self, kind: &str) -> Vec<NodeId> {
        self.walk_depth_first(self.body())
            .into_iter()
            .filter(|&n| self.get(n).map(|d| d.kind == kind).unwrap_or(false))
            .collect()
    }

    /// All nodes under `root` (inclusive) matching the predicate, in
    /// pre-order.
    pub fn query_all(
        &self,
        root: NodeId,
        mut predicate: impl FnMut(&Dom, NodeId) -> bool,
    ) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&n| predicate(self, n))
            .collect()
    }

    /// First descendant of `root` (inclusive) whose computed style marks it
    /// user-resizable. This is the node whose size the lifecycle observer
    /// watches.
    pub fn resizable_descendant(&self, root: NodeId) -> Option<NodeId> {
        self.walk_depth_first(root).into_iter().find(|&n| {
            self.computed_style(n)
                .map(|c| c.resize == Resize::Both)
                .unwrap_or(false)
        })
    }
}

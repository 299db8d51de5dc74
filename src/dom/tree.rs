//! Tree operations: create, append, remove, walk — plus the mutation journal.
//!
//! All nodes live in a single `SlotMap`. Parent/child relationships are stored
//! in secondary maps so that node removal is O(subtree size) and lookup is O(1).
//!
//! Nodes are created *detached* ([`Dom::create`]) and attached later
//! ([`Dom::append`]); a permanent body node is the document root. Structural
//! and attribute changes append [`MutationRecord`]s to the journal, which is
//! how lifecycle observers see the tree evolve.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use crate::geometry::{Offset, Region, Size};
use crate::style::{ComputedStyle, Styles};

use super::mutation::{AttributeKind, MutationKind, MutationRecord};
use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The central DOM tree, backed by a slotmap arena.
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    body: NodeId,
    journal: Vec<MutationRecord>,
    /// Sequence number of the first record still held in `journal`.
    base_seq: u64,
}

impl Dom {
    /// Create a DOM with an empty body node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData::new("body"));
        let mut children = SecondaryMap::new();
        children.insert(body, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            body,
            journal: Vec::new(),
            base_seq: 0,
        }
    }

    /// The permanent document body node.
    pub fn body(&self) -> NodeId {
        self.body
    }

    // -- structure ----------------------------------------------------------

    /// Create a detached node. It has no parent until [`Dom::append`] is
    /// called; no mutation is journaled.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Attach `child` as the last child of `parent`, journaling a child-list
    /// mutation. If the child was attached elsewhere it is detached first
    /// (journaling the removal on the old parent).
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        debug_assert!(self.nodes.contains_key(child), "child node does not exist");

        if let Some(old_parent) = self.parent.remove(child) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&c| c != child);
            }
            self.record(MutationKind::ChildList {
                parent: old_parent,
                added: vec![],
                removed: vec![child],
            });
        }

        self.parent.insert(child, parent);
        match self.children.get_mut(parent) {
            Some(kids) => kids.push(child),
            None => {
                self.children.insert(parent, vec![child]);
            }
        }
        self.record(MutationKind::ChildList {
            parent,
            added: vec![child],
            removed: vec![],
        });
    }

    /// Create a node and attach it under `parent` in one step.
    pub fn create_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.create(data);
        self.append(parent, id);
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Journals a single child-list mutation on the former parent (observers
    /// of the parent see the top-level removal, not the whole subtree).
    /// Returns the removed node's data, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) || id == self.body {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
            self.record(MutationKind::ChildList {
                parent: parent_id,
                added: vec![],
                removed: vec![id],
            });
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Get the parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Empty slice if none or nonexistent.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestor node ids, nearest first, ending at the root of the node's
    /// tree (the body for attached nodes). Does not include `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether the node is reachable from the body.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if id == self.body {
            return true;
        }
        self.ancestors(id).last() == Some(&self.body)
    }

    /// Whether `node` is `root` or one of its descendants.
    pub fn in_subtree(&self, root: NodeId, node: NodeId) -> bool {
        node == root || self.ancestors(node).contains(&root)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    ///
    /// Bypasses the journal; use the attribute mutators below for changes
    /// observers should see.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes (including the body).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM holds only the body node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            let kids = self.children(current);
            for &child in kids.iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // -- attributes ---------------------------------------------------------

    /// Mutate a node's inline styles, journaling a style mutation.
    pub fn update_styles(&mut self, id: NodeId, f: impl FnOnce(&mut Styles)) {
        if let Some(node) = self.nodes.get_mut(id) {
            f(&mut node.styles);
            self.record(MutationKind::Attributes {
                target: id,
                attribute: AttributeKind::Style,
            });
        }
    }

    /// Add a class, journaling a class mutation when something changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.add_class(class) {
                self.record(MutationKind::Attributes {
                    target: id,
                    attribute: AttributeKind::Class,
                });
            }
        }
    }

    /// Remove a class, journaling a class mutation when something changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.remove_class(class) {
                self.record(MutationKind::Attributes {
                    target: id,
                    attribute: AttributeKind::Class,
                });
            }
        }
    }

    /// Set a node's offset (its `top`/`left`), journaling a style mutation.
    pub fn set_offset(&mut self, id: NodeId, offset: Offset) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.offset = offset;
            self.record(MutationKind::Attributes {
                target: id,
                attribute: AttributeKind::Style,
            });
        }
    }

    /// Set a node's size, journaling a style mutation.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.size = size;
            self.record(MutationKind::Attributes {
                target: id,
                attribute: AttributeKind::Style,
            });
        }
    }

    /// Set a node's disabled flag, journaling a class mutation when changed.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.disabled != disabled {
                node.disabled = disabled;
                if disabled {
                    node.add_class("disabled");
                } else {
                    node.remove_class("disabled");
                }
                self.record(MutationKind::Attributes {
                    target: id,
                    attribute: AttributeKind::Class,
                });
            }
        }
    }

    /// Set a node's text content. Text is outside the observed attribute
    /// filter, so nothing is journaled.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = text.into();
        }
    }

    /// The node's fully-resolved style.
    pub fn computed_style(&self, id: NodeId) -> Option<ComputedStyle> {
        self.nodes.get(id).map(|n| n.styles.compute())
    }

    // -- geometry -----------------------------------------------------------

    /// Absolute offset of a node: the sum of offsets from its tree root down.
    pub fn absolute_offset(&self, id: NodeId) -> Offset {
        let mut total = match self.nodes.get(id) {
            Some(n) => n.offset,
            None => return Offset::ZERO,
        };
        for ancestor in self.ancestors(id) {
            if let Some(n) = self.nodes.get(ancestor) {
                total = total + n.offset;
            }
        }
        total
    }

    /// Absolute bounding rectangle of a node.
    pub fn absolute_rect(&self, id: NodeId) -> Region {
        let size = self.nodes.get(id).map(|n| n.size).unwrap_or(Size::ZERO);
        Region::from_parts(self.absolute_offset(id), size)
    }

    // -- journal ------------------------------------------------------------

    /// Cursor just past the newest journal record. A watcher created now
    /// that reads from this cursor sees only future mutations.
    pub fn journal_cursor(&self) -> u64 {
        self.base_seq + self.journal.len() as u64
    }

    /// All records with `seq >= cursor` that are still retained.
    pub fn mutations_since(&self, cursor: u64) -> &[MutationRecord] {
        let start = cursor.saturating_sub(self.base_seq) as usize;
        if start >= self.journal.len() {
            &[]
        } else {
            &self.journal[start..]
        }
    }

    /// Drop journal records older than `before`. Watchers must not hold
    /// cursors below this point afterwards.
    pub fn compact_journal(&mut self, before: u64) {
        if before <= self.base_seq {
            return;
        }
        let drop = (before - self.base_seq) as usize;
        let drop = drop.min(self.journal.len());
        self.journal.drain(..drop);
        self.base_seq += drop as u64;
    }

    fn record(&mut self, kind: MutationKind) {
        let seq = self.journal_cursor();
        self.journal.push(MutationRecord { seq, kind });
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::style::Display;

    /// Build a small attached tree under the body:
    /// ```text
    ///      body
    ///     /    \
    ///    a      b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.body();
        let a = dom.create_child(body, NodeData::new("panel").with_id("a"));
        let b = dom.create_child(body, NodeData::new("panel").with_id("b"));
        let c = dom.create_child(a, NodeData::new("btn").with_id("c"));
        let d = dom.create_child(a, NodeData::new("label").with_id("d"));
        (dom, a, b, c, d)
    }

    #[test]
    fn new_has_body() {
        let dom = Dom::new();
        assert!(dom.contains(dom.body()));
        assert!(dom.is_empty());
        assert_eq!(dom.len(), 1);
    }

    #[test]
    fn create_is_detached() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::new("modal"));
        assert!(dom.contains(id));
        assert_eq!(dom.parent(id), None);
        assert!(!dom.is_attached(id));
    }

    #[test]
    fn create_does_not_journal() {
        let mut dom = Dom::new();
        let before = dom.journal_cursor();
        dom.create(NodeData::new("modal"));
        assert_eq!(dom.journal_cursor(), before);
    }

    #[test]
    fn append_attaches_and_journals() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::new("modal"));
        let cursor = dom.journal_cursor();
        dom.append(dom.body(), id);
        assert_eq!(dom.parent(id), Some(dom.body()));
        assert!(dom.is_attached(id));

        let batch = dom.mutations_since(cursor);
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch[0].kind,
            MutationKind::ChildList {
                parent: dom.body(),
                added: vec![id],
                removed: vec![],
            }
        );
    }

    #[test]
    fn append_reparents_with_removal_record() {
        let (mut dom, a, b, c, _d) = build_tree();
        let cursor = dom.journal_cursor();
        dom.append(b, c);
        assert_eq!(dom.parent(c), Some(b));
        assert!(!dom.children(a).contains(&c));

        let batch = dom.mutations_since(cursor);
        assert_eq!(batch.len(), 2);
        assert!(batch[0].removed(c));
        assert!(matches!(
            &batch[1].kind,
            MutationKind::ChildList { parent, added, .. } if *parent == b && added.contains(&c)
        ));
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, a, b, c, d) = build_tree();
        let cursor = dom.journal_cursor();
        let removed = dom.remove(a);
        assert_eq!(removed.unwrap().id.as_deref(), Some("a"));
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert!(dom.contains(b));

        // Only the top-level removal is journaled.
        let batch = dom.mutations_since(cursor);
        assert_eq!(batch.len(), 1);
        assert!(batch[0].removed(a));
    }

    #[test]
    fn remove_detached_node_does_not_journal() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::new("x"));
        let cursor = dom.journal_cursor();
        assert!(dom.remove(id).is_some());
        assert!(dom.mutations_since(cursor).is_empty());
    }

    #[test]
    fn remove_body_is_refused() {
        let mut dom = Dom::new();
        let body = dom.body();
        assert!(dom.remove(body).is_none());
        assert!(dom.contains(body));
    }

    #[test]
    fn remove_nonexistent() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::new("x"));
        dom.remove(id);
        assert!(dom.remove(id).is_none());
    }

    #[test]
    fn ancestors_and_subtree() {
        let (dom, a, b, c, _d) = build_tree();
        assert_eq!(dom.ancestors(c), vec![a, dom.body()]);
        assert!(dom.in_subtree(a, c));
        assert!(dom.in_subtree(a, a));
        assert!(!dom.in_subtree(b, c));
    }

    #[test]
    fn detached_subtree_is_not_attached() {
        let mut dom = Dom::new();
        let root = dom.create(NodeData::new("modal"));
        let inner = dom.create_child(root, NodeData::new("modal-body"));
        assert!(!dom.is_attached(root));
        assert!(!dom.is_attached(inner));
        assert!(dom.in_subtree(root, inner));
    }

    #[test]
    fn walk_depth_first_order() {
        let (dom, a, b, c, d) = build_tree();
        let order = dom.walk_depth_first(dom.body());
        assert_eq!(order, vec![dom.body(), a, c, d, b]);
    }

    #[test]
    fn update_styles_journals_style_mutation() {
        let (mut dom, a, ..) = build_tree();
        let cursor = dom.journal_cursor();
        dom.update_styles(a, |s| s.display = Some(Display::None));
        let batch = dom.mutations_since(cursor);
        assert_eq!(batch.len(), 1);
        assert!(batch[0].touches_attributes_of(a));
        assert_eq!(dom.computed_style(a).unwrap().display, Display::None);
    }

    #[test]
    fn class_mutators_journal_only_on_change() {
        let (mut dom, a, ..) = build_tree();
        let cursor = dom.journal_cursor();
        dom.add_class(a, "show");
        dom.add_class(a, "show"); // no-op
        dom.remove_class(a, "show");
        dom.remove_class(a, "show"); // no-op
        assert_eq!(dom.mutations_since(cursor).len(), 2);
    }

    #[test]
    fn set_disabled_toggles_class() {
        let (mut dom, a, ..) = build_tree();
        dom.set_disabled(a, true);
        assert!(dom.get(a).unwrap().has_class("disabled"));
        dom.set_disabled(a, false);
        assert!(!dom.get(a).unwrap().has_class("disabled"));
    }

    #[test]
    fn set_text_does_not_journal() {
        let (mut dom, a, ..) = build_tree();
        let cursor = dom.journal_cursor();
        dom.set_text(a, "hello");
        assert!(dom.mutations_since(cursor).is_empty());
        assert_eq!(dom.get(a).unwrap().text, "hello");
    }

    #[test]
    fn absolute_offset_sums_ancestors() {
        let mut dom = Dom::new();
        let outer = dom.create_child(dom.body(), NodeData::new("modal").at(Offset::new(10, 5)));
        let inner = dom.create_child(outer, NodeData::new("modal-header").at(Offset::new(1, 1)));
        assert_eq!(dom.absolute_offset(inner), Offset::new(11, 6));
    }

    #[test]
    fn absolute_rect_uses_size() {
        let mut dom = Dom::new();
        let n = dom.create_child(
            dom.body(),
            NodeData::new("toast").at(Offset::new(2, 3)).sized(Size::new(20, 4)),
        );
        assert_eq!(dom.absolute_rect(n), Region::new(2, 3, 20, 4));
    }

    #[test]
    fn mutations_since_future_cursor_is_empty() {
        let (dom, ..) = build_tree();
        assert!(dom.mutations_since(dom.journal_cursor()).is_empty());
        assert!(dom.mutations_since(dom.journal_cursor() + 10).is_empty());
    }

    #[test]
    fn compact_journal_drops_old_records() {
        let (mut dom, a, ..) = build_tree();
        dom.add_class(a, "one");
        dom.add_class(a, "two");
        let mid = dom.journal_cursor();
        dom.add_class(a, "three");

        dom.compact_journal(mid);
        assert_eq!(dom.mutations_since(0).len(), 1);
        assert_eq!(dom.mutations_since(mid).len(), 1);
        // Compacting backwards is a no-op.
        dom.compact_journal(0);
        assert_eq!(dom.mutations_since(mid).len(), 1);
    }
}

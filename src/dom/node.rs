//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::geometry::{Offset, Size};
use crate::style::Styles;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    /// Node kind (e.g. "modal", "modal-header", "btn-ok").
    pub kind: String,
    /// Optional unique id (for `#id` lookup).
    pub id: Option<String>,
    /// Style classes (for `.class` lookup).
    pub classes: Vec<String>,
    /// Text content, if any.
    pub text: String,
    /// Inline styles.
    pub styles: Styles,
    /// Position relative to the parent (absolute positioning from the body).
    pub offset: Offset,
    /// Size in cells.
    pub size: Size,
    /// Whether this node is disabled (ignores activation).
    pub disabled: bool,
}

impl NodeData {
    /// Create a new `NodeData` with the given kind and sensible defaults.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set the node id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the inline styles (builder).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Set the offset (builder).
    pub fn at(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the size (builder).
    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present. Returns true if added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            false
        } else {
            self.classes.push(class.to_owned());
            true
        }
    }

    /// Remove a class. No-op if not present. Returns true if removed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }
}

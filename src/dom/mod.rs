//! DOM module: a slotmap-backed element tree with a mutation journal.
//!
//! The tree is the single source of truth for what is on screen. Overlay
//! components attach nodes under the body, flip style and class attributes
//! to show and hide, and detach on dismissal; lifecycle observers replay the
//! mutation journal to turn those raw edits into phase callbacks.

mod mutation;
mod node;
mod query;
mod tree;

pub use mutation::{AttributeKind, MutationKind, MutationRecord};
pub use node::{NodeData, NodeId};
pub use tree::Dom;

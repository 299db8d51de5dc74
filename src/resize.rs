//! Marking dialog regions user-resizable.
//!
//! Resizing itself is detected by the lifecycle observer's size watcher;
//! this module only flips the style flags that opt a node into resizing
//! and make it discoverable via [`Dom::resizable_descendant`].

use crate::dom::{Dom, NodeId};
use crate::error::{CasementError, Result};
use crate::style::{Overflow, Position, Resize};

/// Opt `target` into user resizing.
///
/// The node is absolutely positioned, marked `resize: both`, and given auto
/// overflow so shrinking it scrolls rather than clips its content.
pub fn make_resizable(dom: &mut Dom, target: NodeId) -> Result<()> {
    if !dom.contains(target) {
        return Err(CasementError::TargetNotFound);
    }
    dom.update_styles(target, |s| {
        s.position = Some(Position::Absolute);
        s.resize = Some(Resize::Both);
        s.overflow = Some(Overflow::Auto);
    });
    Ok(())
}

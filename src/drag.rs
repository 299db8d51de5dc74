//! Pointer-driven dragging of dialog elements.
//!
//! A [`DragController`] binds a draggable target to a handle node (usually
//! the dialog header). Movement is incremental: each drag event applies the
//! pointer delta since the previous event to the target's offset, so the
//! grab point stays under the pointer no matter where on the handle the drag
//! started. Boundary rules are enforced only on release, per axis: if the
//! handle ended up essentially off the viewport on one axis, that axis
//! reverts to the last position that was valid.

use tracing::trace;

use crate::dom::{Dom, NodeId};
use crate::event::{MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Size};
use crate::style::Cursor;

/// How far off the viewport edges a handle may rest before the drag axis is
/// reverted on release.
#[derive(Debug, Clone, Copy)]
pub struct DragLimits {
    /// Minimum number of handle cells that must remain on screen
    /// horizontally, and the margin kept below the top and bottom edges.
    pub side_slack: i32,
}

impl Default for DragLimits {
    fn default() -> Self {
        Self { side_slack: 6 }
    }
}

struct ActiveDrag {
    last_pointer: Offset,
}

/// Drives dragging of one target node by its handle.
pub struct DragController {
    target: NodeId,
    handle: NodeId,
    limits: DragLimits,
    /// Target offset at the last position that passed the boundary check.
    last_valid: Offset,
    active: Option<ActiveDrag>,
}

impl DragController {
    /// Make `target` draggable by `handle`. The handle gets a move cursor
    /// hint; the target's current offset becomes the first valid resting
    /// position.
    pub fn new(dom: &mut Dom, target: NodeId, handle: NodeId, limits: DragLimits) -> Self {
        dom.update_styles(handle, |s| s.cursor = Some(Cursor::Move));
        let last_valid = dom.get(target).map(|n| n.offset).unwrap_or(Offset::ZERO);
        Self {
            target,
            handle,
            limits,
            last_valid,
            active: None,
        }
    }

    /// The node being dragged.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node that receives the pointer grab.
    pub fn handle(&self) -> NodeId {
        self.handle
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the controller still points at live nodes.
    pub fn is_live(&self, dom: &Dom) -> bool {
        dom.contains(self.target) && dom.contains(self.handle)
    }

    /// Feed a mouse event. Returns `true` if the event was consumed.
    pub fn on_mouse(&mut self, dom: &mut Dom, event: MouseEvent, viewport: Size) -> bool {
        match event.kind {
            MouseAction::Down(MouseBtn::Left) => {
                if dom.absolute_rect(self.handle).contains(event.x, event.y) {
                    self.active = Some(ActiveDrag {
                        last_pointer: event.position(),
                    });
                    trace!(target: "casement::drag", x = event.x, y = event.y, "drag start");
                    true
                } else {
                    false
                }
            }
            MouseAction::Drag(MouseBtn::Left) => {
                let Some(drag) = self.active.as_mut() else {
                    return false;
                };
                let delta = event.position() - drag.last_pointer;
                drag.last_pointer = event.position();
                if let Some(node) = dom.get(self.target) {
                    let next = node.offset + delta;
                    dom.set_offset(self.target, next);
                }
                true
            }
            MouseAction::Up(MouseBtn::Left) => {
                if self.active.take().is_none() {
                    return false;
                }
                self.settle(dom, viewport);
                true
            }
            _ => false,
        }
    }

    /// Apply the release-time boundary rules, reverting invalid axes to the
    /// last valid resting position.
    fn settle(&mut self, dom: &mut Dom, viewport: Size) {
        let Some(offset) = dom.get(self.target).map(|n| n.offset) else {
            return;
        };
        let handle = dom.absolute_rect(self.handle);
        let slack = self.limits.side_slack;

        let x_valid = handle.right() > slack && handle.x < viewport.width - slack;
        let y_valid = handle.y >= 0 && handle.y < viewport.height - slack;

        let settled = Offset::new(
            if x_valid { offset.x } else { self.last_valid.x },
            if y_valid { offset.y } else { self.last_valid.y },
        );
        if settled != offset {
            trace!(target: "casement::drag", "reverting off-viewport axis");
            dom.set_offset(self.target, settled);
        }
        self.last_valid = settled;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

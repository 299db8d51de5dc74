//! The component host seam.
//!
//! Dialogs delegate their show/hide transitions to a [`ComponentHost`] so
//! the transition engine is swappable. The built-in [`OverlayHost`] flips
//! style and class attributes directly, which means the lifecycle observer
//! sees ordinary DOM mutations and needs no special knowledge of the host.
//!
//! Hosts report their transition phases through a drained event queue
//! rather than callbacks, keeping the trait object-safe and borrow-friendly.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::debug;

use crate::dom::{Dom, NodeId};
use crate::style::Display;

new_key_type! {
    /// Identifier of a host-managed component instance.
    pub struct InstanceId;
}

/// Transition phase reported by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// Transition to visible is starting.
    Show,
    /// Transition to visible completed.
    Shown,
    /// Transition to hidden is starting.
    Hide,
    /// Transition to hidden completed.
    Hidden,
}

/// A phase notification from a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPhaseEvent {
    pub instance: InstanceId,
    pub node: NodeId,
    pub phase: HostPhase,
}

/// Drives show/hide transitions for overlay elements.
pub trait ComponentHost {
    /// Get the instance bound to `node`, creating one if needed. Returns
    /// `None` when the node does not exist.
    fn get_or_create_instance(&mut self, dom: &mut Dom, node: NodeId) -> Option<InstanceId>;

    /// Begin showing the instance.
    fn show(&mut self, dom: &mut Dom, instance: InstanceId);

    /// Begin hiding the instance.
    fn hide(&mut self, dom: &mut Dom, instance: InstanceId);

    /// Show if hidden, hide if shown.
    fn toggle(&mut self, dom: &mut Dom, instance: InstanceId);

    /// The node an instance is bound to, if still alive.
    fn node_of(&self, instance: InstanceId) -> Option<NodeId>;

    /// Drop an instance without touching the DOM.
    fn dispose(&mut self, instance: InstanceId);

    /// Take all phase events emitted since the last drain.
    fn drain_phase_events(&mut self) -> Vec<HostPhaseEvent>;
}

struct Instance {
    node: NodeId,
    visible: bool,
}

/// The built-in host: instant transitions implemented as plain attribute
/// flips (`show` class plus `display`).
#[derive(Default)]
pub struct OverlayHost {
    instances: SlotMap<InstanceId, Instance>,
    by_node: SecondaryMap<NodeId, InstanceId>,
    pending: Vec<HostPhaseEvent>,
}

impl OverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, instance: InstanceId, node: NodeId, phase: HostPhase) {
        self.pending.push(HostPhaseEvent {
            instance,
            node,
            phase,
        });
    }
}

impl ComponentHost for OverlayHost {
    fn get_or_create_instance(&mut self, dom: &mut Dom, node: NodeId) -> Option<InstanceId> {
        if !dom.contains(node) {
            return None;
        }
        if let Some(&existing) = self.by_node.get(node) {
            if self.instances.contains_key(existing) {
                return Some(existing);
            }
        }
        let id = self.instances.insert(Instance {
            node,
            visible: false,
        });
        self.by_node.insert(node, id);
        debug!(target: "casement::host", "created overlay instance");
        Some(id)
    }

    fn show(&mut self, dom: &mut Dom, instance: InstanceId) {
        let Some(inst) = self.instances.get_mut(instance) else {
            return;
        };
        let node = inst.node;
        inst.visible = true;
        self.push(instance, node, HostPhase::Show);
        dom.update_styles(node, |s| s.display = Some(Display::Block));
        dom.add_class(node, "show");
        self.push(instance, node, HostPhase::Shown);
    }

    fn hide(&mut self, dom: &mut Dom, instance: InstanceId) {
        let Some(inst) = self.instances.get_mut(instance) else {
            return;
        };
        let node = inst.node;
        inst.visible = false;
        self.push(instance, node, HostPhase::Hide);
        dom.remove_class(node, "show");
        dom.update_styles(node, |s| s.display = Some(Display::None));
        self.push(instance, node, HostPhase::Hidden);
    }

    fn toggle(&mut self, dom: &mut Dom, instance: InstanceId) {
        match self.instances.get(instance) {
            Some(inst) if inst.visible => self.hide(dom, instance),
            Some(_) => self.show(dom, instance),
            None => {}
        }
    }

    fn node_of(&self, instance: InstanceId) -> Option<NodeId> {
        self.instances.get(instance).map(|i| i.node)
    }

    fn dispose(&mut self, instance: InstanceId) {
        if let Some(inst) = self.instances.remove(instance) {
            self.by_node.remove(inst.node);
        }
    }

    fn drain_phase_events(&mut self) -> Vec<HostPhaseEvent> {
        std::mem::take(&mut self.pending)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::NodeData;
    use crate::style::{classify_visibility, VisibilityState};

    fn setup() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let n = dom.create_child(dom.body(), NodeData::new("modal"));
        dom.update_styles(n, |s| s.display = Some(Display::None));
        (dom, n)
    }

    #[test]
    fn instance_is_reused_per_node() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let a = host.get_or_create_instance(&mut dom, n).unwrap();
        let b = host.get_or_create_instance(&mut dom, n).unwrap();
        assert_eq!(a, b);
        assert_eq!(host.node_of(a), Some(n));
    }

    #[test]
    fn missing_node_yields_no_instance() {
        let (mut dom, n) = setup();
        dom.remove(n);
        let mut host = OverlayHost::new();
        assert!(host.get_or_create_instance(&mut dom, n).is_none());
    }

    #[test]
    fn show_makes_node_visible_and_reports_phases() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let id = host.get_or_create_instance(&mut dom, n).unwrap();
        host.get_or_create_instance(&mut dom, n);
        host.drain_phase_events();

        host.show(&mut dom, id);
        let c = dom.computed_style(n).unwrap();
        assert_eq!(classify_visibility(&c), VisibilityState::Visible);
        assert!(dom.get(n).unwrap().has_class("show"));

        let phases: Vec<_> = host.drain_phase_events().iter().map(|e| e.phase).collect();
        assert_eq!(phases, vec![HostPhase::Show, HostPhase::Shown]);
        assert!(host.drain_phase_events().is_empty());
    }

    #[test]
    fn hide_makes_node_hidden_and_reports_phases() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let id = host.get_or_create_instance(&mut dom, n).unwrap();
        host.show(&mut dom, id);
        host.drain_phase_events();

        host.hide(&mut dom, id);
        let c = dom.computed_style(n).unwrap();
        assert_eq!(classify_visibility(&c), VisibilityState::Hidden);
        assert!(!dom.get(n).unwrap().has_class("show"));

        let phases: Vec<_> = host.drain_phase_events().iter().map(|e| e.phase).collect();
        assert_eq!(phases, vec![HostPhase::Hide, HostPhase::Hidden]);
    }

    #[test]
    fn toggle_alternates() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let id = host.get_or_create_instance(&mut dom, n).unwrap();

        host.toggle(&mut dom, id);
        assert_eq!(
            classify_visibility(&dom.computed_style(n).unwrap()),
            VisibilityState::Visible
        );
        host.toggle(&mut dom, id);
        assert_eq!(
            classify_visibility(&dom.computed_style(n).unwrap()),
            VisibilityState::Hidden
        );
    }

    #[test]
    fn dispose_forgets_instance() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let id = host.get_or_create_instance(&mut dom, n).unwrap();
        host.dispose(id);
        assert_eq!(host.node_of(id), None);

        // A fresh instance is minted on next use.
        let id2 = host.get_or_create_instance(&mut dom, n).unwrap();
        assert_ne!(id, id2);
    }

    #[test]
    fn show_on_disposed_instance_is_a_no_op() {
        let (mut dom, n) = setup();
        let mut host = OverlayHost::new();
        let id = host.get_or_create_instance(&mut dom, n).unwrap();
        host.dispose(id);
        host.show(&mut dom, id);
        assert_eq!(
            classify_visibility(&dom.computed_style(n).unwrap()),
            VisibilityState::Hidden
        );
        assert!(host.drain_phase_events().is_empty());
    }
}

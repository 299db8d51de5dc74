//! Namespaced dialog events with DOM bubbling.
//!
//! Every component transition is announced as a [`DialogEvent`] named
//! `csm:{component}:{phase}`. Events bubble from the target node up its
//! ancestor chain to node-scoped subscribers, then reach the global
//! subscribers; a handler can mark the event handled to stop propagation.

use std::any::Any;
use std::rc::Rc;

use slotmap::SecondaryMap;
use tracing::trace;

use crate::dom::{Dom, NodeId};

/// Event phase names, covering lifecycle, host transitions, and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogPhase {
    Created,
    Rendered,
    Hidden,
    Removed,
    Dragged,
    Resized,
    Show,
    Shown,
    Hide,
    Ok,
    Cancel,
}

impl DialogPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DialogPhase::Created => "created",
            DialogPhase::Rendered => "rendered",
            DialogPhase::Hidden => "hidden",
            DialogPhase::Removed => "removed",
            DialogPhase::Dragged => "dragged",
            DialogPhase::Resized => "resized",
            DialogPhase::Show => "show",
            DialogPhase::Shown => "shown",
            DialogPhase::Hide => "hide",
            DialogPhase::Ok => "ok",
            DialogPhase::Cancel => "cancel",
        }
    }
}

/// A dialog event in flight.
#[derive(Clone)]
pub struct DialogEvent {
    /// Component kind, e.g. `"modal"` or `"toast"`.
    pub component: &'static str,
    pub phase: DialogPhase,
    /// The node the event originates from.
    pub target: NodeId,
    /// Optional payload, downcast with [`DialogEvent::detail_as`].
    pub detail: Option<Rc<dyn Any>>,
    /// Set by a handler to stop further propagation.
    pub handled: bool,
}

impl DialogEvent {
    pub fn new(component: &'static str, phase: DialogPhase, target: NodeId) -> Self {
        Self {
            component,
            phase,
            target,
            detail: None,
            handled: false,
        }
    }

    /// Attach a payload (builder).
    pub fn with_detail(mut self, detail: impl Any) -> Self {
        self.detail = Some(Rc::new(detail));
        self
    }

    /// The namespaced event name, `csm:{component}:{phase}`.
    pub fn name(&self) -> String {
        format!("csm:{}:{}", self.component, self.phase.as_str())
    }

    /// Downcast the payload.
    pub fn detail_as<T: Any>(&self) -> Option<&T> {
        self.detail.as_deref().and_then(|d| d.downcast_ref())
    }
}

impl std::fmt::Debug for DialogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogEvent")
            .field("name", &self.name())
            .field("target", &self.target)
            .field("handled", &self.handled)
            .finish()
    }
}

type Handler = Box<dyn FnMut(&mut DialogEvent)>;

struct Subscription {
    /// `None` subscribes to every event name.
    name: Option<String>,
    handler: Handler,
}

impl Subscription {
    fn matches(&self, name: &str) -> bool {
        self.name.as_deref().map(|n| n == name).unwrap_or(true)
    }
}

/// Dispatches [`DialogEvent`]s to scoped and global subscribers.
#[derive(Default)]
pub struct EventBus {
    global: Vec<Subscription>,
    scoped: SecondaryMap<NodeId, Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of one name, document-wide. Pass `None` to hear
    /// everything.
    pub fn subscribe(&mut self, name: Option<&str>, handler: impl FnMut(&mut DialogEvent) + 'static) {
        self.global.push(Subscription {
            name: name.map(str::to_owned),
            handler: Box::new(handler),
        });
    }

    /// Subscribe to events reaching `node` (as target or by bubbling).
    pub fn subscribe_node(
        &mut self,
        node: NodeId,
        name: Option<&str>,
        handler: impl FnMut(&mut DialogEvent) + 'static,
    ) {
        if let Some(entry) = self.scoped.entry(node) {
            entry.or_default().push(Subscription {
                name: name.map(str::to_owned),
                handler: Box::new(handler),
            });
        }
    }

    /// Drop all subscriptions scoped to `node`.
    pub fn unsubscribe_node(&mut self, node: NodeId) {
        self.scoped.remove(node);
    }

    /// Dispatch an event: the target's subscribers first, then each
    /// ancestor's, then the global ones. Stops as soon as a handler marks
    /// the event handled. Returns the event for outcome inspection.
    pub fn emit(&mut self, dom: &Dom, mut event: DialogEvent) -> DialogEvent {
        let name = event.name();
        trace!(target: "casement::event", %name, "emit");

        let mut path = vec![event.target];
        path.extend(dom.ancestors(event.target));

        for node in path {
            if let Some(subs) = self.scoped.get_mut(node) {
                for sub in subs.iter_mut() {
                    if sub.matches(&name) {
                        (sub.handler)(&mut event);
                        if event.handled {
                            return event;
                        }
                    }
                }
            }
        }
        for sub in self.global.iter_mut() {
            if sub.matches(&name) {
                (sub.handler)(&mut event);
                if event.handled {
                    break;
                }
            }
        }
        event
    }
}

// ===========================================================================
// Tests
// ===========================================================================

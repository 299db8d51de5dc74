//! The element lifecycle state machine.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::dom::{Dom, MutationKind, NodeId};
use crate::geometry::{Offset, Size};
use crate::style::{classify_visibility, VisibilityState};

use super::watcher::{PositionWatcher, SizeWatcher};

/// Lifecycle phase of an observed element, as last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not yet attached under the body.
    Unattached,
    /// Attached; last reported rendered.
    Rendered,
    /// Attached but classified hidden.
    Hidden,
    /// Detached from its parent. Terminal.
    Removed,
}

/// Tuning knobs for an observer.
#[derive(Debug, Clone, Copy)]
pub struct ObserveConfig {
    /// How often to poll for attachment while unattached.
    pub poll_interval: Duration,
    /// How many attachment polls to attempt before giving up.
    pub max_poll_attempts: u32,
    /// Throttle interval for position (drag) reports.
    pub drag_throttle: Duration,
    /// Throttle interval for size (resize) reports.
    pub resize_throttle: Duration,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            max_poll_attempts: 600,
            drag_throttle: Duration::from_millis(200),
            resize_throttle: Duration::from_millis(200),
        }
    }
}

type PhaseCallback = Box<dyn FnMut(NodeId)>;

/// Callbacks fired by an [`ElementObserver`]. All are optional; build with
/// the `on_*` methods.
#[derive(Default)]
pub struct LifecycleCallbacks {
    created: Option<PhaseCallback>,
    rendered: Option<PhaseCallback>,
    hidden: Option<PhaseCallback>,
    removed: Option<PhaseCallback>,
    dragged: Option<Box<dyn FnMut(NodeId, Offset)>>,
    resized: Option<Box<dyn FnMut(NodeId, Size)>>,
}

impl LifecycleCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired synchronously when observation starts.
    pub fn on_created(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.created = Some(Box::new(f));
        self
    }

    /// Fired once when the element becomes attached, and again on every
    /// return from the hidden state.
    pub fn on_rendered(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.rendered = Some(Box::new(f));
        self
    }

    /// Fired when a visible element is classified hidden.
    pub fn on_hidden(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.hidden = Some(Box::new(f));
        self
    }

    /// Fired exactly once when the element is detached from its parent.
    pub fn on_removed(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.removed = Some(Box::new(f));
        self
    }

    /// Fired (throttled) when the element's absolute position changed.
    pub fn on_dragged(mut self, f: impl FnMut(NodeId, Offset) + 'static) -> Self {
        self.dragged = Some(Box::new(f));
        self
    }

    /// Fired (throttled) when the element's resizable region changed size.
    pub fn on_resized(mut self, f: impl FnMut(NodeId, Size) + 'static) -> Self {
        self.resized = Some(Box::new(f));
        self
    }
}

enum State {
    /// Waiting for the element to gain a parent.
    Pending {
        attempts_left: u32,
        last_poll: Option<Instant>,
    },
    /// Attached; replaying the mutation journal from `cursor`.
    Attached {
        parent: NodeId,
        cursor: u64,
        visible: bool,
        position: PositionWatcher,
        size: Option<SizeWatcher>,
    },
    /// Observation over. No further callbacks.
    Disconnected,
}

/// Observes one element's lifecycle. Drive with [`ElementObserver::tick`].
pub struct ElementObserver {
    target: NodeId,
    callbacks: LifecycleCallbacks,
    config: ObserveConfig,
    state: State,
    phase: Phase,
}

impl ElementObserver {
    /// Begin observing `target`. The `created` callback fires synchronously
    /// before this returns, whether or not the element is attached yet.
    pub fn observe(
        dom: &Dom,
        target: NodeId,
        mut callbacks: LifecycleCallbacks,
        config: ObserveConfig,
    ) -> Self {
        if let Some(f) = callbacks.created.as_mut() {
            f(target);
        }

        let mut observer = Self {
            target,
            callbacks,
            config,
            state: State::Pending {
                attempts_left: config.max_poll_attempts,
                last_poll: None,
            },
            phase: Phase::Unattached,
        };
        // Skip the first poll delay when the element is already in the tree.
        if dom.is_attached(target) {
            observer.attach(dom);
        }
        observer
    }

    /// The observed element.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The last reported phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether observation has ended (removal, disconnect, or budget
    /// exhaustion).
    pub fn is_disconnected(&self) -> bool {
        matches!(self.state, State::Disconnected)
    }

    /// Stop observing. Deterministic: no callback fires after this returns.
    pub fn disconnect(&mut self) {
        self.state = State::Disconnected;
    }

    /// Advance the observer to `now`.
    pub fn tick(&mut self, dom: &Dom, now: Instant) {
        match &mut self.state {
            State::Pending {
                attempts_left,
                last_poll,
            } => {
                if let Some(last) = *last_poll {
                    if now.duration_since(last) < self.config.poll_interval {
                        return;
                    }
                }
                *last_poll = Some(now);

                if dom.is_attached(self.target) {
                    self.attach(dom);
                    return;
                }

                *attempts_left = attempts_left.saturating_sub(1);
                if *attempts_left == 0 {
                    warn!(
                        target: "casement::observe",
                        attempts = self.config.max_poll_attempts,
                        "element never attached, giving up"
                    );
                    self.state = State::Disconnected;
                }
            }
            State::Attached { .. } => self.tick_attached(dom, now),
            State::Disconnected => {}
        }
    }

    /// Transition from pending to attached. Insertion always counts as
    /// rendered, whatever the computed style says; a hidden arrival is
    /// picked up by the first style batch afterwards.
    fn attach(&mut self, dom: &Dom) {
        let parent = match dom.parent(self.target) {
            Some(p) => p,
            None => return,
        };

        let position = PositionWatcher::new(dom, self.target, self.config.drag_throttle);
        let size = dom
            .resizable_descendant(self.target)
            .map(|n| SizeWatcher::new(dom, n, self.config.resize_throttle));

        self.state = State::Attached {
            parent,
            cursor: dom.journal_cursor(),
            visible: true,
            position,
            size,
        };

        debug!(target: "casement::observe", "element attached");
        self.phase = Phase::Rendered;
        if let Some(f) = self.callbacks.rendered.as_mut() {
            f(self.target);
        }
    }

    fn tick_attached(&mut self, dom: &Dom, now: Instant) {
        let (parent, cursor) = match &self.state {
            State::Attached { parent, cursor, .. } => (*parent, *cursor),
            _ => return,
        };

        let batch: Vec<_> = dom.mutations_since(cursor).to_vec();
        let new_cursor = dom.journal_cursor();

        // Removal ends observation before anything else in the batch is
        // considered.
        let removed = batch.iter().any(|r| match &r.kind {
            MutationKind::ChildList {
                parent: p, removed, ..
            } => *p == parent && removed.contains(&self.target),
            _ => false,
        }) || !dom.contains(self.target);
        if removed {
            self.phase = Phase::Removed;
            self.state = State::Disconnected;
            if let Some(f) = self.callbacks.removed.as_mut() {
                f(self.target);
            }
            return;
        }

        // A whole batch yields at most one visibility transition. Attribute
        // edits anywhere in the target's subtree trigger re-classification
        // of the target itself.
        let style_touched = batch.iter().any(|r| match &r.kind {
            MutationKind::Attributes { target, .. } => {
                dom.contains(*target) && dom.in_subtree(self.target, *target)
            }
            _ => false,
        });

        let mut fire_rendered = false;
        let mut fire_hidden = false;
        if style_touched {
            let now_visible = self.classify(dom) == VisibilityState::Visible;
            if let State::Attached { visible, .. } = &mut self.state {
                if now_visible != *visible {
                    *visible = now_visible;
                    if now_visible {
                        fire_rendered = true;
                    } else {
                        fire_hidden = true;
                    }
                }
            }
        }

        let mut drag_report = None;
        let mut resize_report = None;
        if let State::Attached {
            cursor,
            position,
            size,
            ..
        } = &mut self.state
        {
            *cursor = new_cursor;

            if let Some(offset) = position.poll(dom, now) {
                drag_report = Some(offset);
            }

            if size.is_none() {
                *size = dom
                    .resizable_descendant(self.target)
                    .map(|n| SizeWatcher::new(dom, n, self.config.resize_throttle));
            }
            if let Some(watcher) = size.as_mut() {
                if let Some(new_size) = watcher.poll(dom, now) {
                    resize_report = Some((watcher.target(), new_size));
                }
            }
        }

        if fire_rendered {
            self.phase = Phase::Rendered;
            if let Some(f) = self.callbacks.rendered.as_mut() {
                f(self.target);
            }
        }
        if fire_hidden {
            self.phase = Phase::Hidden;
            if let Some(f) = self.callbacks.hidden.as_mut() {
                f(self.target);
            }
        }
        if let Some(offset) = drag_report {
            if let Some(f) = self.callbacks.dragged.as_mut() {
                f(self.target, offset);
            }
        }
        if let Some((node, new_size)) = resize_report {
            if let Some(f) = self.callbacks.resized.as_mut() {
                f(node, new_size);
            }
        }
    }

    fn classify(&self, dom: &Dom) -> VisibilityState {
        dom.computed_style(self.target)
            .map(|c| classify_visibility(&c))
            .unwrap_or(VisibilityState::Hidden)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

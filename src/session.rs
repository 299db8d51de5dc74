//! The dialog session: single-threaded cooperative driver.
//!
//! `DialogSession` owns the DOM, the component host, the event bus, the
//! timer queue, and every live observer and drag controller. All progress
//! happens through [`DialogSession::tick`], which takes an explicit
//! `Instant` so tests drive virtual time; [`DialogSession::run`] is the
//! async driver that supplies real time and terminal input on top.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use slotmap::SecondaryMap;
use tracing::{debug, error};

use crate::dom::{Dom, NodeId};
use crate::drag::DragController;
use crate::event::{
    DialogEvent, DialogPhase, EventBus, InputEvent, Key, MouseAction, MouseBtn,
};
use crate::geometry::Size;
use crate::host::{ComponentHost, HostPhase, OverlayHost};
use crate::i18n::{Lang, Lexicon};
use crate::observe::{ElementObserver, LifecycleCallbacks, ObserveConfig};
use crate::request::{is_url_or_path, NullRequester, Requester};

/// Delay between hiding a dialog and detaching its nodes, standing in for
/// the fade-out transition.
pub const CLOSE_DELAY: Duration = Duration::from_millis(300);

/// How long an activated button stays locked against replayed activations.
pub const REPLAY_LOCK: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

type TimerAction = Box<dyn FnOnce(&mut DialogSession)>;

/// One-shot timers ordered by due instant.
#[derive(Default)]
pub struct TimerQueue {
    entries: Vec<(Instant, TimerAction)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run at the first tick at or after `due`.
    pub fn schedule(&mut self, due: Instant, action: impl FnOnce(&mut DialogSession) + 'static) {
        self.entries.push((due, Box::new(action)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return all due actions, oldest first.
    fn take_due(&mut self, now: Instant) -> Vec<TimerAction> {
        let mut due: Vec<(Instant, TimerAction)> = Vec::new();
        let mut rest = Vec::new();
        for (at, action) in self.entries.drain(..) {
            if at <= now {
                due.push((at, action));
            } else {
                rest.push((at, action));
            }
        }
        self.entries = rest;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, a)| a).collect()
    }
}

// ---------------------------------------------------------------------------
// DialogSession
// ---------------------------------------------------------------------------

/// Bookkeeping for one open component.
struct ComponentMeta {
    kind: &'static str,
    backdrop: Option<NodeId>,
    dismissable: bool,
}

/// Owns the DOM and drives every dialog in it.
pub struct DialogSession {
    dom: Dom,
    host: Box<dyn ComponentHost>,
    bus: EventBus,
    timers: TimerQueue,
    observers: Vec<ElementObserver>,
    drags: Vec<DragController>,
    /// Button activations. The slot is `None` while its action is running.
    actions: SecondaryMap<NodeId, Option<Box<dyn FnMut(&mut DialogSession)>>>,
    components: SecondaryMap<NodeId, ComponentMeta>,
    /// Cleanup hooks run when a component's nodes are gone.
    finishers: SecondaryMap<NodeId, Box<dyn FnOnce(&mut DialogSession)>>,
    /// Open component roots in opening order; last is topmost.
    stack: Vec<NodeId>,
    /// Loading overlays, keyed by the target they cover.
    loading: SecondaryMap<NodeId, NodeId>,
    /// Lifecycle events queued by observer callbacks, drained each tick.
    outbox: Rc<RefCell<Vec<DialogEvent>>>,
    focused_input: Option<NodeId>,
    /// Button activated by the Enter key while an input has focus.
    submit_button: Option<NodeId>,
    viewport: Size,
    lexicon: Lexicon,
    requester: Box<dyn Requester>,
    observe_config: ObserveConfig,
    /// Time of the most recent tick, used when scheduling timers outside
    /// of one.
    clock: Instant,
}

impl DialogSession {
    /// Create a session for the given viewport, with the built-in overlay
    /// host and no network transport.
    pub fn new(viewport: Size) -> Self {
        Self {
            dom: Dom::new(),
            host: Box::new(OverlayHost::new()),
            bus: EventBus::new(),
            timers: TimerQueue::new(),
            observers: Vec::new(),
            drags: Vec::new(),
            actions: SecondaryMap::new(),
            components: SecondaryMap::new(),
            finishers: SecondaryMap::new(),
            stack: Vec::new(),
            loading: SecondaryMap::new(),
            outbox: Rc::default(),
            focused_input: None,
            submit_button: None,
            viewport,
            lexicon: Lexicon::default(),
            requester: Box::new(NullRequester),
            observe_config: ObserveConfig::default(),
            clock: Instant::now(),
        }
    }

    /// Swap in a custom component host (builder).
    pub fn with_host(mut self, host: impl ComponentHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Swap in a content requester (builder).
    pub fn with_requester(mut self, requester: impl Requester + 'static) -> Self {
        self.requester = Box::new(requester);
        self
    }

    /// Set the interface language (builder).
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lexicon = Lexicon::new(lang);
        self
    }

    /// Tune observer intervals and budgets (builder).
    pub fn with_observe_config(mut self, config: ObserveConfig) -> Self {
        self.observe_config = config;
        self
    }

    // -- accessors ----------------------------------------------------------

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn lexicon(&self) -> Lexicon {
        self.lexicon
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Time of the most recent tick.
    pub fn now(&self) -> Instant {
        self.clock
    }

    /// Whether any component is still open.
    pub fn has_open_components(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The topmost open component root, if any.
    pub fn topmost(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    // -- component plumbing (used by the factories) -------------------------

    /// Resolve dialog content: literal text passes through, URLs and paths
    /// are fetched through the requester, with failures rendered inline.
    pub fn resolve_content(&mut self, content: &str) -> String {
        if !is_url_or_path(content) {
            return content.to_owned();
        }
        let result = self.requester.get(content);
        if result.is_success {
            result.content
        } else {
            error!(target: "casement::session", location = content, "content load failed");
            match result.status_code {
                Some(code) => format!("Failed to load content ({code})"),
                None => "Failed to load content".to_owned(),
            }
        }
    }

    /// Observe `root` as a component of `kind`: every lifecycle phase is
    /// queued as a `csm:{kind}:{phase}` event and dispatched on the next
    /// tick.
    pub fn observe_component(&mut self, kind: &'static str, root: NodeId) {
        let queue = move |phase: DialogPhase, outbox: &Rc<RefCell<Vec<DialogEvent>>>| {
            let outbox = Rc::clone(outbox);
            move |node: NodeId| {
                outbox
                    .borrow_mut()
                    .push(DialogEvent::new(kind, phase, node));
            }
        };
        let outbox = &self.outbox;
        let drag_outbox = Rc::clone(outbox);
        let resize_outbox = Rc::clone(outbox);
        let callbacks = LifecycleCallbacks::new()
            .on_created(queue(DialogPhase::Created, outbox))
            .on_rendered(queue(DialogPhase::Rendered, outbox))
            .on_hidden(queue(DialogPhase::Hidden, outbox))
            .on_removed(queue(DialogPhase::Removed, outbox))
            .on_dragged(move |node, offset| {
                drag_outbox
                    .borrow_mut()
                    .push(DialogEvent::new(kind, DialogPhase::Dragged, node).with_detail(offset));
            })
            .on_resized(move |node, size| {
                resize_outbox
                    .borrow_mut()
                    .push(DialogEvent::new(kind, DialogPhase::Resized, node).with_detail(size));
            });

        let observer = ElementObserver::observe(&self.dom, root, callbacks, self.observe_config);
        self.observers.push(observer);
    }

    /// Register an open component for close handling and host event naming.
    pub fn register_component(
        &mut self,
        root: NodeId,
        kind: &'static str,
        backdrop: Option<NodeId>,
        dismissable: bool,
    ) {
        self.components.insert(
            root,
            ComponentMeta {
                kind,
                backdrop,
                dismissable,
            },
        );
        self.stack.push(root);
    }

    /// Schedule a one-shot action `delay` after the most recent tick.
    pub fn schedule_in(&mut self, delay: Duration, action: impl FnOnce(&mut DialogSession) + 'static) {
        self.timers.schedule(self.clock + delay, action);
    }

    /// Dispatch an event on the bus.
    pub fn emit(&mut self, event: DialogEvent) -> DialogEvent {
        self.bus.emit(&self.dom, event)
    }

    /// Run `cleanup` once the component's nodes have been detached.
    pub fn on_component_finish(&mut self, root: NodeId, cleanup: impl FnOnce(&mut DialogSession) + 'static) {
        self.finishers.insert(root, Box::new(cleanup));
    }

    /// Bind an activation to a button node.
    pub fn register_action(&mut self, button: NodeId, action: impl FnMut(&mut DialogSession) + 'static) {
        self.actions.insert(button, Some(Box::new(action)));
    }

    /// Hand a drag controller to the session to feed from input.
    pub fn register_drag(&mut self, controller: DragController) {
        self.drags.push(controller);
    }

    /// Give keyboard focus to a text input, with Enter activating `submit`.
    pub fn focus_input(&mut self, input: NodeId, submit: NodeId) {
        self.focused_input = Some(input);
        self.submit_button = Some(submit);
    }

    /// Mark `target` as covered by a loading overlay. Returns false if it
    /// already was.
    pub fn claim_loading(&mut self, target: NodeId, overlay: NodeId) -> bool {
        if self.loading.contains_key(target) {
            return false;
        }
        self.loading.insert(target, overlay);
        true
    }

    /// The loading overlay covering `target`, if any.
    pub fn loading_overlay(&self, target: NodeId) -> Option<NodeId> {
        self.loading.get(target).copied()
    }

    /// Release the loading claim on `target`, returning its overlay.
    pub fn release_loading(&mut self, target: NodeId) -> Option<NodeId> {
        self.loading.remove(target)
    }

    /// Show `node` through the host.
    pub fn host_show(&mut self, component: &'static str, node: NodeId) -> crate::error::Result<()> {
        match self.host.get_or_create_instance(&mut self.dom, node) {
            Some(instance) => {
                self.host.show(&mut self.dom, instance);
                Ok(())
            }
            None => {
                error!(target: "casement::session", component, "host has no instance for component root");
                Err(crate::error::CasementError::HostUnavailable { component })
            }
        }
    }

    /// Hide `node` through the host.
    pub fn host_hide(&mut self, node: NodeId) {
        if let Some(instance) = self.host.get_or_create_instance(&mut self.dom, node) {
            self.host.hide(&mut self.dom, instance);
        }
    }

    /// Close an open component: hide it now, detach it after the close
    /// delay. The observer reports `hidden` on the next tick and `removed`
    /// once the nodes are detached.
    pub fn close(&mut self, root: NodeId) {
        if !self.components.contains_key(root) {
            return;
        }
        debug!(target: "casement::session", "closing component");
        self.host_hide(root);

        if let Some(focused) = self.focused_input {
            if self.dom.in_subtree(root, focused) {
                self.focused_input = None;
                self.submit_button = None;
            }
        }

        self.timers.schedule(self.clock + CLOSE_DELAY, move |session| {
            let backdrop = session
                .components
                .get(root)
                .and_then(|meta| meta.backdrop);
            if let Some(backdrop) = backdrop {
                session.dom.remove(backdrop);
            }
            session.dom.remove(root);
        });
    }

    /// Activate a button: run its action behind the replay lock.
    pub fn activate(&mut self, button: NodeId) {
        let locked = match self.dom.get(button) {
            Some(node) => node.disabled,
            None => return,
        };
        if locked {
            debug!(target: "casement::session", "activation ignored, button locked");
            return;
        }

        self.dom.set_disabled(button, true);
        self.timers.schedule(self.clock + REPLAY_LOCK, move |session| {
            if session.dom.contains(button) {
                session.dom.set_disabled(button, false);
            }
        });

        // The slot is emptied while the action runs so the action can take
        // `&mut self` without aliasing its own storage.
        let Some(slot) = self.actions.get_mut(button) else {
            return;
        };
        let Some(mut action) = slot.take() else {
            return;
        };
        action(self);
        if let Some(slot) = self.actions.get_mut(button) {
            if slot.is_none() {
                *slot = Some(action);
            }
        }
    }

    // -- driving ------------------------------------------------------------

    /// Advance the session to `now`: run due timers, pump observers, flush
    /// lifecycle and host events onto the bus, prune finished machinery.
    pub fn tick(&mut self, now: Instant) {
        self.clock = now;

        for action in self.timers.take_due(now) {
            action(self);
        }

        for observer in &mut self.observers {
            observer.tick(&self.dom, now);
        }

        let lifecycle: Vec<DialogEvent> = self.outbox.borrow_mut().drain(..).collect();
        for event in lifecycle {
            let target = event.target;
            let terminal = event.phase == DialogPhase::Removed;
            self.bus.emit(&self.dom, event);
            if terminal {
                self.finish_component(target);
            }
        }

        let host_events = self.host.drain_phase_events();
        for host_event in host_events {
            let kind = self
                .components
                .get(host_event.node)
                .map(|meta| meta.kind)
                .unwrap_or("dialog");
            let phase = match host_event.phase {
                HostPhase::Show => DialogPhase::Show,
                HostPhase::Shown => DialogPhase::Shown,
                HostPhase::Hide => DialogPhase::Hide,
                HostPhase::Hidden => DialogPhase::Hidden,
            };
            self.bus
                .emit(&self.dom, DialogEvent::new(kind, phase, host_event.node));
        }

        self.observers.retain(|o| !o.is_disconnected());
        self.drags.retain(|d| d.is_live(&self.dom));
        if self.observers.is_empty() {
            let cursor = self.dom.journal_cursor();
            self.dom.compact_journal(cursor);
        }
    }

    /// Route one input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Mouse(mouse) => {
                let viewport = self.viewport;
                let mut drags = std::mem::take(&mut self.drags);
                let consumed = if mouse.kind == MouseAction::Down(MouseBtn::Left) {
                    // When handles overlap, the press goes to the topmost
                    // dialog. Later nodes in walk order overlay earlier
                    // ones, as in hit_test_action.
                    let order = self.dom.walk_depth_first(self.dom.body());
                    let grabbed = drags
                        .iter_mut()
                        .filter(|d| self.dom.absolute_rect(d.handle()).contains(mouse.x, mouse.y))
                        .max_by_key(|d| order.iter().position(|&n| n == d.target()));
                    match grabbed {
                        Some(d) => d.on_mouse(&mut self.dom, mouse, viewport),
                        None => false,
                    }
                } else {
                    drags
                        .iter_mut()
                        .any(|d| d.on_mouse(&mut self.dom, mouse, viewport))
                };
                self.drags = drags;
                if consumed {
                    return;
                }
                if mouse.kind == MouseAction::Down(MouseBtn::Left) {
                    if let Some(button) = self.hit_test_action(mouse.x, mouse.y) {
                        self.activate(button);
                    }
                }
            }
            InputEvent::Key(key) => match key.code {
                Key::Escape => self.dismiss_topmost(),
                Key::Enter => {
                    if let Some(submit) = self.submit_button {
                        self.activate(submit);
                    }
                }
                Key::Char(c) => {
                    if let Some(input) = self.focused_input {
                        if let Some(node) = self.dom.get_mut(input) {
                            node.text.push(c);
                        }
                    }
                }
                Key::Backspace => {
                    if let Some(input) = self.focused_input {
                        if let Some(node) = self.dom.get_mut(input) {
                            node.text.pop();
                        }
                    }
                }
                _ => {}
            },
            InputEvent::Resize(size) => self.viewport = size,
            InputEvent::Paste(text) => {
                if let Some(input) = self.focused_input {
                    if let Some(node) = self.dom.get_mut(input) {
                        node.text.push_str(&text);
                    }
                }
            }
            InputEvent::FocusGained | InputEvent::FocusLost => {}
        }
    }

    /// Run the session against the real terminal until every component is
    /// closed, polling crossterm input and ticking on an interval.
    pub async fn run(&mut self, tick_rate: Duration) -> std::io::Result<()> {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            while crossterm::event::poll(Duration::ZERO)? {
                let event = crossterm::event::read()?;
                self.handle_input(InputEvent::from(event));
            }
            self.tick(Instant::now());
            if !self.has_open_components() && self.timers.is_empty() {
                return Ok(());
            }
        }
    }

    // -- internals ----------------------------------------------------------

    /// Topmost action button under the pointer. Later nodes in walk order
    /// overlay earlier ones.
    fn hit_test_action(&self, x: i32, y: i32) -> Option<NodeId> {
        self.dom
            .walk_depth_first(self.dom.body())
            .into_iter()
            .filter(|&n| self.actions.contains_key(n))
            .filter(|&n| self.dom.absolute_rect(n).contains(x, y))
            .last()
    }

    /// Close the topmost keyboard-dismissable component, if any.
    fn dismiss_topmost(&mut self) {
        let target = self
            .stack
            .iter()
            .rev()
            .copied()
            .find(|&root| {
                self.components
                    .get(root)
                    .map(|meta| meta.dismissable)
                    .unwrap_or(false)
            });
        if let Some(root) = target {
            self.close(root);
        }
    }

    /// Forget everything about a component whose nodes are gone.
    fn finish_component(&mut self, root: NodeId) {
        if let Some(cleanup) = self.finishers.remove(root) {
            cleanup(self);
        }
        if let Some(meta) = self.components.remove(root) {
            if let Some(backdrop) = meta.backdrop {
                self.dom.remove(backdrop);
            }
        }
        self.stack.retain(|&r| r != root);
        self.bus.unsubscribe_node(root);
        let covered: Vec<NodeId> = self
            .loading
            .iter()
            .filter(|(_, overlay)| **overlay == root)
            .map(|(target, _)| target)
            .collect();
        for target in covered {
            self.loading.remove(target);
        }
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
    use crate::event::{KeyEvent, MouseEvent};
    use crate::geometry::Offset;

    const VIEWPORT: Size = Size::new(80, 24);

    fn session() -> DialogSession {
        DialogSession::new(VIEWPORT)
    }

    #[test]
    fn timer_queue_runs_due_in_order() {
        let mut s = session();
        let t0 = s.now();
        let log: Rc<RefCell<Vec<u32>>> = Rc::default();

        let l = Rc::clone(&log);
        s.timers.schedule(t0 + Duration::from_millis(50), move |_| l.borrow_mut().push(2));
        let l = Rc::clone(&log);
        s.timers.schedule(t0 + Duration::from_millis(10), move |_| l.borrow_mut().push(1));
        let l = Rc::clone(&log);
        s.timers.schedule(t0 + Duration::from_millis(500), move |_| l.borrow_mut().push(3));

        s.tick(t0 + Duration::from_millis(100));
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(s.timers.len(), 1);

        s.tick(t0 + Duration::from_millis(600));
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert!(s.timers.is_empty());
    }

    #[test]
    fn timer_action_can_reschedule() {
        let mut s = session();
        let t0 = s.now();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();

        let l = Rc::clone(&log);
        s.timers.schedule(t0, move |session| {
            l.borrow_mut().push("first");
            let l2 = Rc::clone(&l);
            let due = session.now() + Duration::from_millis(10);
            session.timers.schedule(due, move |_| l2.borrow_mut().push("second"));
        });

        s.tick(t0);
        assert_eq!(*log.borrow(), vec!["first"]);
        s.tick(t0 + Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn activate_runs_action_once_within_lock_window() {
        let mut s = session();
        let t0 = s.now();
        let btn = {
            let body = s.dom.body();
            s.dom.create_child(body, NodeData::new("btn").sized(Size::new(6, 1)))
        };
        let hits: Rc<RefCell<u32>> = Rc::default();
        let h = Rc::clone(&hits);
        s.register_action(btn, move |_| *h.borrow_mut() += 1);

        s.activate(btn);
        s.activate(btn); // locked
        assert_eq!(*hits.borrow(), 1);
        assert!(s.dom.get(btn).unwrap().disabled);

        // Lock expires, button works again.
        s.tick(t0 + REPLAY_LOCK);
        assert!(!s.dom.get(btn).unwrap().disabled);
        s.activate(btn);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn click_hits_topmost_button() {
        let mut s = session();
        let body = s.dom.body();
        let under = s
            .dom
            .create_child(body, NodeData::new("btn").at(Offset::new(5, 5)).sized(Size::new(10, 1)));
        let over = s
            .dom
            .create_child(body, NodeData::new("btn").at(Offset::new(5, 5)).sized(Size::new(10, 1)));

        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let l = Rc::clone(&log);
        s.register_action(under, move |_| l.borrow_mut().push("under"));
        let l = Rc::clone(&log);
        s.register_action(over, move |_| l.borrow_mut().push("over"));

        s.handle_input(InputEvent::Mouse(MouseEvent::new(
            MouseAction::Down(MouseBtn::Left),
            7,
            5,
        )));
        assert_eq!(*log.borrow(), vec!["over"]);
    }

    #[test]
    fn drag_press_grabs_topmost_of_overlapping_dialogs() {
        use crate::drag::DragLimits;

        let mut s = session();
        let body = s.dom.body();
        let mut make = |s: &mut DialogSession| {
            let dialog = s.dom.create_child(
                body,
                NodeData::new("modal").at(Offset::new(10, 4)).sized(Size::new(30, 10)),
            );
            let header = s
                .dom
                .create_child(dialog, NodeData::new("modal-header").sized(Size::new(30, 1)));
            let ctl = DragController::new(&mut s.dom, dialog, header, DragLimits::default());
            s.register_drag(ctl);
            dialog
        };
        let under = make(&mut s);
        let over = make(&mut s);

        // Both headers cover (15, 4); the later-opened dialog gets the grab.
        s.handle_input(InputEvent::Mouse(MouseEvent::new(
            MouseAction::Down(MouseBtn::Left),
            15,
            4,
        )));
        s.handle_input(InputEvent::Mouse(MouseEvent::new(
            MouseAction::Drag(MouseBtn::Left),
            18,
            6,
        )));
        s.handle_input(InputEvent::Mouse(MouseEvent::new(
            MouseAction::Up(MouseBtn::Left),
            18,
            6,
        )));

        assert_eq!(s.dom.get(over).unwrap().offset, Offset::new(13, 6));
        assert_eq!(s.dom.get(under).unwrap().offset, Offset::new(10, 4));
    }

    #[test]
    fn click_outside_buttons_does_nothing() {
        let mut s = session();
        let body = s.dom.body();
        let btn = s
            .dom
            .create_child(body, NodeData::new("btn").at(Offset::new(5, 5)).sized(Size::new(4, 1)));
        let hits: Rc<RefCell<u32>> = Rc::default();
        let h = Rc::clone(&hits);
        s.register_action(btn, move |_| *h.borrow_mut() += 1);

        s.handle_input(InputEvent::Mouse(MouseEvent::new(
            MouseAction::Down(MouseBtn::Left),
            20,
            20,
        )));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn escape_closes_topmost_dismissable() {
        let mut s = session();
        let body = s.dom.body();
        let stubborn = s.dom.create_child(body, NodeData::new("modal"));
        let polite = s.dom.create_child(body, NodeData::new("modal"));
        s.register_component(stubborn, "modal", None, false);
        s.register_component(polite, "modal", None, true);
        let t0 = s.now();

        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Escape)));
        s.tick(t0 + CLOSE_DELAY);
        assert!(!s.dom.contains(polite));
        assert!(s.dom.contains(stubborn));
    }

    #[test]
    fn close_detaches_after_delay_with_backdrop() {
        let mut s = session();
        let body = s.dom.body();
        let backdrop = s.dom.create_child(body, NodeData::new("backdrop"));
        let root = s.dom.create_child(body, NodeData::new("modal"));
        s.register_component(root, "modal", Some(backdrop), true);
        let t0 = s.now();

        s.close(root);
        assert!(s.dom.contains(root));
        s.tick(t0 + Duration::from_millis(10));
        assert!(s.dom.contains(root));
        s.tick(t0 + CLOSE_DELAY);
        assert!(!s.dom.contains(root));
        assert!(!s.dom.contains(backdrop));
    }

    #[test]
    fn removed_lifecycle_event_finishes_component() {
        let mut s = session();
        let body = s.dom.body();
        let root = s.dom.create_child(body, NodeData::new("toast"));
        s.register_component(root, "toast", None, false);
        s.observe_component("toast", root);
        let t0 = s.now();

        let removals: Rc<RefCell<u32>> = Rc::default();
        let r = Rc::clone(&removals);
        s.bus_mut()
            .subscribe(Some("csm:toast:removed"), move |_| *r.borrow_mut() += 1);

        s.close(root);
        s.tick(t0 + CLOSE_DELAY);
        s.tick(t0 + CLOSE_DELAY + Duration::from_millis(10));
        assert_eq!(*removals.borrow(), 1);
        assert!(!s.has_open_components());
    }

    #[test]
    fn typed_characters_reach_focused_input() {
        let mut s = session();
        let body = s.dom.body();
        let input = s.dom.create_child(body, NodeData::new("input"));
        let submit = s.dom.create_child(body, NodeData::new("btn"));
        s.focus_input(input, submit);

        for c in ['h', 'i'] {
            s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Char(c))));
        }
        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Backspace)));
        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Char('o'))));
        assert_eq!(s.dom.get(input).unwrap().text, "ho");
    }

    #[test]
    fn enter_activates_submit_button() {
        let mut s = session();
        let body = s.dom.body();
        let input = s.dom.create_child(body, NodeData::new("input"));
        let submit = s.dom.create_child(body, NodeData::new("btn"));
        s.focus_input(input, submit);

        let hits: Rc<RefCell<u32>> = Rc::default();
        let h = Rc::clone(&hits);
        s.register_action(submit, move |_| *h.borrow_mut() += 1);
        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Enter)));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut s = session();
        s.handle_input(InputEvent::Resize(Size::new(120, 40)));
        assert_eq!(s.viewport(), Size::new(120, 40));
    }

    #[test]
    fn resolve_content_passes_literals_and_fetches_paths() {
        use crate::request::StaticRequester;
        let mut s = DialogSession::new(VIEWPORT)
            .with_requester(StaticRequester::new().with_route("/terms", "fine print"));
        assert_eq!(s.resolve_content("Are you sure?"), "Are you sure?");
        assert_eq!(s.resolve_content("/terms"), "fine print");
        assert_eq!(s.resolve_content("/missing"), "Failed to load content (404)");
    }

    #[test]
    fn disconnected_observers_are_pruned() {
        let mut s = session();
        let body = s.dom.body();
        let root = s.dom.create_child(body, NodeData::new("modal"));
        s.observe_component("modal", root);
        assert_eq!(s.observers.len(), 1);
        let t0 = s.now();

        s.dom.remove(root);
        s.tick(t0 + Duration::from_millis(10));
        assert!(s.observers.is_empty());
    }
}

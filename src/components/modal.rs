//! The generic modal dialog: status strip, header, body, optional footer.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::dom::{NodeData, NodeId};
use crate::drag::{DragController, DragLimits};
use crate::error::Result;
use crate::event::{DialogEvent, DialogPhase};
use crate::geometry::{Offset, Size};
use crate::i18n::Term;
use crate::resize::make_resizable;
use crate::session::DialogSession;
use crate::style::Styles;
use crate::util::text_tone_for_background;

use super::{backdrop_node, centered_offset, hidden_root, DialogHandle, DialogSize, Tone};

type SessionHook = Box<dyn FnMut(&mut DialogSession)>;
type EventHook = Box<dyn FnMut(&mut DialogEvent)>;

/// Options for [`open`]. Defaults: medium, centered, backdrop, keyboard
/// dismiss and dragging enabled, footer shown.
pub struct ModalOptions {
    pub title: Option<String>,
    pub tone: Option<Tone>,
    pub size: DialogSize,
    pub id: Option<String>,
    pub centered: bool,
    pub backdrop: bool,
    pub keyboard: bool,
    pub draggable: bool,
    pub resizable: bool,
    pub footer: bool,
    pub ok_text: Option<String>,
    pub cancel_text: Option<String>,
    on_ok: Option<SessionHook>,
    on_cancel: Option<SessionHook>,
    on_shown: Option<EventHook>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: None,
            tone: None,
            size: DialogSize::Md,
            id: None,
            centered: true,
            backdrop: true,
            keyboard: true,
            draggable: true,
            resizable: false,
            footer: true,
            ok_text: None,
            cancel_text: None,
            on_ok: None,
            on_cancel: None,
            on_shown: None,
        }
    }
}

impl ModalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    /// Reuse a fixed element id; an existing dialog with the same id is
    /// replaced.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn backdrop(mut self, backdrop: bool) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Whether Escape closes the dialog.
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }

    pub fn ok_text(mut self, text: impl Into<String>) -> Self {
        self.ok_text = Some(text.into());
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    pub fn on_ok(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_ok = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Hook on the `csm:modal:shown` event.
    pub fn on_shown(mut self, f: impl FnMut(&mut DialogEvent) + 'static) -> Self {
        self.on_shown = Some(Box::new(f));
        self
    }
}

/// Nodes of an assembled dialog frame, shared with the sibling factories.
pub(crate) struct Frame {
    pub root: NodeId,
    pub element_id: String,
    pub header: NodeId,
    pub body: NodeId,
    pub close_btn: NodeId,
    pub ok_btn: Option<NodeId>,
    pub cancel_btn: Option<NodeId>,
}

/// Layout of a dialog frame requested by a factory.
pub(crate) struct FrameSpec {
    pub kind: &'static str,
    pub extra_class: &'static str,
    pub title: Option<String>,
    pub tone: Option<Tone>,
    pub id: Option<String>,
    pub offset: Offset,
    pub size: Size,
    pub body_text: String,
    pub ok_text: Option<String>,
    pub cancel_text: Option<String>,
}

/// Build the detached dialog subtree: optional status strip, header with
/// title and close button, body, and a footer when any button text is set.
pub(crate) fn build_frame(session: &mut DialogSession, spec: FrameSpec) -> Frame {
    let dom = session.dom_mut();
    let (root, element_id) = hidden_root(
        dom,
        spec.kind,
        spec.id,
        spec.offset,
        spec.size,
        &[spec.extra_class],
    );
    let width = spec.size.width;

    let mut row = 0;
    if let Some(tone) = spec.tone {
        let mut styles = Styles::new();
        styles.background = Some(tone.bg_class().to_owned());
        styles.color = Some(text_tone_for_background(tone.bg_class()).to_owned());
        dom.create_child(
            root,
            NodeData::new("status-strip")
                .with_class(tone.bg_class())
                .with_styles(styles)
                .at(Offset::new(0, row))
                .sized(Size::new(width, 1)),
        );
        row += 1;
    }

    let header = dom.create_child(
        root,
        NodeData::new("dialog-header")
            .at(Offset::new(0, row))
            .sized(Size::new(width, 1)),
    );
    if let Some(title) = spec.title {
        dom.create_child(
            header,
            NodeData::new("dialog-title")
                .with_text(title)
                .at(Offset::new(1, 0))
                .sized(Size::new((width - 4).max(1), 1)),
        );
    }
    let close_btn = dom.create_child(
        header,
        NodeData::new("btn-close")
            .with_text("×")
            .at(Offset::new(width - 2, 0))
            .sized(Size::new(1, 1)),
    );
    row += 1;

    let has_footer = spec.ok_text.is_some() || spec.cancel_text.is_some();
    let footer_rows = if has_footer { 1 } else { 0 };
    let body_height = (spec.size.height - row - footer_rows).max(1);
    let body = dom.create_child(
        root,
        NodeData::new("dialog-body")
            .with_text(spec.body_text)
            .at(Offset::new(0, row))
            .sized(Size::new(width, body_height)),
    );

    let mut ok_btn = None;
    let mut cancel_btn = None;
    if has_footer {
        let footer = dom.create_child(
            root,
            NodeData::new("dialog-footer")
                .at(Offset::new(0, spec.size.height - 1))
                .sized(Size::new(width, 1)),
        );
        let mut col = width;
        if let Some(text) = spec.ok_text {
            let w = text.chars().count() as i32 + 2;
            col -= w + 1;
            ok_btn = Some(dom.create_child(
                footer,
                NodeData::new("btn")
                    .with_class("btn-ok")
                    .with_text(text)
                    .at(Offset::new(col, 0))
                    .sized(Size::new(w, 1)),
            ));
        }
        if let Some(text) = spec.cancel_text {
            let w = text.chars().count() as i32 + 2;
            col -= w + 1;
            cancel_btn = Some(dom.create_child(
                footer,
                NodeData::new("btn")
                    .with_class("btn-cancel")
                    .with_text(text)
                    .at(Offset::new(col, 0))
                    .sized(Size::new(w, 1)),
            ));
        }
    }

    Frame {
        root,
        element_id,
        header,
        body,
        close_btn,
        ok_btn,
        cancel_btn,
    }
}

/// Wire the dismissing buttons of a frame: the close button and the cancel
/// button both emit `csm:{kind}:cancel` and close unless a handler cancels
/// the event.
pub(crate) fn wire_cancel(
    session: &mut DialogSession,
    kind: &'static str,
    root: NodeId,
    buttons: &[Option<NodeId>],
    on_cancel: Option<SessionHook>,
) {
    let hook = Rc::new(RefCell::new(on_cancel));
    for button in buttons.iter().copied().flatten() {
        let hook = Rc::clone(&hook);
        session.register_action(button, move |s| {
            let event = s.emit(DialogEvent::new(kind, DialogPhase::Cancel, root));
            if event.handled {
                return;
            }
            if let Some(f) = hook.borrow_mut().as_mut() {
                f(s);
            }
            s.close(root);
        });
    }
}

/// Open a modal dialog. `content` may be literal text or a URL/path fetched
/// through the session's requester.
pub fn open(session: &mut DialogSession, content: &str, mut options: ModalOptions) -> Result<DialogHandle> {
    if let Some(id) = options.id.as_deref() {
        if let Some(existing) = session.dom().query_by_id(id) {
            debug!(target: "casement::modal", id, "replacing dialog with same id");
            session.dom_mut().remove(existing);
        }
    }

    let body_text = session.resolve_content(content);
    let lexicon = session.lexicon();
    let viewport = session.viewport();
    let size = options.size.dimensions(viewport);
    let offset = if options.centered {
        centered_offset(size, viewport)
    } else {
        Offset::new(centered_offset(size, viewport).x, 1)
    };

    let (ok_text, cancel_text) = if options.footer {
        (
            Some(options.ok_text.clone().unwrap_or_else(|| lexicon.get(Term::Save).to_owned())),
            Some(options.cancel_text.clone().unwrap_or_else(|| lexicon.get(Term::Cancel).to_owned())),
        )
    } else {
        (None, None)
    };

    let frame = build_frame(
        session,
        FrameSpec {
            kind: "modal",
            extra_class: "casement-modal",
            title: options.title.clone(),
            tone: options.tone,
            id: options.id.take(),
            offset,
            size,
            body_text,
            ok_text,
            cancel_text,
        },
    );
    let root = frame.root;

    let backdrop = if options.backdrop {
        let z = session
            .dom()
            .get(root)
            .and_then(|n| n.styles.z_index)
            .unwrap_or(1);
        Some(backdrop_node(session.dom_mut(), viewport, z))
    } else {
        None
    };

    session.observe_component("modal", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "modal", backdrop, options.keyboard);

    if let Some(on_shown) = options.on_shown.take() {
        session
            .bus_mut()
            .subscribe_node(root, Some("csm:modal:shown"), on_shown);
    }

    wire_cancel(
        session,
        "modal",
        root,
        &[Some(frame.close_btn), frame.cancel_btn],
        options.on_cancel.take(),
    );
    if let Some(ok) = frame.ok_btn {
        let mut hook = options.on_ok.take();
        session.register_action(ok, move |s| {
            let event = s.emit(DialogEvent::new("modal", DialogPhase::Ok, root));
            if event.handled {
                return;
            }
            if let Some(f) = hook.as_mut() {
                f(s);
            }
            s.close(root);
        });
    }

    if options.draggable {
        let controller = DragController::new(session.dom_mut(), root, frame.header, DragLimits::default());
        session.register_drag(controller);
    }
    if options.resizable {
        make_resizable(session.dom_mut(), frame.body)?;
    }

    session.host_show("modal", root)?;
    Ok(DialogHandle {
        root,
        element_id: frame.element_id,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::style::{classify_visibility, VisibilityState};

    const VIEWPORT: Size = Size::new(80, 24);

    fn session() -> DialogSession {
        DialogSession::new(VIEWPORT)
    }

    #[test]
    fn open_builds_attached_visible_dialog() {
        let mut s = session();
        let handle = open(&mut s, "hello", ModalOptions::new().title("Greeting")).unwrap();

        assert!(s.dom().is_attached(handle.root));
        let style = s.dom().computed_style(handle.root).unwrap();
        assert_eq!(classify_visibility(&style), VisibilityState::Visible);
        assert!(s.has_open_components());
        assert_eq!(s.dom().query_by_id(&handle.element_id), Some(handle.root));
    }

    #[test]
    fn open_emits_created_rendered_shown() {
        let mut s = session();
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let l = Rc::clone(&log);
        s.bus_mut().subscribe(None, move |ev| l.borrow_mut().push(ev.name()));

        open(&mut s, "hello", ModalOptions::new()).unwrap();
        s.tick(Instant::now());

        let events = log.borrow();
        assert!(events.contains(&"csm:modal:created".to_owned()));
        assert!(events.contains(&"csm:modal:rendered".to_owned()));
        assert!(events.contains(&"csm:modal:shown".to_owned()));
        let created = events.iter().position(|e| e.ends_with(":created")).unwrap();
        let rendered = events.iter().position(|e| e.ends_with(":rendered")).unwrap();
        assert!(created < rendered);
    }

    #[test]
    fn ok_button_emits_and_closes() {
        let mut s = session();
        let confirmed: Rc<RefCell<bool>> = Rc::default();
        let c = Rc::clone(&confirmed);
        let handle = open(
            &mut s,
            "save changes?",
            ModalOptions::new().on_ok(move |_| *c.borrow_mut() = true),
        )
        .unwrap();
        let t0 = Instant::now();
        s.tick(t0);

        let ok_btn = s.dom().query_by_class("btn-ok").unwrap();
        s.activate(ok_btn);
        assert!(*confirmed.borrow());

        s.tick(t0 + Duration::from_millis(400));
        assert!(!s.dom().contains(handle.root));
        assert!(!s.has_open_components());
    }

    #[test]
    fn handled_cancel_event_keeps_dialog_open() {
        let mut s = session();
        s.bus_mut()
            .subscribe(Some("csm:modal:cancel"), |ev| ev.handled = true);
        let handle = open(&mut s, "hello", ModalOptions::new()).unwrap();
        let t0 = Instant::now();
        s.tick(t0);

        let close_btn = s.dom().query_by_kind("btn-close")[0];
        s.activate(close_btn);
        s.tick(t0 + Duration::from_secs(1));
        assert!(s.dom().contains(handle.root));
    }

    #[test]
    fn same_id_replaces_previous_dialog() {
        let mut s = session();
        let first = open(&mut s, "one", ModalOptions::new().id("settings")).unwrap();
        let second = open(&mut s, "two", ModalOptions::new().id("settings")).unwrap();
        assert_ne!(first.root, second.root);
        assert!(!s.dom().contains(first.root));
        assert_eq!(s.dom().query_by_id("settings"), Some(second.root));
    }

    #[test]
    fn backdrop_comes_and_goes_with_dialog() {
        let mut s = session();
        let handle = open(&mut s, "hello", ModalOptions::new()).unwrap();
        assert_eq!(s.dom().query_by_kind("backdrop").len(), 1);

        let t0 = Instant::now();
        s.tick(t0);
        handle.close(&mut s);
        s.tick(t0 + Duration::from_millis(400));
        assert!(s.dom().query_by_kind("backdrop").is_empty());
    }

    #[test]
    fn no_footer_means_no_buttons() {
        let mut s = session();
        open(&mut s, "hello", ModalOptions::new().footer(false)).unwrap();
        assert!(s.dom().query_by_class("btn-ok").is_none());
        assert!(s.dom().query_by_class("btn-cancel").is_none());
    }

    #[test]
    fn fetched_content_lands_in_body() {
        use crate::request::StaticRequester;
        let mut s = DialogSession::new(VIEWPORT)
            .with_requester(StaticRequester::new().with_route("/about", "all about us"));
        open(&mut s, "/about", ModalOptions::new()).unwrap();
        let body = s.dom().query_by_kind("dialog-body")[0];
        assert_eq!(s.dom().get(body).unwrap().text, "all about us");
    }

    #[test]
    fn failed_fetch_renders_error_text() {
        let mut s = session();
        open(&mut s, "https://example.com/x", ModalOptions::new()).unwrap();
        let body = s.dom().query_by_kind("dialog-body")[0];
        assert!(s.dom().get(body).unwrap().text.contains("Failed to load"));
    }
}

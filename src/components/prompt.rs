//! Prompt: a confirm dialog with a text input.

use crate::dom::{NodeData, NodeId};
use crate::error::Result;
use crate::event::{DialogEvent, DialogPhase};
use crate::geometry::{Offset, Size};
use crate::i18n::Term;
use crate::session::DialogSession;

use super::modal::{build_frame, wire_cancel, FrameSpec};
use super::{centered_offset, DialogHandle, DialogSize, Tone};

/// Options for [`prompt`].
pub struct PromptOptions {
    pub title: Option<String>,
    pub tone: Tone,
    /// Mask the typed value (for passphrases). The captured value is still
    /// the real text.
    pub secret: bool,
    pub initial_value: String,
    pub ok_text: Option<String>,
    pub cancel_text: Option<String>,
    on_confirm: Option<Box<dyn FnMut(&mut DialogSession, String)>>,
    on_cancel: Option<Box<dyn FnMut(&mut DialogSession)>>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            title: None,
            tone: Tone::Secondary,
            secret: false,
            initial_value: String::new(),
            ok_text: None,
            cancel_text: None,
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
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

    /// Receives the entered value when the prompt is confirmed.
    pub fn on_confirm(mut self, f: impl FnMut(&mut DialogSession, String) + 'static) -> Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }
}

/// A handle to an open prompt, exposing its input node.
#[derive(Debug, Clone)]
pub struct PromptHandle {
    pub dialog: DialogHandle,
    pub input: NodeId,
}

/// Ask for a line of text. The value reaches `on_confirm` and rides the
/// `csm:prompt:ok` event as a `String` detail.
pub fn prompt(session: &mut DialogSession, content: &str, mut options: PromptOptions) -> Result<PromptHandle> {
    let body_text = session.resolve_content(content);
    let lexicon = session.lexicon();
    let viewport = session.viewport();
    let size = DialogSize::Sm.dimensions(viewport);

    let title = options
        .title
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Prompt).to_owned());
    let ok_text = options
        .ok_text
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Ok).to_owned());
    let cancel_text = options
        .cancel_text
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Cancel).to_owned());

    let frame = build_frame(
        session,
        FrameSpec {
            kind: "prompt",
            extra_class: "casement-prompt",
            title: Some(title),
            tone: Some(options.tone),
            id: None,
            offset: centered_offset(size, viewport),
            size,
            body_text,
            ok_text: Some(ok_text),
            cancel_text: Some(cancel_text),
        },
    );
    let root = frame.root;

    let input = {
        let dom = session.dom_mut();
        let body_size = dom.get(frame.body).map(|n| n.size).unwrap_or(Size::ZERO);
        let mut data = NodeData::new("input")
            .with_class("form-control")
            .with_text(options.initial_value.clone())
            .at(Offset::new(1, (body_size.height - 1).max(0)))
            .sized(Size::new((body_size.width - 2).max(1), 1));
        if options.secret {
            data.add_class("secret");
        }
        dom.create_child(frame.body, data)
    };

    session.observe_component("prompt", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "prompt", None, true);

    wire_cancel(
        session,
        "prompt",
        root,
        &[Some(frame.close_btn), frame.cancel_btn],
        options.on_cancel.take(),
    );
    if let Some(ok) = frame.ok_btn {
        let mut hook = options.on_confirm.take();
        session.register_action(ok, move |s| {
            let value = s
                .dom()
                .get(input)
                .map(|n| n.text.clone())
                .unwrap_or_default();
            let event = s.emit(
                DialogEvent::new("prompt", DialogPhase::Ok, root).with_detail(value.clone()),
            );
            if event.handled {
                return;
            }
            if let Some(f) = hook.as_mut() {
                f(s, value);
            }
            s.close(root);
        });
        session.focus_input(input, ok);
    }

    session.host_show("prompt", root)?;
    Ok(PromptHandle {
        dialog: DialogHandle {
            root,
            element_id: frame.element_id,
        },
        input,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::{InputEvent, Key, KeyEvent};
    use crate::session::CLOSE_DELAY;

    const VIEWPORT: Size = Size::new(80, 24);

    #[test]
    fn typed_value_reaches_hook() {
        let mut s = DialogSession::new(VIEWPORT);
        let captured: Rc<RefCell<Option<String>>> = Rc::default();
        let c = Rc::clone(&captured);
        let handle = prompt(
            &mut s,
            "name this file",
            PromptOptions::new().on_confirm(move |_, v| *c.borrow_mut() = Some(v)),
        )
        .unwrap();
        let t0 = Instant::now();
        s.tick(t0);

        for ch in "notes.txt".chars() {
            s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Char(ch))));
        }
        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Enter)));
        assert_eq!(captured.borrow().as_deref(), Some("notes.txt"));

        s.tick(t0 + CLOSE_DELAY);
        assert!(!s.dom().contains(handle.dialog.root));
    }

    #[test]
    fn value_rides_the_ok_event_detail() {
        let mut s = DialogSession::new(VIEWPORT);
        let seen: Rc<RefCell<Option<String>>> = Rc::default();
        let v = Rc::clone(&seen);
        s.bus_mut().subscribe(Some("csm:prompt:ok"), move |ev| {
            *v.borrow_mut() = ev.detail_as::<String>().cloned();
        });

        let handle = prompt(
            &mut s,
            "passphrase",
            PromptOptions::new().secret(true).initial_value("hunter2"),
        )
        .unwrap();
        s.tick(Instant::now());
        assert!(s.dom().get(handle.input).unwrap().has_class("secret"));

        let ok = s.dom().query_by_class("btn-ok").unwrap();
        s.activate(ok);
        assert_eq!(seen.borrow().as_deref(), Some("hunter2"));
    }

    #[test]
    fn backspace_edits_value() {
        let mut s = DialogSession::new(VIEWPORT);
        let handle = prompt(&mut s, "name", PromptOptions::new().initial_value("abc")).unwrap();
        s.tick(Instant::now());

        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Backspace)));
        s.handle_input(InputEvent::Key(KeyEvent::plain(Key::Char('z'))));
        assert_eq!(s.dom().get(handle.input).unwrap().text, "abz");
    }

    #[test]
    fn cancel_does_not_capture_value() {
        let mut s = DialogSession::new(VIEWPORT);
        let captured: Rc<RefCell<Option<String>>> = Rc::default();
        let c = Rc::clone(&captured);
        prompt(
            &mut s,
            "name",
            PromptOptions::new().on_confirm(move |_, v| *c.borrow_mut() = Some(v)),
        )
        .unwrap();
        s.tick(Instant::now());

        let cancel = s.dom().query_by_class("btn-cancel").unwrap();
        s.activate(cancel);
        assert!(captured.borrow().is_none());
    }
}

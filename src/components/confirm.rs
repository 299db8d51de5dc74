//! Confirm: a question with OK and Cancel outcomes.

use crate::error::Result;
use crate::event::{DialogEvent, DialogPhase};
use crate::i18n::Term;
use crate::session::DialogSession;

use super::modal::{build_frame, wire_cancel, FrameSpec};
use super::{centered_offset, DialogHandle, DialogSize, Tone};

/// Options for [`confirm`].
pub struct ConfirmOptions {
    pub title: Option<String>,
    pub tone: Tone,
    pub ok_text: Option<String>,
    pub cancel_text: Option<String>,
    on_confirm: Option<Box<dyn FnMut(&mut DialogSession)>>,
    on_cancel: Option<Box<dyn FnMut(&mut DialogSession)>>,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: None,
            tone: Tone::Danger,
            ok_text: None,
            cancel_text: None,
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl ConfirmOptions {
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

    pub fn ok_text(mut self, text: impl Into<String>) -> Self {
        self.ok_text = Some(text.into());
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    pub fn on_confirm(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }
}

/// Ask for confirmation. The outcome surfaces through the hooks and as
/// `csm:confirm:ok` / `csm:confirm:cancel` bus events.
pub fn confirm(session: &mut DialogSession, content: &str, mut options: ConfirmOptions) -> Result<DialogHandle> {
    let body_text = session.resolve_content(content);
    let lexicon = session.lexicon();
    let viewport = session.viewport();
    let size = DialogSize::Sm.dimensions(viewport);

    let title = options
        .title
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Sure).to_owned());
    let ok_text = options
        .ok_text
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Confirm).to_owned());
    let cancel_text = options
        .cancel_text
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Cancel).to_owned());

    let frame = build_frame(
        session,
        FrameSpec {
            kind: "confirm",
            extra_class: "casement-confirm",
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

    session.observe_component("confirm", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "confirm", None, true);

    wire_cancel(
        session,
        "confirm",
        root,
        &[Some(frame.close_btn), frame.cancel_btn],
        options.on_cancel.take(),
    );
    if let Some(ok) = frame.ok_btn {
        let mut hook = options.on_confirm.take();
        session.register_action(ok, move |s| {
            let event = s.emit(DialogEvent::new("confirm", DialogPhase::Ok, root));
            if event.handled {
                return;
            }
            if let Some(f) = hook.as_mut() {
                f(s);
            }
            s.close(root);
        });
    }

    session.host_show("confirm", root)?;
    Ok(DialogHandle {
        root,
        element_id: frame.element_id,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

//! Alert: icon, message, and a single OK button.

use std::time::Duration;

use crate::assets::icon_glyph;
use crate::dom::NodeData;
use crate::error::Result;
use crate::event::{DialogEvent, DialogPhase};
use crate::geometry::{Offset, Size};
use crate::i18n::Term;
use crate::session::DialogSession;

use super::modal::{build_frame, wire_cancel, FrameSpec};
use super::{centered_offset, DialogHandle, DialogSize, Tone};

/// Options for [`alert`].
pub struct AlertOptions {
    pub title: Option<String>,
    pub tone: Tone,
    pub ok_text: Option<String>,
    /// Close automatically after this long.
    pub timeout: Option<Duration>,
    on_ok: Option<Box<dyn FnMut(&mut DialogSession)>>,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            title: None,
            tone: Tone::Success,
            ok_text: None,
            timeout: None,
            on_ok: None,
        }
    }
}

impl AlertOptions {
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

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn on_ok(mut self, f: impl FnMut(&mut DialogSession) + 'static) -> Self {
        self.on_ok = Some(Box::new(f));
        self
    }
}

/// Show an alert dialog.
pub fn alert(session: &mut DialogSession, content: &str, mut options: AlertOptions) -> Result<DialogHandle> {
    let body_text = session.resolve_content(content);
    let lexicon = session.lexicon();
    let viewport = session.viewport();
    let size = DialogSize::Sm.dimensions(viewport);
    let ok_text = options
        .ok_text
        .take()
        .unwrap_or_else(|| lexicon.get(Term::Ok).to_owned());

    let frame = build_frame(
        session,
        FrameSpec {
            kind: "alert",
            extra_class: "casement-alert",
            title: options.title.take(),
            tone: Some(options.tone),
            id: None,
            offset: centered_offset(size, viewport),
            size,
            body_text,
            ok_text: Some(ok_text),
            cancel_text: None,
        },
    );
    let root = frame.root;

    if let Some(glyph) = icon_glyph(options.tone.icon_name()) {
        let dom = session.dom_mut();
        dom.create_child(
            frame.body,
            NodeData::new("alert-icon")
                .with_text(glyph)
                .at(Offset::new(1, 0))
                .sized(Size::new(1, 1)),
        );
    }

    session.observe_component("alert", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "alert", None, true);

    wire_cancel(session, "alert", root, &[Some(frame.close_btn)], None);
    if let Some(ok) = frame.ok_btn {
        let mut hook = options.on_ok.take();
        session.register_action(ok, move |s| {
            let event = s.emit(DialogEvent::new("alert", DialogPhase::Ok, root));
            if event.handled {
                return;
            }
            if let Some(f) = hook.as_mut() {
                f(s);
            }
            s.close(root);
        });
    }

    session.host_show("alert", root)?;
    if let Some(timeout) = options.timeout {
        session.schedule_in(timeout, move |s| s.close(root));
    }
    Ok(DialogHandle {
        root,
        element_id: frame.element_id,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

//! Message: a one-line flash notice that dismisses itself.

use std::time::Duration;

use crate::dom::NodeData;
use crate::error::Result;
use crate::event::{DialogEvent, DialogPhase};
use crate::geometry::{Offset, Size};
use crate::session::DialogSession;
use crate::util::text_tone_for_background;

use super::{hidden_root, DialogHandle, Placement, Tone};

/// Options for [`message`].
pub struct MessageOptions {
    pub tone: Tone,
    pub placement: Placement,
    pub timeout: Duration,
    /// Add a small close button.
    pub closable: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            tone: Tone::Dark,
            placement: Placement::TopCenter,
            timeout: Duration::from_secs(3),
            closable: false,
        }
    }
}

impl MessageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}

/// Flash a short message.
pub fn message(session: &mut DialogSession, text: &str, options: MessageOptions) -> Result<DialogHandle> {
    let viewport = session.viewport();
    let close_cols = if options.closable { 2 } else { 0 };
    let width = (text.chars().count() as i32 + 2 + close_cols).min(viewport.width);
    let size = Size::new(width, 1);
    let offset = options.placement.offset(size, viewport);

    let dom = session.dom_mut();
    let (root, element_id) = hidden_root(dom, "message", None, offset, size, &["casement-message"]);
    dom.update_styles(root, |s| {
        s.background = Some(options.tone.bg_class().to_owned());
        s.color = Some(text_tone_for_background(options.tone.bg_class()).to_owned());
    });
    dom.set_text(root, text);

    let close_btn = if options.closable {
        Some(dom.create_child(
            root,
            NodeData::new("btn-close")
                .with_text("×")
                .at(Offset::new(width - 2, 0))
                .sized(Size::new(1, 1)),
        ))
    } else {
        None
    };

    session.observe_component("message", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "message", None, false);

    if let Some(btn) = close_btn {
        session.register_action(btn, move |s| {
            let event = s.emit(DialogEvent::new("message", DialogPhase::Cancel, root));
            if !event.handled {
                s.close(root);
            }
        });
    }

    session.host_show("message", root)?;
    session.schedule_in(options.timeout, move |s| s.close(root));
    Ok(DialogHandle { root, element_id })
}

// ===========================================================================
// Tests
// ===========================================================================

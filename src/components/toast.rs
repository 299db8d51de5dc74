//! Toast: a positioned notification with optional header and auto-hide.

use std::time::Duration;

use crate::assets::icon_glyph;
use crate::dom::NodeData;
use crate::error::Result;
use crate::geometry::{Offset, Size};
use crate::session::DialogSession;
use crate::style::Styles;
use crate::util::text_tone_for_background;

use super::{hidden_root, DialogHandle, Placement, Tone};

/// Options for [`toast`].
pub struct ToastOptions {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub tone: Tone,
    pub placement: Placement,
    /// Auto-hide delay; `None` keeps the toast until closed explicitly.
    pub timeout: Option<Duration>,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            tone: Tone::Secondary,
            placement: Placement::TopRight,
            timeout: Some(Duration::from_secs(3)),
        }
    }
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Show a toast. Closing (explicit or by timeout) hides it through the
/// host, so the lifecycle observer reports `hidden` and then `removed`.
pub fn toast(session: &mut DialogSession, text: &str, options: ToastOptions) -> Result<DialogHandle> {
    let viewport = session.viewport();
    let has_header = options.title.is_some() || options.subtitle.is_some();
    let width = 26.min(viewport.width);
    let height = if has_header { 4 } else { 3 }.min(viewport.height);
    let size = Size::new(width, height);
    let offset = options.placement.offset(size, viewport);

    let dom = session.dom_mut();
    let (root, element_id) = hidden_root(dom, "toast", None, offset, size, &["casement-toast"]);
    dom.update_styles(root, |s| {
        s.background = Some(options.tone.bg_class().to_owned());
        s.color = Some(text_tone_for_background(options.tone.bg_class()).to_owned());
    });

    let mut row = 0;
    if has_header {
        let header = dom.create_child(
            root,
            NodeData::new("toast-header")
                .at(Offset::new(0, row))
                .sized(Size::new(width, 1)),
        );
        let mut col = 1;
        if let Some(glyph) = icon_glyph(options.tone.icon_name()) {
            dom.create_child(
                header,
                NodeData::new("toast-icon")
                    .with_text(glyph)
                    .at(Offset::new(col, 0))
                    .sized(Size::new(1, 1)),
            );
            col += 2;
        }
        if let Some(title) = options.title {
            let w = title.chars().count() as i32;
            dom.create_child(
                header,
                NodeData::new("toast-title")
                    .with_text(title)
                    .at(Offset::new(col, 0))
                    .sized(Size::new(w, 1)),
            );
            col += w + 1;
        }
        if let Some(subtitle) = options.subtitle {
            let mut muted = Styles::new();
            muted.color = Some("text-muted".to_owned());
            dom.create_child(
                header,
                NodeData::new("toast-subtitle")
                    .with_text(subtitle.clone())
                    .with_styles(muted)
                    .at(Offset::new(col, 0))
                    .sized(Size::new(subtitle.chars().count() as i32, 1)),
            );
        }
        row += 1;
    }
    dom.create_child(
        root,
        NodeData::new("toast-body")
            .with_text(text)
            .at(Offset::new(1, row))
            .sized(Size::new((width - 2).max(1), (height - row - 1).max(1))),
    );

    session.observe_component("toast", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "toast", None, false);
    session.host_show("toast", root)?;

    if let Some(timeout) = options.timeout {
        session.schedule_in(timeout, move |s| s.close(root));
    }
    Ok(DialogHandle { root, element_id })
}

// ===========================================================================
// Tests
// ===========================================================================

//! Loading: a spinner overlay pinned over a node or the whole viewport.

use std::time::Duration;

use crate::assets::spinner;
use crate::dom::{NodeData, NodeId};
use crate::error::Result;
use crate::geometry::{Offset, Size};
use crate::session::DialogSession;
use crate::style::Cursor;

use super::hidden_root;

/// Options for [`show_loading`].
pub struct LoadingOptions {
    /// Spinner name, see [`crate::assets::spinner`].
    pub spinner: &'static str,
    /// Auto-hide after this long.
    pub timeout: Option<Duration>,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            spinner: "border",
            timeout: None,
        }
    }
}

impl LoadingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spinner(mut self, name: &'static str) -> Self {
        self.spinner = name;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Cover `target` (or the whole viewport when `None`) with a spinner
/// overlay. A second call for the same target returns the overlay that is
/// already up instead of stacking another one.
pub fn show_loading(session: &mut DialogSession, target: Option<NodeId>, options: LoadingOptions) -> Result<NodeId> {
    let anchor = target.unwrap_or_else(|| session.dom().body());
    if let Some(existing) = session.loading_overlay(anchor) {
        return Ok(existing);
    }

    let rect = if target.is_some() {
        session.dom().absolute_rect(anchor)
    } else {
        session.viewport().to_region()
    };

    let dom = session.dom_mut();
    let (root, _) = hidden_root(
        dom,
        "loading",
        None,
        Offset::new(rect.x, rect.y),
        rect.size(),
        &["casement-loading"],
    );
    let glyph = spinner(options.spinner).frames[0];
    dom.create_child(
        root,
        NodeData::new("spinner")
            .with_text(glyph)
            .at(Offset::new((rect.width / 2).max(0), (rect.height / 2).max(0)))
            .sized(Size::new(1, 1)),
    );
    dom.update_styles(anchor, |s| s.cursor = Some(Cursor::Wait));

    session.observe_component("loading", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "loading", None, false);
    session.claim_loading(anchor, root);
    session.on_component_finish(root, move |s| {
        s.release_loading(anchor);
        if s.dom().contains(anchor) {
            s.dom_mut().update_styles(anchor, |st| st.cursor = Some(Cursor::Default));
        }
    });
    session.host_show("loading", root)?;

    if let Some(timeout) = options.timeout {
        session.schedule_in(timeout, move |s| hide_loading(s, Some(anchor)));
    }
    Ok(root)
}

/// Take the loading overlay off `target` (or the viewport-wide one when
/// `None`). Does nothing if no overlay is up.
pub fn hide_loading(session: &mut DialogSession, target: Option<NodeId>) {
    let anchor = target.unwrap_or_else(|| session.dom().body());
    if let Some(overlay) = session.loading_overlay(anchor) {
        session.close(overlay);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

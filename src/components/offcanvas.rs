//! Offcanvas: a panel sliding in from a viewport edge.

use crate::dom::{NodeData, NodeId};
use crate::error::Result;
use crate::geometry::{Offset, Size, Spacing};
use crate::session::DialogSession;
use crate::util::overlap_dimensions;

use super::{backdrop_node, hidden_root, DialogHandle};

/// Which edge the panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Start,
    End,
    Top,
    Bottom,
}

/// Options for [`offcanvas`].
pub struct OffcanvasOptions {
    pub direction: Direction,
    /// Panel depth in cells: width for side panels, height for top/bottom.
    pub breadth: Option<i32>,
    pub title: Option<String>,
    pub backdrop: bool,
    pub keyboard: bool,
    /// Accordion mode: instead of overlaying, pad this container by the
    /// overlap so its content stays readable; the padding is restored when
    /// the panel goes away.
    pub accordion: Option<NodeId>,
}

impl Default for OffcanvasOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Start,
            breadth: None,
            title: None,
            backdrop: true,
            keyboard: true,
            accordion: None,
        }
    }
}

impl OffcanvasOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn breadth(mut self, breadth: i32) -> Self {
        self.breadth = Some(breadth);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn backdrop(mut self, backdrop: bool) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn accordion(mut self, container: NodeId) -> Self {
        self.accordion = Some(container);
        self
    }
}

fn panel_rect(direction: Direction, breadth: Option<i32>, viewport: Size) -> (Offset, Size) {
    match direction {
        Direction::Start => {
            let w = breadth.unwrap_or(30).min(viewport.width);
            (Offset::ZERO, Size::new(w, viewport.height))
        }
        Direction::End => {
            let w = breadth.unwrap_or(30).min(viewport.width);
            (
                Offset::new(viewport.width - w, 0),
                Size::new(w, viewport.height),
            )
        }
        Direction::Top => {
            let h = breadth.unwrap_or(8).min(viewport.height);
            (Offset::ZERO, Size::new(viewport.width, h))
        }
        Direction::Bottom => {
            let h = breadth.unwrap_or(8).min(viewport.height);
            (
                Offset::new(0, viewport.height - h),
                Size::new(viewport.width, h),
            )
        }
    }
}

/// Open a side panel. Dismiss with Escape (unless disabled) or
/// [`DialogHandle::close`].
pub fn offcanvas(session: &mut DialogSession, content: &str, options: OffcanvasOptions) -> Result<DialogHandle> {
    let body_text = session.resolve_content(content);
    let viewport = session.viewport();
    let (offset, size) = panel_rect(options.direction, options.breadth, viewport);

    let dom = session.dom_mut();
    let (root, element_id) = hidden_root(dom, "offcanvas", None, offset, size, &["casement-offcanvas"]);

    let mut row = 0;
    if let Some(title) = options.title {
        dom.create_child(
            root,
            NodeData::new("offcanvas-header")
                .with_text(title)
                .at(Offset::new(0, row))
                .sized(Size::new(size.width, 1)),
        );
        row += 1;
    }
    dom.create_child(
        root,
        NodeData::new("offcanvas-body")
            .with_text(body_text)
            .at(Offset::new(1, row))
            .sized(Size::new((size.width - 2).max(1), (size.height - row).max(1))),
    );

    let backdrop = if options.backdrop && options.accordion.is_none() {
        let z = session
            .dom()
            .get(root)
            .and_then(|n| n.styles.z_index)
            .unwrap_or(1);
        Some(backdrop_node(session.dom_mut(), viewport, z))
    } else {
        None
    };

    session.observe_component("offcanvas", root);
    let body_node = session.dom().body();
    session.dom_mut().append(body_node, root);
    session.register_component(root, "offcanvas", backdrop, options.keyboard);
    session.host_show("offcanvas", root)?;

    // Accordion mode shifts the container's content out from under the
    // panel and restores it once the panel's nodes are gone.
    if let Some(container) = options.accordion {
        if session.dom().contains(container) {
            let overlap = overlap_dimensions(session.dom(), root, container);
            let previous = session
                .dom()
                .get(container)
                .and_then(|n| n.styles.padding)
                .unwrap_or(Spacing::ZERO);
            let padded = match options.direction {
                Direction::Start => Spacing { left: overlap.width, ..previous },
                Direction::End => Spacing { right: overlap.width, ..previous },
                Direction::Top => Spacing { top: overlap.height, ..previous },
                Direction::Bottom => Spacing { bottom: overlap.height, ..previous },
            };
            session
                .dom_mut()
                .update_styles(container, move |s| s.padding = Some(padded));
            session.on_component_finish(root, move |s| {
                if s.dom().contains(container) {
                    s.dom_mut().update_styles(container, move |st| st.padding = Some(previous));
                }
            });
        }
    }

    Ok(DialogHandle { root, element_id })
}

// ===========================================================================
// Tests
// ===========================================================================

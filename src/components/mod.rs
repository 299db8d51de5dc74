//! Dialog component factories.
//!
//! Every factory follows the same shape: build a detached subtree, start a
//! lifecycle observer on the root, attach under the body, register the
//! component with the session, then drive the host's show. Closing goes the
//! other way: host hide, delayed detach, and the observer reports `hidden`
//! then `removed` from the resulting mutations.

pub mod alert;
pub mod confirm;
pub mod loading;
pub mod message;
pub mod modal;
pub mod offcanvas;
pub mod prompt;
pub mod toast;

use crate::dom::{Dom, NodeData, NodeId};
use crate::geometry::{Offset, Size};
use crate::session::DialogSession;
use crate::style::{Display, Styles};
use crate::util::{gen_dialog_id, max_z_index};

/// Visual tone of a dialog, mapped to background classes and status icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
}

impl Tone {
    pub fn bg_class(self) -> &'static str {
        match self {
            Tone::Primary => "bg-primary",
            Tone::Secondary => "bg-secondary",
            Tone::Success => "bg-success",
            Tone::Danger => "bg-danger",
            Tone::Warning => "bg-warning",
            Tone::Info => "bg-info",
            Tone::Light => "bg-light",
            Tone::Dark => "bg-dark",
        }
    }

    /// The status icon name for this tone, resolvable via
    /// [`crate::assets::icon_glyph`].
    pub fn icon_name(self) -> &'static str {
        match self {
            Tone::Success => "ok",
            Tone::Danger => "error",
            Tone::Warning => "warning",
            Tone::Info => "info",
            _ => "question",
        }
    }
}

/// Dialog footprint presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    Fullscreen,
}

impl DialogSize {
    /// Concrete cell dimensions for a viewport.
    pub fn dimensions(self, viewport: Size) -> Size {
        let clamp = |w: i32, h: i32| {
            Size::new(w.min(viewport.width), h.min(viewport.height))
        };
        match self {
            DialogSize::Sm => clamp(30, 8),
            DialogSize::Md => clamp(44, 12),
            DialogSize::Lg => clamp(60, 16),
            DialogSize::Xl => clamp(72, 20),
            DialogSize::Fullscreen => viewport,
        }
    }
}

/// A reference to an open dialog.
#[derive(Debug, Clone)]
pub struct DialogHandle {
    /// Root node of the dialog subtree.
    pub root: NodeId,
    /// The generated (or supplied) element id.
    pub element_id: String,
}

impl DialogHandle {
    /// Close the dialog through the session's standard close path.
    pub fn close(&self, session: &mut DialogSession) {
        session.close(self.root);
    }
}

/// Where a flash element sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Placement {
    /// Offset for an element of `size` inside `viewport`, with a one-cell
    /// margin from the edges.
    pub fn offset(self, size: Size, viewport: Size) -> Offset {
        let right = (viewport.width - size.width - 1).max(0);
        let bottom = (viewport.height - size.height - 1).max(0);
        let h_center = ((viewport.width - size.width) / 2).max(0);
        let v_center = ((viewport.height - size.height) / 2).max(0);
        match self {
            Placement::TopLeft => Offset::new(1, 1),
            Placement::TopCenter => Offset::new(h_center, 1),
            Placement::TopRight => Offset::new(right, 1),
            Placement::Center => Offset::new(h_center, v_center),
            Placement::BottomLeft => Offset::new(1, bottom),
            Placement::BottomCenter => Offset::new(h_center, bottom),
            Placement::BottomRight => Offset::new(right, bottom),
        }
    }
}

/// Centered offset for a dialog of `size` in `viewport`.
pub(crate) fn centered_offset(size: Size, viewport: Size) -> Offset {
    Offset::new(
        ((viewport.width - size.width) / 2).max(0),
        ((viewport.height - size.height) / 2).max(0),
    )
}

/// Build a detached, initially hidden dialog root. Returns the node and its
/// element id. The host's show is what makes it visible.
pub(crate) fn hidden_root(
    dom: &mut Dom,
    kind: &str,
    id: Option<String>,
    offset: Offset,
    size: Size,
    extra_classes: &[&str],
) -> (NodeId, String) {
    let element_id = id.unwrap_or_else(gen_dialog_id);
    let z = max_z_index(dom) + 1;
    let mut styles = Styles::new();
    styles.display = Some(Display::None);
    styles.z_index = Some(z);
    let mut data = NodeData::new(kind)
        .with_id(element_id.clone())
        .with_class(kind)
        .with_class("fade")
        .with_styles(styles)
        .at(offset)
        .sized(size);
    for class in extra_classes {
        data.add_class(class);
    }
    let root = dom.create(data);
    (root, element_id)
}

/// Build a full-viewport backdrop node, stacked just under `z`.
pub(crate) fn backdrop_node(dom: &mut Dom, viewport: Size, z: i32) -> NodeId {
    let mut styles = Styles::new();
    styles.z_index = Some(z - 1);
    styles.background = Some("bg-dark".to_owned());
    styles.opacity = Some(0.5);
    let data = NodeData::new("backdrop")
        .with_class("modal-backdrop")
        .with_styles(styles)
        .sized(viewport);
    let node = dom.create(data);
    dom.append(dom.body(), node);
    node
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Size = Size::new(80, 24);

    #[test]
    fn tone_classes_and_icons() {
        assert_eq!(Tone::Danger.bg_class(), "bg-danger");
        assert_eq!(Tone::Danger.icon_name(), "error");
        assert_eq!(Tone::Success.icon_name(), "ok");
        assert_eq!(Tone::Primary.icon_name(), "question");
    }

    #[test]
    fn dialog_sizes_fit_viewport() {
        assert_eq!(DialogSize::Md.dimensions(VIEWPORT), Size::new(44, 12));
        assert_eq!(DialogSize::Fullscreen.dimensions(VIEWPORT), VIEWPORT);
        // Small terminal clamps.
        let tiny = Size::new(20, 6);
        assert_eq!(DialogSize::Xl.dimensions(tiny), tiny);
    }

    #[test]
    fn placement_offsets() {
        let size = Size::new(20, 3);
        assert_eq!(Placement::TopLeft.offset(size, VIEWPORT), Offset::new(1, 1));
        assert_eq!(Placement::TopRight.offset(size, VIEWPORT), Offset::new(59, 1));
        assert_eq!(Placement::Center.offset(size, VIEWPORT), Offset::new(30, 10));
        assert_eq!(
            Placement::BottomCenter.offset(size, VIEWPORT),
            Offset::new(30, 20)
        );
    }

    #[test]
    fn hidden_root_is_detached_and_hidden() {
        let mut dom = Dom::new();
        let (root, id) = hidden_root(
            &mut dom,
            "modal",
            None,
            Offset::new(10, 5),
            Size::new(44, 12),
            &["casement-modal"],
        );
        assert!(!dom.is_attached(root));
        assert!(id.starts_with("dlg-"));
        let node = dom.get(root).unwrap();
        assert!(node.has_class("modal"));
        assert!(node.has_class("fade"));
        assert!(node.has_class("casement-modal"));
        assert_eq!(node.styles.display, Some(Display::None));
    }

    #[test]
    fn hidden_root_stacks_above_existing() {
        let mut dom = Dom::new();
        let (a, _) = hidden_root(&mut dom, "modal", None, Offset::ZERO, Size::new(10, 4), &[]);
        dom.append(dom.body(), a);
        let (b, _) = hidden_root(&mut dom, "modal", None, Offset::ZERO, Size::new(10, 4), &[]);
        let za = dom.get(a).unwrap().styles.z_index.unwrap();
        let zb = dom.get(b).unwrap().styles.z_index.unwrap();
        assert!(zb > za);
    }

    #[test]
    fn backdrop_sits_under_dialog() {
        let mut dom = Dom::new();
        let backdrop = backdrop_node(&mut dom, VIEWPORT, 10);
        assert!(dom.is_attached(backdrop));
        assert_eq!(dom.get(backdrop).unwrap().styles.z_index, Some(9));
        assert_eq!(dom.get(backdrop).unwrap().size, VIEWPORT);
    }
}

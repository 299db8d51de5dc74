//! Small shared helpers: id generation, stacking, overlap math, contrast.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::Dom;
use crate::geometry::Size;

static NEXT_DIALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique dialog element id, `dlg-1`, `dlg-2`, ...
pub fn gen_dialog_id() -> String {
    let n = NEXT_DIALOG_ID.fetch_add(1, Ordering::Relaxed);
    format!("dlg-{n}")
}

/// The highest z-index currently present anywhere in the tree. New overlays
/// stack at this plus one.
pub fn max_z_index(dom: &Dom) -> i32 {
    dom.walk_depth_first(dom.body())
        .into_iter()
        .filter_map(|n| dom.get(n).and_then(|d| d.styles.z_index))
        .max()
        .unwrap_or(0)
}

/// Dimensions of the overlap between two nodes' absolute rectangles.
/// [`Size::ZERO`] when they do not intersect.
pub fn overlap_dimensions(dom: &Dom, a: crate::dom::NodeId, b: crate::dom::NodeId) -> Size {
    dom.absolute_rect(a).intersection(dom.absolute_rect(b)).size()
}

/// Pick a readable text tone class for a background tone class. Light
/// backgrounds get dark text; everything else gets light text.
pub fn text_tone_for_background(background: &str) -> &'static str {
    match background {
        "bg-light" | "bg-warning" | "bg-info" | "bg-white" => "text-dark",
        _ => "text-light",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::NodeData;
    use crate::geometry::Offset;

    #[test]
    fn dialog_ids_are_unique() {
        let a = gen_dialog_id();
        let b = gen_dialog_id();
        assert_ne!(a, b);
        assert!(a.starts_with("dlg-"));
    }

    #[test]
    fn max_z_index_over_tree() {
        let mut dom = Dom::new();
        assert_eq!(max_z_index(&dom), 0);

        let a = dom.create_child(dom.body(), NodeData::new("modal"));
        dom.update_styles(a, |s| s.z_index = Some(1055));
        let b = dom.create_child(dom.body(), NodeData::new("toast"));
        dom.update_styles(b, |s| s.z_index = Some(1080));
        assert_eq!(max_z_index(&dom), 1080);
    }

    #[test]
    fn overlap_of_intersecting_nodes() {
        let mut dom = Dom::new();
        let a = dom.create_child(
            dom.body(),
            NodeData::new("offcanvas").at(Offset::new(0, 0)).sized(Size::new(20, 24)),
        );
        let b = dom.create_child(
            dom.body(),
            NodeData::new("panel").at(Offset::new(15, 0)).sized(Size::new(30, 24)),
        );
        assert_eq!(overlap_dimensions(&dom, a, b), Size::new(5, 24));
    }

    #[test]
    fn overlap_of_disjoint_nodes_is_zero() {
        let mut dom = Dom::new();
        let a = dom.create_child(dom.body(), NodeData::new("x").sized(Size::new(5, 5)));
        let b = dom.create_child(
            dom.body(),
            NodeData::new("y").at(Offset::new(50, 0)).sized(Size::new(5, 5)),
        );
        assert_eq!(overlap_dimensions(&dom, a, b), Size::ZERO);
    }

    #[test]
    fn text_tone_contrast() {
        assert_eq!(text_tone_for_background("bg-light"), "text-dark");
        assert_eq!(text_tone_for_background("bg-warning"), "text-dark");
        assert_eq!(text_tone_for_background("bg-danger"), "text-light");
        assert_eq!(text_tone_for_background("bg-dark"), "text-light");
    }
}

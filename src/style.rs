//! Typed inline styles, computed-style resolution, and visibility
//! classification.
//!
//! [`Styles`] holds `Option<T>` fields (None means unset); [`ComputedStyle`]
//! is the fully-resolved form with defaults filled in. Whether an element
//! counts as hidden is decided by the pure [`classify_visibility`] function
//! so the lifecycle state machine can be driven without any tree at hand.

use crate::geometry::Spacing;

/// Display property options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

/// Visibility property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Auto,
}

/// Positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
}

/// Whether the element carries a user-resize affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    None,
    Both,
}

/// Pointer cursor hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Move,
    Wait,
}

/// Inline styles for a node. Each field is `Option<T>`; `None` means unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,
    /// 0.0 (fully transparent) ..= 1.0 (opaque).
    pub opacity: Option<f32>,
    pub position: Option<Position>,
    pub overflow: Option<Overflow>,
    pub resize: Option<Resize>,
    pub cursor: Option<Cursor>,
    pub z_index: Option<i32>,
    pub padding: Option<Spacing>,
    /// Background tone class, e.g. `"bg-danger"`.
    pub background: Option<String>,
    /// Foreground tone class, e.g. `"text-light"`.
    pub color: Option<String>,
}

impl Styles {
    /// Create a new `Styles` with all fields unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` on top of `self`: fields set in `other` win.
    pub fn merge(&self, other: &Styles) -> Styles {
        fn pick<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            if other.is_some() {
                other.clone()
            } else {
                base.clone()
            }
        }

        Styles {
            display: pick(&self.display, &other.display),
            visibility: pick(&self.visibility, &other.visibility),
            opacity: pick(&self.opacity, &other.opacity),
            position: pick(&self.position, &other.position),
            overflow: pick(&self.overflow, &other.overflow),
            resize: pick(&self.resize, &other.resize),
            cursor: pick(&self.cursor, &other.cursor),
            z_index: pick(&self.z_index, &other.z_index),
            padding: pick(&self.padding, &other.padding),
            background: pick(&self.background, &other.background),
            color: pick(&self.color, &other.color),
        }
    }

    /// Resolve to a [`ComputedStyle`], filling unset fields with defaults.
    pub fn compute(&self) -> ComputedStyle {
        ComputedStyle {
            display: self.display.unwrap_or(Display::Block),
            visibility: self.visibility.unwrap_or(Visibility::Visible),
            opacity: self.opacity.unwrap_or(1.0),
            position: self.position.unwrap_or(Position::Static),
            overflow: self.overflow.unwrap_or(Overflow::Visible),
            resize: self.resize.unwrap_or(Resize::None),
            cursor: self.cursor.unwrap_or(Cursor::Default),
            z_index: self.z_index.unwrap_or(0),
        }
    }
}

/// Fully-resolved style values for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: f32,
    pub position: Position,
    pub overflow: Overflow,
    pub resize: Resize,
    pub cursor: Cursor,
    pub z_index: i32,
}

/// Lifecycle-relevant visibility of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Visible,
    Hidden,
}

/// Classify a computed style as visible or hidden.
///
/// An element is hidden when its display is `none`, its opacity is zero, or
/// its visibility is `hidden`. This mirrors how a user perceives the element
/// rather than whether it occupies layout space.
pub fn classify_visibility(style: &ComputedStyle) -> VisibilityState {
    if style.display == Display::None
        || style.opacity == 0.0
        || style.visibility == Visibility::Hidden
    {
        VisibilityState::Hidden
    } else {
        VisibilityState::Visible
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn compute_defaults() {
        let c = Styles::new().compute();
        assert_eq!(c.display, Display::Block);
        assert_eq!(c.visibility, Visibility::Visible);
        assert_eq!(c.opacity, 1.0);
        assert_eq!(c.position, Position::Static);
        assert_eq!(c.overflow, Overflow::Visible);
        assert_eq!(c.resize, Resize::None);
        assert_eq!(c.cursor, Cursor::Default);
        assert_eq!(c.z_index, 0);
    }

    #[test]
    fn compute_set_fields_win() {
        let mut s = Styles::new();
        s.display = Some(Display::None);
        s.opacity = Some(0.5);
        let c = s.compute();
        assert_eq!(c.display, Display::None);
        assert_eq!(c.opacity, 0.5);
    }

    #[test]
    fn merge_other_overrides() {
        let mut base = Styles::new();
        base.display = Some(Display::Block);
        base.background = Some("bg-dark".into());

        let mut over = Styles::new();
        over.display = Some(Display::None);

        let merged = base.merge(&over);
        assert_eq!(merged.display, Some(Display::None));
        assert_eq!(merged.background, Some("bg-dark".into()));
    }

    #[test]
    fn merge_keeps_base_when_other_unset() {
        let mut base = Styles::new();
        base.cursor = Some(Cursor::Move);
        let merged = base.merge(&Styles::new());
        assert_eq!(merged.cursor, Some(Cursor::Move));
    }

    #[test]
    fn classify_default_is_visible() {
        let c = Styles::new().compute();
        assert_eq!(classify_visibility(&c), VisibilityState::Visible);
    }

    #[test]
    fn classify_display_none_is_hidden() {
        let mut s = Styles::new();
        s.display = Some(Display::None);
        assert_eq!(classify_visibility(&s.compute()), VisibilityState::Hidden);
    }

    #[test]
    fn classify_zero_opacity_is_hidden() {
        let mut s = Styles::new();
        s.opacity = Some(0.0);
        assert_eq!(classify_visibility(&s.compute()), VisibilityState::Hidden);
    }

    #[test]
    fn classify_visibility_hidden_is_hidden() {
        let mut s = Styles::new();
        s.visibility = Some(Visibility::Hidden);
        assert_eq!(classify_visibility(&s.compute()), VisibilityState::Hidden);
    }

    #[test]
    fn classify_low_opacity_is_still_visible() {
        let mut s = Styles::new();
        s.opacity = Some(0.01);
        assert_eq!(classify_visibility(&s.compute()), VisibilityState::Visible);
    }

    #[test]
    fn classify_each_factor_independently() {
        // visibility:hidden beats display:block and full opacity.
        let mut s = Styles::new();
        s.display = Some(Display::Block);
        s.opacity = Some(1.0);
        s.visibility = Some(Visibility::Hidden);
        assert_eq!(classify_visibility(&s.compute()), VisibilityState::Hidden);
    }
}

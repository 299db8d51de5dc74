//! Core geometry types: Offset, Size, Region, Spacing.
//!
//! The coordinate primitives used for position and size snapshots, drag
//! deltas, viewport checks, and overlap math. All values are terminal cells.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total area (width * height).
    #[inline]
    pub const fn area(self) -> i32 {
        self.width * self.height
    }

    /// Whether the point (x, y) is inside `0..width` and `0..height`.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a region from an offset and a size.
    #[inline]
    pub const fn from_parts(offset: Offset, size: Size) -> Self {
        Self { x: offset.x, y: offset.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` overlaps this region (non-zero intersection area).
    #[inline]
    pub const fn overlaps(self, other: Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region {
            x: self.x + offset.x,
            y: self.y + offset.y,
            width: self.width,
            height: self.height,
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for container padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on every side.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create a new spacing.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

//! Plain geometry primitives in local view coordinates
//!
//! Y grows downward. Rectangles are stored as edges (`left/top/right/bottom`)
//! rather than origin + size so bounding boxes can be unioned directly.

/// A point in local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Degenerate rectangle at the origin
    pub const ZERO: Rect = Rect::from_ltrb(0.0, 0.0, 0.0, 0.0);

    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Overlapping area, or `None` when the two do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::from_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }

    /// Tight bounding box over a set of rectangles (`None` when empty)
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(b) => Some(b.union(r)),
        })
    }
}

/// A rectangle with all four corners rounded by the same radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    pub fn new(rect: Rect, radius: f32) -> Self {
        Self { rect, radius }
    }

    /// Radius actually drawn: never more than half of either side
    pub fn effective_radius(&self) -> f32 {
        self.radius
            .min(self.rect.width() / 2.0)
            .min(self.rect.height() / 2.0)
            .max(0.0)
    }
}

use crate::{petunin_rect::PetuninRect, Point, RotatedRect};

/// A bounding rectangle computed by one of the algorithms in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rectangle {
    /// Aligned to the diameter of a point set, see [`crate::petunin_rect`].
    Petunin(PetuninRect),
    /// The minimum-area enclosing rectangle, see [`crate::min_rect`].
    MinArea(RotatedRect),
}

impl Rectangle {
    pub fn area(&self) -> f64 {
        match self {
            Rectangle::Petunin(rect) => rect.area(),
            Rectangle::MinArea(rect) => rect.area(),
        }
    }

    /// Returns the corners of the rectangle in world coordinates, in counter-clockwise order.
    pub fn corners(&self) -> [Point; 4] {
        match self {
            Rectangle::Petunin(rect) => rect.corners(),
            Rectangle::MinArea(rect) => rect.corners(),
        }
    }

    /// Returns whether `p` lies inside the rectangle, or less than `tolerance` outside of it.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Rectangle::Petunin(rect) => rect.contains_point(p, tolerance),
            Rectangle::MinArea(rect) => rect.contains_point(p, tolerance),
        }
    }

    /// Returns the rectangle as a [`RotatedRect`].
    pub fn to_rotated(&self) -> RotatedRect {
        match self {
            Rectangle::Petunin(rect) => rect.to_rotated(),
            Rectangle::MinArea(rect) => *rect,
        }
    }
}

impl From<PetuninRect> for Rectangle {
    fn from(rect: PetuninRect) -> Self {
        Self::Petunin(rect)
    }
}

impl From<RotatedRect> for Rectangle {
    fn from(rect: RotatedRect) -> Self {
        Self::MinArea(rect)
    }
}

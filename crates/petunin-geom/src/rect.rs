//! Rectangle types.
//!
//! [`Rect`] is an axis-aligned rectangle. [`RotatedRect`] places a [`Rect`] in a coordinate frame
//! whose X axis can point in any direction, which is how arbitrarily oriented enclosing
//! rectangles are represented.

use std::{fmt, ops::RangeInclusive};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Unit;

use crate::{point, rot90, Point, Vector};

/// An axis-aligned rectangle.
///
/// Rectangles are allowed to have zero height and/or width. Negative dimensions are not allowed.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// The rectangle spanning from `(0, 0)` to `(1, 1)`.
    pub const UNIT: Self = Self {
        min: Point::new(0.0, 0.0),
        max: Point::new(1.0, 1.0),
    };

    /// Creates a rectangle spanning from the `min` corner to the `max` corner.
    ///
    /// # Panics
    ///
    /// This will panic if any coordinate of `min` is larger than the same coordinate of `max`.
    pub fn from_min_max(min: Point, max: Point) -> Self {
        assert!(min.x <= max.x, "x_min={}, x_max={}", min.x, max.x);
        assert!(min.y <= max.y, "y_min={}, y_max={}", min.y, max.y);
        Self { min, max }
    }

    /// Constructs a [`Rect`] that spans a range of X and Y coordinates.
    pub fn from_ranges(x: RangeInclusive<f64>, y: RangeInclusive<f64>) -> Self {
        Self::from_min_max(point(*x.start(), *y.start()), point(*x.end(), *y.end()))
    }

    /// Computes the (axis-aligned) bounding rectangle that encompasses `points`.
    ///
    /// Returns [`None`] if `points` is an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();

        let first = iter.next()?;
        let (mut min, mut max) = (first, first);

        for pt in iter {
            min = min.inf(&pt);
            max = max.sup(&pt);
        }

        Some(Self::from_min_max(min, max))
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.min, &self.max)
    }

    /// Grows this rectangle by adding `margin` to each side.
    #[must_use]
    pub fn grow(&self, margin: f64) -> Self {
        let margin = Vector::repeat(margin);
        Self::from_min_max(self.min - margin, self.max + margin)
    }

    /// Returns whether `p` lies inside or on the boundary of `self`.
    pub fn contains_point(&self, p: Point) -> bool {
        self.min.x <= p.x && self.min.y <= p.y && self.max.x >= p.x && self.max.y >= p.y
    }

    /// Returns the corners of the rectangle in counter-clockwise order, starting at
    /// [`min`][Self::min].
    pub fn corners(&self) -> [Point; 4] {
        let (min, max) = (self.min, self.max);
        [min, point(max.x, min.y), max, point(min.x, max.y)]
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect [{},{}]x[{},{}]",
            self.min.x, self.max.x, self.min.y, self.max.y
        )
    }
}

impl AbsDiffEq for Rect {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.min.abs_diff_eq(&other.min, epsilon) && self.max.abs_diff_eq(&other.max, epsilon)
    }
}

impl RelativeEq for Rect {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.min.relative_eq(&other.min, epsilon, max_relative)
            && self.max.relative_eq(&other.max, epsilon, max_relative)
    }
}

/// A [`Rect`] in a rotated coordinate frame.
///
/// The frame shares its origin with the parent coordinate system. Its X axis is the unit vector
/// [`axis`][Self::axis], its Y axis is that vector rotated by 90° counter-clockwise
/// ([`normal`][Self::normal]). The inner [`Rect`] holds the min/max extents along both frame
/// axes.
#[derive(Clone, Copy, PartialEq)]
pub struct RotatedRect {
    rect: Rect,
    axis: Unit<Vector>,
}

impl RotatedRect {
    /// Creates a rotated rectangle from its extents in the frame spanned by `axis`.
    #[inline]
    pub fn new(rect: Rect, axis: Unit<Vector>) -> Self {
        Self { rect, axis }
    }

    /// Creates a rotated rectangle whose frame is rotated counter-clockwise by `radians`.
    pub fn from_radians(rect: Rect, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(rect, Unit::new_normalize(Vector::new(cos, sin)))
    }

    /// Computes the bounding rectangle of `points` in the frame spanned by `axis`.
    ///
    /// Returns [`None`] if `points` is an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Point>>(axis: Unit<Vector>, points: I) -> Option<Self> {
        // Project all points into the frame, bound them there. The frame rotates around the
        // origin, so no translation has to be compensated for.
        let frame = Self::new(Rect::from_min_max(Point::origin(), Point::origin()), axis);
        let rect = Rect::bounding(points.into_iter().map(|p| frame.transform_in(p)))?;
        Some(Self::new(rect, axis))
    }

    /// Returns the direction of the frame's X axis.
    #[inline]
    pub fn axis(&self) -> Unit<Vector> {
        self.axis
    }

    /// Returns the direction of the frame's Y axis.
    #[inline]
    pub fn normal(&self) -> Vector {
        rot90(&self.axis)
    }

    /// Returns the counter-clockwise rotation of the frame in radians, in range `(-π, π]`.
    pub fn rotation_radians(&self) -> f64 {
        self.axis.y.atan2(self.axis.x)
    }

    /// Returns the counter-clockwise rotation of the frame in degrees.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_radians().to_degrees()
    }

    /// Returns a reference to the rectangle's extents in frame coordinates.
    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Returns the extent along [`axis`][Self::axis].
    #[inline]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Returns the extent along [`normal`][Self::normal].
    #[inline]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Returns the center of the rectangle in the parent coordinate system.
    pub fn center(&self) -> Point {
        self.transform_out(self.rect.center())
    }

    /// Returns the corners of the rectangle in the parent coordinate system.
    ///
    /// The order is the one of [`Rect::corners`], which stays counter-clockwise after rotation.
    pub fn corners(&self) -> [Point; 4] {
        self.rect.corners().map(|p| self.transform_out(p))
    }

    /// Returns whether `p` lies inside the rectangle, or less than `tolerance` outside of it.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.rect.grow(tolerance).contains_point(self.transform_in(p))
    }

    /// Transforms a point from the parent coordinate system into the rectangle's frame.
    pub fn transform_in(&self, p: Point) -> Point {
        point(self.axis.dot(&p.coords), self.normal().dot(&p.coords))
    }

    /// Transforms a point from the rectangle's frame into the parent coordinate system.
    pub fn transform_out(&self, p: Point) -> Point {
        Point::from(self.axis.into_inner() * p.x + self.normal() * p.y)
    }
}

impl fmt::Debug for RotatedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} along ({},{})",
            self.rect, self.axis.x, self.axis.y
        )
    }
}

impl From<Rect> for RotatedRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect, Vector::x_axis())
    }
}

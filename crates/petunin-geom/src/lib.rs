//! Planar geometry primitives.
//!
//! Points and vectors are [`nalgebra`] types with [`f64`] elements. On top of those, this crate
//! provides directed [`Line`]s, axis-aligned and rotated rectangles ([`Rect`], [`RotatedRect`]),
//! and convex hulls ([`Hull`]) along with the [`ConvexHull`] trait that computes them.
//!
//! # Orientation
//!
//! All signed quantities use the standard mathematical orientation: X points to the right, Y
//! points up, and a positive cross product means a counter-clockwise turn (the second vector
//! points to the *left* of the first one). Hull vertices are always stored counter-clockwise.

mod error;
pub mod hull;
mod line;
pub mod num;
pub mod rect;

pub use error::{Error, Result};
pub use hull::{ConvexHull, Hull, MonotoneChain};
pub use line::Line;
pub use rect::{Rect, RotatedRect};

/// A point in the plane.
pub type Point = nalgebra::Point2<f64>;

/// A displacement between two [`Point`]s.
pub type Vector = nalgebra::Vector2<f64>;

/// Shorthand for creating a [`Point`].
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Computes the 2D cross product (the *z* component of the 3D cross product) of `u` and `v`.
///
/// The result is positive if `v` points to the left of `u`, negative if it points to the right,
/// and zero if they are parallel. Its magnitude is the area of the parallelogram spanned by both
/// vectors.
#[inline]
pub fn cross(u: &Vector, v: &Vector) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Rotates `v` by 90° counter-clockwise: `(x, y)` becomes `(-y, x)`.
#[inline]
pub fn rot90(v: &Vector) -> Vector {
    Vector::new(-v.y, v.x)
}

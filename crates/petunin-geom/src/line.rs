use std::fmt;

use crate::{cross, rot90, Error, Point, Result, Vector};

/// A directed line through two distinct points.
///
/// The line's direction is `b - a`. Quantities that have a sign (like
/// [`signed_distance`][Self::signed_distance]) are positive to the left of that direction.
#[derive(Clone, Copy, PartialEq)]
pub struct Line {
    a: Point,
    b: Point,
}

impl Line {
    /// Creates the line from `a` towards `b`.
    ///
    /// Returns [`Error::DegenerateLine`] if `a` and `b` coincide, since such a line has no
    /// direction.
    pub fn new(a: Point, b: Point) -> Result<Self> {
        if a == b {
            return Err(Error::DegenerateLine);
        }
        Ok(Self { a, b })
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    /// Returns the direction vector `b - a`. Never zero.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.b - self.a
    }

    /// Returns the direction rotated by 90° counter-clockwise.
    ///
    /// This has the same length as [`direction`][Self::direction] and points to the positive
    /// side of the line.
    #[inline]
    pub fn normal(&self) -> Vector {
        rot90(&self.direction())
    }

    /// Returns the distance between the two points defining the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Computes the cross product of the line direction and `p - a`.
    ///
    /// This is twice the signed area of the triangle `a, b, p`.
    #[inline]
    pub fn cross(&self, p: Point) -> f64 {
        cross(&self.direction(), &(p - self.a))
    }

    /// Computes the signed perpendicular distance of `p` to the line.
    ///
    /// Points to the left of the line (when looking from `a` to `b`) have a positive distance,
    /// points to the right a negative one, and points on the line a distance of zero.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.cross(p) / self.length()
    }

    /// Computes the (unsigned) perpendicular distance of `p` to the line.
    #[inline]
    pub fn distance(&self, p: Point) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Moves both points defining the line by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vector) -> Line {
        Line {
            a: self.a + offset,
            b: self.b + offset,
        }
    }

    /// Returns the line parallel to `self` that passes through `p`.
    ///
    /// The returned line starts at `p` and has the same direction and length as `self`.
    pub fn parallel_through(&self, p: Point) -> Line {
        self.translate(p - self.a)
    }

    /// Returns the line perpendicular to `self` that passes through `p`.
    ///
    /// The returned line starts at `p` and points in the direction of [`normal`][Self::normal].
    pub fn perpendicular_through(&self, p: Point) -> Line {
        Line {
            a: p,
            b: p + self.normal(),
        }
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line ({},{}) -> ({},{})",
            self.a.x, self.a.y, self.b.x, self.b.y
        )
    }
}

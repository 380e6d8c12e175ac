//! Petunin rectangles.
//!
//! A Petunin rectangle of a point set is built around the set's diameter: two of its sides are
//! perpendicular to the diameter and pass through its endpoints, the other two are parallel to
//! it and pass through the points furthest away from it on either side. Every point of the set
//! lies inside of it, and one of its side lengths equals the diameter.

use nalgebra::Unit;

use crate::{
    diameter::find_diameter, point, side::partition_by_side, Error, Line, Point, Rect, Result,
    RotatedRect, Vector,
};

/// What to do when all points lie on one side of the diameter (or on it).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MissingSidePolicy {
    /// Fail with [`Error::MissingSidePoint`].
    #[default]
    Error,
    /// Use the diameter itself as the boundary on the empty side.
    ZeroWidth,
}

/// A rectangle aligned to the diameter of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetuninRect {
    diameter: Line,
    sides: (Point, Point),
    /// Signed offsets of the two parallel sides along the diameter's unit normal. `lo <= hi`.
    lo: f64,
    hi: f64,
}

impl PetuninRect {
    /// Returns the diameter the rectangle was built around.
    #[inline]
    pub fn diameter(&self) -> Line {
        self.diameter
    }

    /// Returns the side points the parallel sides pass through, as passed to
    /// [`build_petunin_rectangle`].
    #[inline]
    pub fn side_points(&self) -> (Point, Point) {
        self.sides
    }

    /// Returns the extent of the rectangle across the diameter.
    ///
    /// This is the distance between the two [`parallel_lines`][Self::parallel_lines].
    #[inline]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Returns the extent of the rectangle along the diameter, which is the diameter's length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.diameter.length()
    }

    pub fn area(&self) -> f64 {
        self.width() * self.length()
    }

    /// Returns the lines parallel to the diameter through both side points.
    pub fn parallel_lines(&self) -> (Line, Line) {
        parallel_lines(&self.diameter, self.sides)
    }

    /// Returns the lines perpendicular to the diameter through both of its endpoints.
    pub fn perpendicular_lines(&self) -> (Line, Line) {
        let d = &self.diameter;
        perpendicular_lines(d, (d.a(), d.b()))
    }

    /// Returns the corners of the rectangle, in counter-clockwise order.
    ///
    /// The first two corners lie on the parallel side with the lower signed offset, starting at
    /// the diameter's first endpoint.
    pub fn corners(&self) -> [Point; 4] {
        let (a, b) = (self.diameter.a(), self.diameter.b());
        let n = self.unit_normal();
        [a + n * self.lo, b + n * self.lo, b + n * self.hi, a + n * self.hi]
    }

    /// Returns whether `p` lies inside the rectangle, or less than `tolerance` outside of it.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.to_rotated().contains_point(p, tolerance)
    }

    /// Converts the rectangle to a [`RotatedRect`] whose frame X axis points along the diameter.
    pub fn to_rotated(&self) -> RotatedRect {
        let axis = Unit::new_normalize(self.diameter.direction());
        let n = self.unit_normal();
        let (a, b) = (self.diameter.a(), self.diameter.b());
        let base = n.dot(&a.coords);
        let rect = Rect::from_min_max(
            point(axis.dot(&a.coords), base + self.lo),
            point(axis.dot(&b.coords), base + self.hi),
        );
        RotatedRect::new(rect, axis)
    }

    fn unit_normal(&self) -> Vector {
        self.diameter.normal() / self.diameter.length()
    }
}

/// Returns the lines parallel to `line` that pass through `p` and `q`.
///
/// Each line is `line` moved by the displacement of the point from `line.a()`.
pub fn parallel_lines(line: &Line, (p, q): (Point, Point)) -> (Line, Line) {
    (line.parallel_through(p), line.parallel_through(q))
}

/// Returns the lines perpendicular to `line` that pass through `a` and `b`.
///
/// For a Petunin rectangle, `a` and `b` are the endpoints of the diameter `line`. Both lines point
/// in the direction of [`Line::normal`].
pub fn perpendicular_lines(line: &Line, (a, b): (Point, Point)) -> (Line, Line) {
    (line.perpendicular_through(a), line.perpendicular_through(b))
}

/// Builds the Petunin rectangle around `diameter`, bounded by the parallel lines through `p` and
/// `q`.
///
/// `p` and `q` must lie on opposite sides of `diameter`, or on it. Their order does not matter.
///
/// # Errors
///
/// Returns [`Error::MissingSidePoint`] if both points lie strictly on the same side.
pub fn build_petunin_rectangle(diameter: Line, (p, q): (Point, Point)) -> Result<PetuninRect> {
    let sp = diameter.signed_distance(p);
    let sq = diameter.signed_distance(q);
    let (lo, hi) = (sp.min(sq), sp.max(sq));
    if lo > 0.0 || hi < 0.0 {
        return Err(Error::MissingSidePoint);
    }

    Ok(PetuninRect {
        diameter,
        sides: (p, q),
        lo,
        hi,
    })
}

/// Computes the Petunin rectangle of `points`.
///
/// # Errors
///
/// - [`Error::InsufficientPoints`] if fewer than 2 points are given.
/// - [`Error::DegenerateLine`] if all points coincide.
/// - [`Error::MissingSidePoint`] if every point lies on one side of the diameter (or on it), and
///   `policy` is [`MissingSidePolicy::Error`].
pub fn petunin_rectangle(points: &[Point], policy: MissingSidePolicy) -> Result<PetuninRect> {
    let (a, b) = find_diameter(points)?;
    let diameter = Line::new(a, b)?;

    let sides = partition_by_side(&diameter, points);
    let side_points = match policy {
        MissingSidePolicy::Error => sides.require()?,
        MissingSidePolicy::ZeroWidth => sides.or_on_line(&diameter),
    };

    build_petunin_rectangle(diameter, side_points)
}

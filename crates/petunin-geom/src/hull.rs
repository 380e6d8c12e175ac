//! Convex hulls.
//!
//! [`Hull`] is a validated convex polygon. The [`ConvexHull`] trait abstracts over algorithms
//! computing one from an unordered point set; [`MonotoneChain`] is the implementation used by
//! default.

use itertools::Itertools;

use crate::{cross, num::TotalF64, Error, Point, Result};

/// Vertices of a convex polygon, in counter-clockwise order.
///
/// A [`Hull`] always has at least 3 vertices and a positive area.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    vertices: Vec<Point>,
}

impl Hull {
    /// Creates a hull from the vertices of a convex polygon.
    ///
    /// The vertices may be given in clockwise or counter-clockwise order; clockwise input is
    /// reversed. Repeated consecutive vertices are merged. Convexity of the input is the caller's
    /// responsibility and only checked in debug builds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientPoints`] if fewer than 3 vertices are passed, and
    /// [`Error::DegenerateHull`] if fewer than 3 distinct vertices remain or the polygon has zero
    /// area (all vertices are collinear).
    pub fn from_vertices(mut vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::InsufficientPoints {
                required: 3,
                actual: vertices.len(),
            });
        }

        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(Error::DegenerateHull);
        }

        let twice_area = shoelace(&vertices);
        if twice_area == 0.0 {
            return Err(Error::DegenerateHull);
        }
        if twice_area < 0.0 {
            vertices.reverse();
        }

        let hull = Self { vertices };
        debug_assert!(hull.is_convex(), "non-convex hull: {:?}", hull.vertices);
        Ok(hull)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns the number of vertices (which is also the number of edges).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always returns `false`; hulls have at least 3 vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the hull's edges as `(start, end)` pairs.
    ///
    /// The last edge connects the last vertex back to the first one.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices.iter().copied().circular_tuple_windows()
    }

    /// Computes the area enclosed by the hull.
    pub fn area(&self) -> f64 {
        shoelace(&self.vertices) * 0.5
    }

    /// Returns whether `p` lies inside the hull, or less than `tolerance` outside of it.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.edges().all(|(a, b)| {
            let edge = b - a;
            cross(&edge, &(p - a)) >= -tolerance * edge.norm()
        })
    }

    fn is_convex(&self) -> bool {
        self.vertices
            .iter()
            .circular_tuple_windows()
            .all(|(a, b, c)| cross(&(b - a), &(c - b)) >= 0.0)
    }
}

/// Computes twice the signed area of a polygon.
fn shoelace(vertices: &[Point]) -> f64 {
    vertices
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| cross(&a.coords, &b.coords))
        .sum()
}

/// Algorithms that compute the convex hull of a point set.
pub trait ConvexHull {
    /// Computes the convex hull of `points`.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::InsufficientPoints`] when given fewer than 3 points, and
    /// [`Error::DegenerateHull`] when all points are collinear or coincide.
    fn convex_hull(&self, points: &[Point]) -> Result<Hull>;
}

impl<H: ConvexHull + ?Sized> ConvexHull for &H {
    fn convex_hull(&self, points: &[Point]) -> Result<Hull> {
        (**self).convex_hull(points)
    }
}

/// Andrew's monotone chain algorithm.
///
/// Runs in `O(n log n)`. Points on the boundary that are not corners of the hull (collinear with
/// their neighbours) are dropped, as are duplicates.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotoneChain;

impl ConvexHull for MonotoneChain {
    fn convex_hull(&self, points: &[Point]) -> Result<Hull> {
        if points.len() < 3 {
            return Err(Error::InsufficientPoints {
                required: 3,
                actual: points.len(),
            });
        }

        // `+ 0.0` turns `-0.0` into `0.0`, which the total order would otherwise sort first.
        let mut sorted = points
            .iter()
            .map(|p| Point::new(p.x + 0.0, p.y + 0.0))
            .collect::<Vec<_>>();
        sorted.sort_unstable_by_key(|p| (TotalF64(p.x), TotalF64(p.y)));
        sorted.dedup();

        fn ccw(p: Point, q: Point, r: Point) -> bool {
            cross(&(q - p), &(r - q)) > 0.0
        }

        let mut lower = Vec::<Point>::new();
        let mut upper = Vec::<Point>::new();
        for &p in &sorted {
            while matches!(lower.as_slice(), [.., l1, l2] if !ccw(*l1, *l2, p)) {
                lower.pop();
            }
            lower.push(p);
        }
        for &p in sorted.iter().rev() {
            while matches!(upper.as_slice(), [.., u1, u2] if !ccw(*u1, *u2, p)) {
                upper.pop();
            }
            upper.push(p);
        }

        // The endpoints of each chain are the first points of the other one.
        lower.pop();
        upper.pop();
        lower.append(&mut upper);

        if lower.len() < 3 {
            log::trace!(
                "hull of {} points collapsed to {} vertices",
                points.len(),
                lower.len()
            );
            return Err(Error::DegenerateHull);
        }

        Ok(Hull { vertices: lower })
    }
}

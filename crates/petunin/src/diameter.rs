//! Diameter of a point set: the pair of points furthest apart.

use itertools::Itertools;
use nalgebra::distance_squared;
use petunin_geom::cross;

use crate::{Error, Hull, Point, Result};

/// Finds the two points of `points` that are furthest apart.
///
/// Every pair of points is checked, so this takes `O(n²)` time. A pair only replaces the current
/// best one if it is *strictly* further apart, so among several pairs with the same distance the
/// first one in iteration order (`(0, 1), (0, 2), …, (1, 2), …`) is returned. If all points
/// coincide, that is the first two points.
///
/// The returned points are always elements of `points`, in the order they appear there.
///
/// # Errors
///
/// Returns [`Error::InsufficientPoints`] if `points` contains fewer than 2 points.
pub fn find_diameter(points: &[Point]) -> Result<(Point, Point)> {
    let [first, second, ..] = points else {
        return Err(Error::InsufficientPoints {
            required: 2,
            actual: points.len(),
        });
    };

    let mut best = (*first, *second);
    let mut max_dist = distance_squared(first, second);
    for (p, q) in points.iter().tuple_combinations() {
        let dist = distance_squared(p, q);
        if dist > max_dist {
            max_dist = dist;
            best = (*p, *q);
        }
    }

    log::trace!(
        "diameter of {} points: {:?} <-> {:?} ({})",
        points.len(),
        best.0,
        best.1,
        max_dist.sqrt()
    );
    Ok(best)
}

/// Finds the two vertices of `hull` that are furthest apart, using rotating calipers.
///
/// This takes `O(h)` time for a hull with `h` vertices. Since the diameter of a point set is
/// always attained by two of its hull vertices, this yields the same distance as
/// [`find_diameter`] on the input points. When several pairs attain that distance, the pair
/// returned may differ.
pub fn hull_diameter(hull: &Hull) -> (Point, Point) {
    let v = hull.vertices();
    let n = v.len();
    let next = |i: usize| (i + 1) % n;

    let mut best = (v[0], v[1]);
    let mut max_dist = distance_squared(&v[0], &v[1]);
    let mut consider = |p: Point, q: Point| {
        let dist = distance_squared(&p, &q);
        if dist > max_dist {
            max_dist = dist;
            best = (p, q);
        }
    };

    // For each edge, advance `j` to the vertex furthest away from the edge's supporting line.
    // That vertex is antipodal to both edge endpoints, and it only ever moves forward.
    let mut j = 1;
    for i in 0..n {
        let edge = v[next(i)] - v[i];
        while cross(&edge, &(v[next(j)] - v[i])) > cross(&edge, &(v[j] - v[i])) {
            j = next(j);
        }
        consider(v[i], v[j]);
        consider(v[next(i)], v[j]);
    }

    best
}

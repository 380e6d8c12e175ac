//! Minimum-area enclosing rectangles.
//!
//! The minimum-area rectangle enclosing a convex polygon always has a side flush with one of the
//! polygon's edges. Both search strategies therefore try every hull edge as the orientation of
//! the rectangle; they differ in how the rectangle's extents along that orientation are found.

use nalgebra::Unit;
use petunin_geom::{hull::ConvexHull, num::TotalF64, rot90};

use crate::{point, Error, Hull, Point, Rect, Result, RotatedRect, Vector};

/// Strategy used by [`min_area_rectangle`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// Projects every hull vertex onto every edge's frame. Takes `O(h²)` time.
    EdgeScan,
    /// Rotating calipers: the four vertices touching the rectangle only ever advance around the
    /// hull as the edge index increases. Takes `O(h)` time.
    #[default]
    RotatingCalipers,
}

/// Computes the minimum-area rectangle enclosing `hull`.
///
/// The returned rectangle's frame X axis points along the hull edge it is flush with. If several
/// edges yield the same area, the first one is used.
///
/// # Errors
///
/// Returns [`Error::DegenerateHull`] if no orientation yields a rectangle with positive area.
pub fn min_area_rectangle(hull: &Hull, search: Search) -> Result<RotatedRect> {
    let best = match search {
        Search::EdgeScan => edge_scan(hull),
        Search::RotatingCalipers => rotating_calipers(hull),
    };

    match best {
        Some(rect) if rect.area() > 0.0 => {
            log::trace!("min-area rectangle of {} vertices: {:?}", hull.len(), rect);
            Ok(rect)
        }
        _ => Err(Error::DegenerateHull),
    }
}

/// Computes the convex hull of `points` with `hull_provider`, then its minimum-area rectangle.
///
/// # Errors
///
/// Forwards the errors of [`ConvexHull::convex_hull`] and [`min_area_rectangle`]. In particular,
/// collinear inputs fail with [`Error::DegenerateHull`].
pub fn min_area_rectangle_of<H: ConvexHull + ?Sized>(
    points: &[Point],
    hull_provider: &H,
    search: Search,
) -> Result<RotatedRect> {
    let hull = hull_provider.convex_hull(points)?;
    min_area_rectangle(&hull, search)
}

fn edge_axis(p: Point, q: Point) -> Option<Unit<Vector>> {
    Unit::try_new(q - p, 0.0)
}

fn edge_scan(hull: &Hull) -> Option<RotatedRect> {
    hull.edges()
        .filter_map(|(p, q)| edge_axis(p, q))
        .filter_map(|axis| RotatedRect::bounding(axis, hull.vertices().iter().copied()))
        .min_by_key(|rect| TotalF64(rect.area()))
}

fn rotating_calipers(hull: &Hull) -> Option<RotatedRect> {
    let v = hull.vertices();
    let n = v.len();
    let next = |i: usize| (i + 1) % n;
    let proj = |i: usize, dir: &Vector| v[i].coords.dot(dir);

    let u0 = hull.edges().find_map(|(p, q)| edge_axis(p, q))?.into_inner();
    let n0 = rot90(&u0);
    let extremal = |dir: Vector| (0..n).max_by_key(|&i| TotalF64(proj(i, &dir)));
    // Furthest along the edge, furthest away from the edge, furthest against the edge.
    let mut right = extremal(u0)?;
    let mut top = extremal(n0)?;
    let mut left = extremal(-u0)?;

    let mut best: Option<RotatedRect> = None;
    for i in 0..n {
        let Some(axis) = edge_axis(v[i], v[next(i)]) else {
            continue;
        };
        let u = axis.into_inner();
        let normal = rot90(&u);

        while proj(next(right), &u) > proj(right, &u) {
            right = next(right);
        }
        while proj(next(top), &normal) > proj(top, &normal) {
            top = next(top);
        }
        while proj(next(left), &u) < proj(left, &u) {
            left = next(left);
        }

        let rect = Rect::bounding([
            point(proj(left, &u), proj(i, &normal)),
            point(proj(right, &u), proj(top, &normal)),
        ])?;
        if best.map_or(true, |best| rect.area() < best.area()) {
            best = Some(RotatedRect::new(rect, axis));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_6, PI};

    use approx::assert_relative_eq;
    use petunin_geom::MonotoneChain;

    use crate::{
        petunin_rect::{petunin_rectangle, MissingSidePolicy},
        test::{random_points, regular_polygon, rigid_transform, unit_square},
    };

    use super::*;

    const SEARCHES: [Search; 2] = [Search::EdgeScan, Search::RotatingCalipers];

    fn min_area(points: &[Point], search: Search) -> f64 {
        min_area_rectangle_of(points, &MonotoneChain, search)
            .unwrap()
            .area()
    }

    #[test]
    fn unit_square_area() {
        for search in SEARCHES {
            let rect = min_area_rectangle_of(&unit_square(), &MonotoneChain, search).unwrap();
            assert_relative_eq!(rect.area(), 1.0, max_relative = 1e-12);
            assert_relative_eq!(rect.center(), point(0.5, 0.5), epsilon = 1e-12);
        }
    }

    #[test]
    fn collinear_points() {
        let collinear = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)];
        for search in SEARCHES {
            assert_eq!(
                min_area_rectangle_of(&collinear, &MonotoneChain, search),
                Err(Error::DegenerateHull)
            );
        }
    }

    #[test]
    fn regular_hexagon() {
        let expected = 2.0 * 3.0f64.sqrt();
        for phase in [0.0, 0.3, FRAC_PI_6, 1.0] {
            let hexagon = regular_polygon(6, 1.0, point(0.0, 0.0), phase);
            for search in SEARCHES {
                assert_relative_eq!(min_area(&hexagon, search), expected, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn rotated_rectangle() {
        let corners = Rect::from_min_max(point(-1.5, -0.5), point(1.5, 0.5)).corners();
        let mut points = rigid_transform(&corners, 0.4, Vector::new(7.0, -2.0));
        points.push(point(7.0, -2.0));

        for search in SEARCHES {
            let rect = min_area_rectangle_of(&points, &MonotoneChain, search).unwrap();
            assert_relative_eq!(rect.area(), 3.0, max_relative = 1e-12);
            // The rectangle may be flush with either edge direction.
            let rotation = rect.rotation_radians().rem_euclid(PI / 2.0);
            assert_relative_eq!(rotation, 0.4, epsilon = 1e-9);
        }
    }

    #[test]
    fn right_triangle() {
        let points = [point(0.0, 0.0), point(4.0, 0.0), point(0.0, 3.0)];
        for search in SEARCHES {
            assert_relative_eq!(min_area(&points, search), 12.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn repeated_hull_vertices() {
        let hull = Hull::from_vertices(vec![
            point(0.0, 0.0),
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(0.0, 1.0),
        ])
        .unwrap();
        for search in SEARCHES {
            let rect = min_area_rectangle(&hull, search).unwrap();
            assert_relative_eq!(rect.area(), 1.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn negative_zero_coordinates() {
        let points = [
            point(-0.0, 1.0),
            point(0.0, 0.0),
            point(0.0, 2.0),
            point(1.0, 1.0),
        ];
        for search in SEARCHES {
            assert_relative_eq!(min_area(&points, search), 2.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn insufficient_points() {
        let points = [point(0.0, 0.0), point(1.0, 1.0)];
        assert_eq!(
            min_area_rectangle_of(&points, &MonotoneChain, Search::default()),
            Err(Error::InsufficientPoints {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn contains_all_points() {
        let mut rng = fastrand::Rng::with_seed(0x9a4c_e013_7f25_d8b6);
        for n in [3, 4, 8, 25, 200] {
            let points = random_points(&mut rng, n, 10.0);
            let hull = MonotoneChain.convex_hull(&points).unwrap();
            for search in SEARCHES {
                let rect = min_area_rectangle(&hull, search).unwrap();
                for &p in &points {
                    assert!(rect.contains_point(p, 1e-9), "{p} outside of {rect:?}");
                }
                assert!(rect.area() >= hull.area() * (1.0 - 1e-12));
            }
        }
    }

    #[test]
    fn searches_agree() {
        let mut rng = fastrand::Rng::with_seed(0x2e6b_51f9_c0a7_3d84);
        for _ in 0..100 {
            let points = random_points(&mut rng, 50, 1.0);
            let hull = MonotoneChain.convex_hull(&points).unwrap();
            let scan = min_area_rectangle(&hull, Search::EdgeScan).unwrap();
            let calipers = min_area_rectangle(&hull, Search::RotatingCalipers).unwrap();
            assert_relative_eq!(scan.area(), calipers.area(), max_relative = 1e-9);
        }
    }

    #[test]
    fn rigid_transform_invariance() {
        let mut rng = fastrand::Rng::with_seed(0x64d0_8e3b_a517_f2c9);
        for _ in 0..20 {
            let points = random_points(&mut rng, 40, 5.0);
            let expected = min_area(&points, Search::default());

            let angle = rng.f64() * 2.0 * PI;
            let offset = Vector::new(rng.f64() * 100.0 - 50.0, rng.f64() * 100.0 - 50.0);
            for search in SEARCHES {
                let moved = rigid_transform(&points, 0.0, offset);
                assert_relative_eq!(min_area(&moved, search), expected, max_relative = 1e-9);

                let transformed = rigid_transform(&points, angle, offset);
                assert_relative_eq!(min_area(&transformed, search), expected, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn never_larger_than_petunin() {
        let mut rng = fastrand::Rng::with_seed(0xf1e2_d3c4_b5a6_9788);
        for _ in 0..200 {
            let points = random_points(&mut rng, 30, 1.0);
            let petunin = petunin_rectangle(&points, MissingSidePolicy::ZeroWidth).unwrap();
            let min = min_area(&points, Search::default());
            assert!(
                petunin.area() >= min * (1.0 - 1e-9),
                "petunin area {} < min area {}",
                petunin.area(),
                min
            );
        }
    }
}

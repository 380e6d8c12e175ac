//! Partitioning of point sets by the side of a line they lie on.

use crate::{Error, Line, Point, Result};

/// The points furthest away from a line on either side of it.
///
/// Returned by [`partition_by_side`]. A side is [`None`] if no point lies strictly on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SidePoints {
    /// Furthest point to the left of the line (positive signed distance).
    pub positive: Option<Point>,
    /// Furthest point to the right of the line (negative signed distance).
    pub negative: Option<Point>,
}

impl SidePoints {
    /// Returns both side points as a `(positive, negative)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSidePoint`] if either side is empty.
    pub fn require(&self) -> Result<(Point, Point)> {
        match (self.positive, self.negative) {
            (Some(pos), Some(neg)) => Ok((pos, neg)),
            _ => Err(Error::MissingSidePoint),
        }
    }

    /// Returns both side points as a `(positive, negative)` pair, substituting the first point of
    /// `line` for an empty side.
    ///
    /// Since the substitute lies on `line`, a rectangle built from the result has zero width on
    /// that side.
    pub fn or_on_line(&self, line: &Line) -> (Point, Point) {
        (
            self.positive.unwrap_or(line.a()),
            self.negative.unwrap_or(line.a()),
        )
    }
}

/// Finds the point with the largest perpendicular distance to `line` on each side of it.
///
/// The side of a point `p` is the sign of the cross product of the line's direction and
/// `p - line.a()`. Points on the line (cross product of exactly zero) belong to neither side.
/// Among points with equal distance, the first one in `points` is selected.
pub fn partition_by_side(line: &Line, points: &[Point]) -> SidePoints {
    let mut positive: Option<(Point, f64)> = None;
    let mut negative: Option<(Point, f64)> = None;

    for &p in points {
        let signed = line.signed_distance(p);
        let (side, dist) = if signed > 0.0 {
            (&mut positive, signed)
        } else if signed < 0.0 {
            (&mut negative, -signed)
        } else {
            continue;
        };

        if side.map_or(true, |(_, best)| dist > best) {
            *side = Some((p, dist));
        }
    }

    log::trace!(
        "furthest from {:?}: {:?} (+), {:?} (-)",
        line,
        positive,
        negative
    );

    SidePoints {
        positive: positive.map(|(p, _)| p),
        negative: negative.map(|(p, _)| p),
    }
}

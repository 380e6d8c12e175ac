//! Random point generation.

use fastrand::Rng;

use crate::{point, Point, Rect};

/// Produces random point sets.
///
/// Implementations draw all randomness from the [`Rng`] passed to [`sample`][Self::sample], so
/// that seeding the [`Rng`] makes the output reproducible.
pub trait PointSampler {
    /// Samples `n` points.
    fn sample(&self, rng: &mut Rng, n: usize) -> Vec<Point>;
}

impl<S: PointSampler + ?Sized> PointSampler for &S {
    fn sample(&self, rng: &mut Rng, n: usize) -> Vec<Point> {
        (**self).sample(rng, n)
    }
}

/// Samples points uniformly from an axis-aligned [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSampler {
    region: Rect,
}

impl UniformSampler {
    /// Samples from `[0, 1)²`.
    pub const UNIT_SQUARE: Self = Self {
        region: Rect::UNIT,
    };

    pub fn new(region: Rect) -> Self {
        Self { region }
    }

    /// Samples from `[0, size)²`.
    pub fn square(size: f64) -> Self {
        Self::new(Rect::from_min_max(point(0.0, 0.0), point(size, size)))
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }
}

impl Default for UniformSampler {
    fn default() -> Self {
        Self::UNIT_SQUARE
    }
}

impl PointSampler for UniformSampler {
    fn sample(&self, rng: &mut Rng, n: usize) -> Vec<Point> {
        let (min, size) = (self.region.min(), self.region.size());
        (0..n)
            .map(|_| point(min.x + rng.f64() * size.x, min.y + rng.f64() * size.y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_region() {
        let region = Rect::from_min_max(point(-3.0, 2.0), point(5.0, 2.5));
        let sampler = UniformSampler::new(region);
        let points = sampler.sample(&mut Rng::with_seed(7), 500);
        assert_eq!(points.len(), 500);
        for p in points {
            assert!(region.contains_point(p), "{p}");
        }

        let points = UniformSampler::square(10.0).sample(&mut Rng::with_seed(8), 500);
        assert!(points.iter().any(|p| p.x > 5.0));
        assert!(points.iter().all(|p| (0.0..10.0).contains(&p.x)));
    }

    #[test]
    fn seeded_is_reproducible() {
        let sampler = UniformSampler::default();
        let a = sampler.sample(&mut Rng::with_seed(123), 20);
        let b = (&sampler).sample(&mut Rng::with_seed(123), 20);
        let c = sampler.sample(&mut Rng::with_seed(124), 20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

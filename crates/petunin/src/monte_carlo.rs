//! Monte Carlo comparison of Petunin rectangles and minimum-area rectangles.
//!
//! Every trial samples a random point set, computes both rectangles and records their areas.
//! The averages over all trials show how well the Petunin rectangle approximates the optimum.

use std::fmt;

use fastrand::Rng;
use petunin_geom::{hull::ConvexHull, MonotoneChain};
use rayon::prelude::*;

use crate::{
    min_rect::{min_area_rectangle, Search},
    petunin_rect::{petunin_rectangle, MissingSidePolicy, PetuninRect},
    rectangle::Rectangle,
    sample::{PointSampler, UniformSampler},
    timer::Timer,
    Error, Hull, Point, RotatedRect,
};

/// Seed used when [`ComparisonOptions::seed`] is not called.
pub const DEFAULT_SEED: u64 = 0x5eed_2024_9e7a_1117;

/// Number of times a degenerate sample is redrawn before giving up.
const MAX_RESAMPLES: u32 = 16;

/// What to do with trials whose point set is degenerate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Abort the run with the trial's error.
    #[default]
    Fail,
    /// Draw a new point set for the trial.
    ///
    /// Only [degenerate](Error::is_degenerate) errors are retried, and only a limited number of
    /// times per trial.
    Resample,
}

/// Configuration of a [`MonteCarlo`] run.
///
/// `S` samples the point sets, `H` computes their convex hulls.
#[derive(Debug, Clone)]
pub struct ComparisonOptions<S = UniformSampler, H = MonotoneChain> {
    trials: usize,
    points_per_trial: usize,
    sampler: S,
    hull_provider: H,
    seed: u64,
    search: Search,
    missing_side: MissingSidePolicy,
    degenerate: DegeneratePolicy,
    parallel: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            trials: 100,
            points_per_trial: 200,
            sampler: UniformSampler::UNIT_SQUARE,
            hull_provider: MonotoneChain,
            seed: DEFAULT_SEED,
            search: Search::default(),
            missing_side: MissingSidePolicy::default(),
            degenerate: DegeneratePolicy::default(),
            parallel: false,
        }
    }
}

impl<S, H> ComparisonOptions<S, H> {
    /// Sets the number of trials to run.
    ///
    /// # Panics
    ///
    /// This will panic if `trials` is 0.
    #[inline]
    pub fn trials(self, trials: usize) -> Self {
        assert!(trials > 0, "number of trials must be positive");
        Self { trials, ..self }
    }

    /// Sets the number of points sampled for each trial.
    #[inline]
    pub fn points_per_trial(self, points_per_trial: usize) -> Self {
        Self {
            points_per_trial,
            ..self
        }
    }

    /// Sets the [`PointSampler`] that generates the point sets.
    pub fn sampler<S2: PointSampler>(self, sampler: S2) -> ComparisonOptions<S2, H> {
        ComparisonOptions {
            trials: self.trials,
            points_per_trial: self.points_per_trial,
            sampler,
            hull_provider: self.hull_provider,
            seed: self.seed,
            search: self.search,
            missing_side: self.missing_side,
            degenerate: self.degenerate,
            parallel: self.parallel,
        }
    }

    /// Sets the [`ConvexHull`] algorithm used before searching for the minimum-area rectangle.
    pub fn hull_provider<H2: ConvexHull>(self, hull_provider: H2) -> ComparisonOptions<S, H2> {
        ComparisonOptions {
            trials: self.trials,
            points_per_trial: self.points_per_trial,
            sampler: self.sampler,
            hull_provider,
            seed: self.seed,
            search: self.search,
            missing_side: self.missing_side,
            degenerate: self.degenerate,
            parallel: self.parallel,
        }
    }

    /// Sets the base seed of the random number generators.
    ///
    /// Each trial seeds its own generator from this seed and the trial index, so the same seed
    /// always samples the same point sets, with or without [`parallel`][Self::parallel].
    #[inline]
    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    #[inline]
    pub fn search(self, search: Search) -> Self {
        Self { search, ..self }
    }

    #[inline]
    pub fn missing_side(self, missing_side: MissingSidePolicy) -> Self {
        Self {
            missing_side,
            ..self
        }
    }

    #[inline]
    pub fn degenerate(self, degenerate: DegeneratePolicy) -> Self {
        Self { degenerate, ..self }
    }

    /// Selects whether to spread the trials across the threads of the global [`rayon`] pool.
    #[inline]
    pub fn parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    #[inline]
    pub fn get_seed(&self) -> u64 {
        self.seed
    }
}

/// A failed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("trial {trial} failed: {source}")]
pub struct TrialError {
    /// Index of the trial, starting at 0.
    pub trial: usize,
    pub source: Error,
}

/// Everything computed during a single trial.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub index: usize,
    /// The sampled point set.
    pub points: Vec<Point>,
    /// Convex hull of [`points`][Self::points].
    pub hull: Hull,
    pub petunin: PetuninRect,
    pub min_rect: RotatedRect,
    /// Number of degenerate point sets that were discarded before this one.
    pub resampled: u32,
}

impl TrialOutcome {
    /// Returns how much larger the Petunin rectangle is than the minimum-area rectangle.
    pub fn ratio(&self) -> f64 {
        self.petunin.area() / self.min_rect.area()
    }

    /// Returns both rectangles, the Petunin rectangle first.
    pub fn rectangles(&self) -> [Rectangle; 2] {
        [self.petunin.into(), self.min_rect.into()]
    }
}

/// Aggregated result of a [`MonteCarlo`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub trials: usize,
    pub avg_petunin_area: f64,
    pub avg_min_rect_area: f64,
    /// Mean of the per-trial ratios of Petunin area to minimum area.
    pub mean_ratio: f64,
    /// Largest per-trial ratio of Petunin area to minimum area.
    pub max_ratio: f64,
    /// Total number of degenerate point sets that were discarded.
    pub resampled: u32,
}

impl Comparison {
    /// Returns the ratio of the average areas.
    pub fn ratio(&self) -> f64 {
        self.avg_petunin_area / self.avg_min_rect_area
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "trials:                     {}", self.trials)?;
        writeln!(f, "average Petunin area:       {:.6}", self.avg_petunin_area)?;
        writeln!(f, "average min-rectangle area: {:.6}", self.avg_min_rect_area)?;
        writeln!(f, "ratio of averages:          {:.4}", self.ratio())?;
        write!(
            f,
            "per-trial ratio:            mean {:.4}, max {:.4}",
            self.mean_ratio, self.max_ratio
        )?;
        if self.resampled > 0 {
            write!(f, "\nresampled point sets:       {}", self.resampled)?;
        }
        Ok(())
    }
}

/// Running sums over the trials seen so far.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    trials: usize,
    petunin_area: f64,
    min_rect_area: f64,
    ratio: f64,
    max_ratio: f64,
    resampled: u32,
}

impl Totals {
    fn add(self, outcome: &TrialOutcome) -> Self {
        let ratio = outcome.ratio();
        Self {
            trials: self.trials + 1,
            petunin_area: self.petunin_area + outcome.petunin.area(),
            min_rect_area: self.min_rect_area + outcome.min_rect.area(),
            ratio: self.ratio + ratio,
            max_ratio: self.max_ratio.max(ratio),
            resampled: self.resampled + outcome.resampled,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            petunin_area: self.petunin_area + other.petunin_area,
            min_rect_area: self.min_rect_area + other.min_rect_area,
            ratio: self.ratio + other.ratio,
            max_ratio: self.max_ratio.max(other.max_ratio),
            resampled: self.resampled + other.resampled,
        }
    }

    fn finish(self) -> Comparison {
        let n = self.trials as f64;
        Comparison {
            trials: self.trials,
            avg_petunin_area: self.petunin_area / n,
            avg_min_rect_area: self.min_rect_area / n,
            mean_ratio: self.ratio / n,
            max_ratio: self.max_ratio,
            resampled: self.resampled,
        }
    }
}

/// Runs `trials` trials with `points_per_trial` points each and default options otherwise.
///
/// # Panics
///
/// This will panic if `trials` is 0, see [`ComparisonOptions::trials`].
pub fn run(trials: usize, points_per_trial: usize) -> Result<Comparison, TrialError> {
    MonteCarlo::new(
        ComparisonOptions::default()
            .trials(trials)
            .points_per_trial(points_per_trial),
    )
    .run()
}

/// Compares Petunin rectangles with minimum-area rectangles on random point sets.
pub struct MonteCarlo<S = UniformSampler, H = MonotoneChain> {
    options: ComparisonOptions<S, H>,
    t_petunin: Timer,
    t_min_rect: Timer,
}

impl<S: PointSampler + Sync, H: ConvexHull + Sync> MonteCarlo<S, H> {
    pub fn new(options: ComparisonOptions<S, H>) -> Self {
        Self {
            options,
            t_petunin: Timer::new("petunin"),
            t_min_rect: Timer::new("min_rect"),
        }
    }

    #[inline]
    pub fn options(&self) -> &ComparisonOptions<S, H> {
        &self.options
    }

    /// Returns the timers measuring both rectangle computations.
    ///
    /// Every sampled point set records one measurement of the Petunin timer. The minimum-area
    /// timer only records one if the Petunin rectangle was found, so point sets that are
    /// resampled or fail in the Petunin step leave the two counts apart. Displaying a timer resets
    /// it, see [`Timer`].
    pub fn timers(&self) -> impl IntoIterator<Item = &Timer> + '_ {
        [&self.t_petunin, &self.t_min_rect]
    }

    /// Runs all trials and aggregates their results.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing trial. When running in parallel, "first" refers to
    /// the order in which trials finish, not their index.
    pub fn run(&self) -> Result<Comparison, TrialError> {
        let trials = self.options.trials;
        log::debug!(
            "running {} trials with {} points each (seed {:#x}, parallel: {})",
            trials,
            self.options.points_per_trial,
            self.options.seed,
            self.options.parallel,
        );

        let totals = if self.options.parallel {
            (0..trials)
                .into_par_iter()
                .map(|index| -> Result<Totals, TrialError> {
                    Ok(Totals::default().add(&self.run_trial(index)?))
                })
                .try_reduce(Totals::default, |a, b| Ok(a.merge(b)))?
        } else {
            (0..trials).try_fold(Totals::default(), |totals, index| {
                Ok::<_, TrialError>(totals.add(&self.run_trial(index)?))
            })?
        };

        let comparison = totals.finish();
        log::debug!(
            "average areas: {} (Petunin) vs. {} (min)",
            comparison.avg_petunin_area,
            comparison.avg_min_rect_area
        );
        Ok(comparison)
    }

    /// Runs the trial with the given index on its own.
    ///
    /// This samples the same point set that [`run`][Self::run] would use for that trial.
    ///
    /// # Errors
    ///
    /// Fails if the sampled point set is degenerate and [`DegeneratePolicy::Fail`] is configured
    /// (or resampling gave up), or if it has too few points.
    pub fn run_trial(&self, index: usize) -> Result<TrialOutcome, TrialError> {
        let mut rng = self.trial_rng(index);
        let mut resampled = 0;
        loop {
            let points = self
                .options
                .sampler
                .sample(&mut rng, self.options.points_per_trial);

            match self.evaluate(index, points) {
                Ok(outcome) => {
                    log::trace!(
                        "trial {}: {} vs. {} (ratio {})",
                        index,
                        outcome.petunin.area(),
                        outcome.min_rect.area(),
                        outcome.ratio()
                    );
                    return Ok(TrialOutcome {
                        resampled,
                        ..outcome
                    });
                }
                Err(e)
                    if e.is_degenerate()
                        && self.options.degenerate == DegeneratePolicy::Resample
                        && resampled < MAX_RESAMPLES =>
                {
                    log::warn!("trial {}: {}, resampling", index, e);
                    resampled += 1;
                }
                Err(source) => {
                    return Err(TrialError {
                        trial: index,
                        source,
                    })
                }
            }
        }
    }

    fn trial_rng(&self, index: usize) -> Rng {
        Rng::with_seed(self.options.seed ^ (index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }

    fn evaluate(&self, index: usize, points: Vec<Point>) -> Result<TrialOutcome, Error> {
        let petunin = self
            .t_petunin
            .time(|| petunin_rectangle(&points, self.options.missing_side))?;
        let (hull, min_rect) = self.t_min_rect.time(|| {
            let hull = self.options.hull_provider.convex_hull(&points)?;
            let rect = min_area_rectangle(&hull, self.options.search)?;
            Ok::<_, Error>((hull, rect))
        })?;

        Ok(TrialOutcome {
            index,
            points,
            hull,
            petunin,
            min_rect,
            resampled: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_relative_eq;

    use crate::point;

    use super::*;

    /// Samples points on the X axis.
    struct Collinear;

    impl PointSampler for Collinear {
        fn sample(&self, rng: &mut Rng, n: usize) -> Vec<Point> {
            (0..n).map(|_| point(rng.f64(), 0.0)).collect()
        }
    }

    /// Samples collinear points about half of the time.
    struct SometimesCollinear;

    impl PointSampler for SometimesCollinear {
        fn sample(&self, rng: &mut Rng, n: usize) -> Vec<Point> {
            if rng.bool() {
                Collinear.sample(rng, n)
            } else {
                UniformSampler::UNIT_SQUARE.sample(rng, n)
            }
        }
    }

    /// Counts its invocations and defers to [`MonotoneChain`].
    #[derive(Debug, Default)]
    struct CountingHull {
        calls: AtomicUsize,
    }

    impl ConvexHull for CountingHull {
        fn convex_hull(&self, points: &[Point]) -> Result<Hull, Error> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            MonotoneChain.convex_hull(points)
        }
    }

    fn options() -> ComparisonOptions {
        ComparisonOptions::default()
            .trials(30)
            .points_per_trial(50)
            .seed(0x1234_5678)
    }

    #[test]
    fn petunin_is_never_smaller() {
        let comparison = MonteCarlo::new(options()).run().unwrap();
        assert_eq!(comparison.trials, 30);
        assert_eq!(comparison.resampled, 0);
        assert!(comparison.avg_min_rect_area > 0.0);
        assert!(comparison.avg_min_rect_area <= 1.0);
        assert!(comparison.avg_petunin_area >= comparison.avg_min_rect_area);
        assert!(comparison.ratio() >= 1.0);
        assert!(comparison.mean_ratio >= 1.0);
        assert!(comparison.max_ratio >= comparison.mean_ratio);
    }

    #[test]
    fn same_seed_same_result() {
        let a = MonteCarlo::new(options()).run().unwrap();
        let b = MonteCarlo::new(options()).run().unwrap();
        assert_eq!(a, b);

        let c = MonteCarlo::new(options().seed(1)).run().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn parallel_matches_sequential() {
        let sequential = MonteCarlo::new(options()).run().unwrap();
        let parallel = MonteCarlo::new(options().parallel(true)).run().unwrap();
        assert_eq!(parallel.trials, sequential.trials);
        assert_relative_eq!(
            parallel.avg_petunin_area,
            sequential.avg_petunin_area,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            parallel.avg_min_rect_area,
            sequential.avg_min_rect_area,
            max_relative = 1e-12
        );
        assert_relative_eq!(parallel.mean_ratio, sequential.mean_ratio, max_relative = 1e-12);
        assert_eq!(parallel.max_ratio, sequential.max_ratio);
    }

    #[test]
    fn strategies_agree() {
        let calipers = MonteCarlo::new(options().search(Search::RotatingCalipers))
            .run()
            .unwrap();
        let scan = MonteCarlo::new(options().search(Search::EdgeScan))
            .run()
            .unwrap();
        assert_relative_eq!(
            calipers.avg_min_rect_area,
            scan.avg_min_rect_area,
            max_relative = 1e-9
        );
        assert_eq!(calipers.avg_petunin_area, scan.avg_petunin_area);
    }

    #[test]
    fn areas_scale_with_region() {
        let unit = MonteCarlo::new(options()).run().unwrap();
        let large = MonteCarlo::new(options().sampler(UniformSampler::square(10.0)))
            .run()
            .unwrap();
        assert_relative_eq!(
            large.avg_min_rect_area,
            unit.avg_min_rect_area * 100.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            large.avg_petunin_area,
            unit.avg_petunin_area * 100.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(large.mean_ratio, unit.mean_ratio, max_relative = 1e-9);
    }

    #[test]
    fn single_trial() {
        let mc = MonteCarlo::new(options());
        let outcome = mc.run_trial(3).unwrap();
        assert_eq!(outcome.index, 3);
        assert_eq!(outcome.points.len(), 50);
        assert_eq!(outcome.resampled, 0);
        assert!(outcome.ratio() >= 1.0);

        for &p in &outcome.points {
            assert!(outcome.hull.contains_point(p, 1e-9));
            for rect in outcome.rectangles() {
                assert!(rect.contains_point(p, 1e-9), "{p} outside of {rect:?}");
            }
        }

        let again = mc.run_trial(3).unwrap();
        assert_eq!(again.points, outcome.points);
        assert_ne!(mc.run_trial(4).unwrap().points, outcome.points);
    }

    #[test]
    fn degenerate_fails() {
        let mc = MonteCarlo::new(options().sampler(Collinear));
        assert_eq!(
            mc.run(),
            Err(TrialError {
                trial: 0,
                source: Error::MissingSidePoint
            })
        );

        let mc = MonteCarlo::new(
            options()
                .sampler(Collinear)
                .missing_side(MissingSidePolicy::ZeroWidth),
        );
        assert_eq!(
            mc.run(),
            Err(TrialError {
                trial: 0,
                source: Error::DegenerateHull
            })
        );
    }

    #[test]
    fn degenerate_resampled() {
        let mc = MonteCarlo::new(
            options()
                .sampler(SometimesCollinear)
                .degenerate(DegeneratePolicy::Resample),
        );
        let comparison = mc.run().unwrap();
        assert_eq!(comparison.trials, 30);
        assert!(comparison.resampled > 0);
        assert!(comparison.ratio() >= 1.0);

        // Resampling gives up eventually.
        let mc = MonteCarlo::new(
            options()
                .sampler(Collinear)
                .degenerate(DegeneratePolicy::Resample),
        );
        assert_eq!(
            mc.run_trial(0).unwrap_err(),
            TrialError {
                trial: 0,
                source: Error::MissingSidePoint
            }
        );
    }

    #[test]
    fn insufficient_points_always_fail() {
        let mc = MonteCarlo::new(
            options()
                .points_per_trial(1)
                .degenerate(DegeneratePolicy::Resample),
        );
        assert_eq!(
            mc.run(),
            Err(TrialError {
                trial: 0,
                source: Error::InsufficientPoints {
                    required: 2,
                    actual: 1
                }
            })
        );
    }

    #[test]
    fn timers_count_trials() {
        let mc = MonteCarlo::new(options().trials(5));
        mc.run().unwrap();
        for timer in mc.timers() {
            assert_eq!(timer.count(), 5);
        }
    }

    #[test]
    fn timers_with_resampling() {
        let mc = MonteCarlo::new(
            options()
                .sampler(SometimesCollinear)
                .degenerate(DegeneratePolicy::Resample),
        );
        let comparison = mc.run().unwrap();
        let [petunin, min_rect] = [&mc.t_petunin, &mc.t_min_rect];
        // Collinear point sets fail in the Petunin step.
        assert_eq!(petunin.count(), 30 + comparison.resampled);
        assert_eq!(min_rect.count(), 30);
    }

    #[test]
    fn custom_hull_provider() {
        let counting = CountingHull::default();
        let mc = MonteCarlo::new(options().hull_provider(&counting));
        let comparison = mc.run().unwrap();
        assert_eq!(counting.calls.load(Ordering::Relaxed), 30);
        assert_eq!(mc.options().get_seed(), 0x1234_5678);

        let default = MonteCarlo::new(options()).run().unwrap();
        assert_eq!(comparison.avg_min_rect_area, default.avg_min_rect_area);
        assert_eq!(comparison.max_ratio, default.max_ratio);

        // Degenerate point sets fail before reaching the hull provider.
        let counting = CountingHull::default();
        let mc = MonteCarlo::new(options().sampler(Collinear).hull_provider(&counting));
        assert!(mc.run().is_err());
        assert_eq!(counting.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    #[should_panic]
    fn zero_trials() {
        ComparisonOptions::default().trials(0);
    }

    #[test]
    #[should_panic(expected = "number of trials must be positive")]
    fn run_zero_trials() {
        let _ = run(0, 20);
    }

    #[test]
    fn report() {
        let comparison = run(5, 20).unwrap();
        let report = comparison.to_string();
        assert!(report.starts_with("trials:"));
        assert!(report.contains("average Petunin area"));
        assert!(!report.contains("resampled"));
    }
}

//! Petunin rectangles and minimum-area enclosing rectangles.
//!
//! A *Petunin rectangle* is a cheap heuristic bounding rectangle of a point set: one pair of its
//! sides is perpendicular to the set's diameter and passes through the diameter's endpoints, the
//! other pair is parallel to the diameter and passes through the points furthest away from it on
//! either side. This crate builds those rectangles ([`petunin_rect`]), computes the true
//! minimum-area enclosing rectangle of a point set ([`min_rect`]), and compares both over many
//! random samples ([`monte_carlo`]).
//!
//! # Environment Variables
//!
//! The `petunin` binary is configured through environment variables:
//!
//! * `PETUNIN_MODE`: `compare` (the default) runs a Monte Carlo comparison and prints the average
//!   areas. `single` samples one point set from `[0, 10)²` and prints how its rectangles were
//!   constructed.
//! * `PETUNIN_TRIALS`: number of trials to run in `compare` mode (default 100).
//! * `PETUNIN_POINTS`: number of points per sample (default 200, or 100 in `single` mode).
//! * `PETUNIN_SEED`: seed for the random number generator. A random seed is used when unset.
//! * `PETUNIN_PARALLEL`: set to `1` or `true` to spread trials across all cores.
//! * `PETUNIN_SEARCH`: `calipers` (the default) or `edges`, see [`min_rect::Search`].
//! * `PETUNIN_MISSING_SIDE`: `error` (the default) or `zero`, see
//!   [`petunin_rect::MissingSidePolicy`].
//! * `PETUNIN_RESAMPLE`: set to `1` or `true` to resample degenerate point sets instead of
//!   failing, see [`monte_carlo::DegeneratePolicy`].
//!
//! Log output is controlled by `RUST_LOG` as usual.

use log::LevelFilter;

pub use petunin_geom::{point, Error, Hull, Line, Point, Rect, Result, RotatedRect, Vector};

pub mod diameter;
pub mod min_rect;
pub mod monte_carlo;
pub mod petunin_rect;
pub mod rectangle;
pub mod sample;
pub mod side;
pub mod timer;


/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .filter(Some("petunin_geom"), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and this library will log at *debug* level, unless overridden by the
/// `RUST_LOG` environment variable.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}

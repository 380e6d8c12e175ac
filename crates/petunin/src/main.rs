use std::{
    env::{self, VarError},
    str::FromStr,
};

use anyhow::{bail, Context};
use itertools::Itertools;
use petunin::{
    min_rect::Search,
    monte_carlo::{ComparisonOptions, DegeneratePolicy, MonteCarlo, TrialOutcome},
    petunin_rect::MissingSidePolicy,
    sample::UniformSampler,
    Line, Point,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Compare,
    Single,
}

fn main() -> anyhow::Result<()> {
    petunin::init_logger!();

    let mode = match var("PETUNIN_MODE")?.as_deref() {
        None | Some("compare") => Mode::Compare,
        Some("single") => Mode::Single,
        Some(invalid) => bail!("invalid value set for `PETUNIN_MODE` variable: '{invalid}'"),
    };
    let search = match var("PETUNIN_SEARCH")?.as_deref() {
        None | Some("calipers") => Search::RotatingCalipers,
        Some("edges") => Search::EdgeScan,
        Some(invalid) => bail!("invalid value set for `PETUNIN_SEARCH` variable: '{invalid}'"),
    };
    let missing_side = match var("PETUNIN_MISSING_SIDE")?.as_deref() {
        None | Some("error") => MissingSidePolicy::Error,
        Some("zero") => MissingSidePolicy::ZeroWidth,
        Some(invalid) => {
            bail!("invalid value set for `PETUNIN_MISSING_SIDE` variable: '{invalid}'")
        }
    };
    let degenerate = if flag("PETUNIN_RESAMPLE")? {
        DegeneratePolicy::Resample
    } else {
        DegeneratePolicy::Fail
    };

    let trials = parse("PETUNIN_TRIALS")?.unwrap_or(100);
    if trials == 0 {
        bail!("`PETUNIN_TRIALS` must be at least 1");
    }
    let points = parse("PETUNIN_POINTS")?.unwrap_or(match mode {
        Mode::Compare => 200,
        Mode::Single => 100,
    });
    let seed = match parse("PETUNIN_SEED")? {
        Some(seed) => seed,
        None => fastrand::u64(..),
    };

    let options = ComparisonOptions::default()
        .trials(trials)
        .points_per_trial(points)
        .seed(seed)
        .search(search)
        .missing_side(missing_side)
        .degenerate(degenerate)
        .parallel(flag("PETUNIN_PARALLEL")?);
    log::debug!("{:?}", options);

    match mode {
        Mode::Compare => compare(options),
        Mode::Single => single(options.sampler(UniformSampler::square(10.0))),
    }
}

fn compare(options: ComparisonOptions) -> anyhow::Result<()> {
    let mc = MonteCarlo::new(options);
    let comparison = mc.run()?;
    log::debug!("{}", mc.timers().into_iter().join(", "));

    println!("seed:                       {:#x}", mc.options().get_seed());
    println!("{comparison}");
    Ok(())
}

fn single(options: ComparisonOptions) -> anyhow::Result<()> {
    let mc = MonteCarlo::new(options);
    let outcome = mc.run_trial(0)?;
    log::debug!("{}", mc.timers().into_iter().join(", "));

    println!("seed: {:#x}", mc.options().get_seed());
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &TrialOutcome) {
    let petunin = &outcome.petunin;
    let diameter = petunin.diameter();
    let (left, right) = petunin.side_points();
    let (par_left, par_right) = petunin.parallel_lines();
    let (perp_a, perp_b) = petunin.perpendicular_lines();

    println!("points: {}", outcome.points.len());
    if outcome.resampled > 0 {
        println!("resampled point sets: {}", outcome.resampled);
    }
    println!();
    println!("Petunin rectangle");
    println!("  diameter:            {}", fmt_line(&diameter));
    println!("  diameter length:     {:.6}", petunin.length());
    println!("  furthest (left):     {}", fmt_point(left));
    println!("  furthest (right):    {}", fmt_point(right));
    println!("  parallel lines:      {}", fmt_line(&par_left));
    println!("                       {}", fmt_line(&par_right));
    println!("  perpendicular lines: {}", fmt_line(&perp_a));
    println!("                       {}", fmt_line(&perp_b));
    println!("  corners:             {}", fmt_corners(petunin.corners()));
    println!("  width:               {:.6}", petunin.width());
    println!("  area:                {:.6}", petunin.area());
    println!();

    let min_rect = &outcome.min_rect;
    println!("minimum-area rectangle");
    println!("  hull vertices:       {}", outcome.hull.len());
    println!("  rotation:            {:.3}°", min_rect.rotation_degrees());
    println!("  corners:             {}", fmt_corners(min_rect.corners()));
    println!(
        "  size:                {:.6} x {:.6}",
        min_rect.width(),
        min_rect.height()
    );
    println!("  area:                {:.6}", min_rect.area());
    println!();
    println!("area ratio: {:.4}", outcome.ratio());
}

fn fmt_point(p: Point) -> String {
    format!("({:.4}, {:.4})", p.x, p.y)
}

fn fmt_line(line: &Line) -> String {
    format!("{} -> {}", fmt_point(line.a()), fmt_point(line.b()))
}

fn fmt_corners(corners: [Point; 4]) -> String {
    corners.into_iter().map(fmt_point).join(" ")
}

/// Reads an environment variable, treating an unset variable as [`None`].
fn var(name: &str) -> anyhow::Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(s)) => bail!(
            "invalid value set for `{name}` variable: {}",
            s.to_string_lossy()
        ),
    }
}

fn parse<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(name)?
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("invalid value set for `{name}` variable: '{value}'"))
        })
        .transpose()
}

fn flag(name: &str) -> anyhow::Result<bool> {
    match var(name)?.as_deref() {
        None | Some("0" | "false" | "off") => Ok(false),
        Some("1" | "true" | "on") => Ok(true),
        Some(invalid) => bail!("invalid value set for `{name}` variable: '{invalid}'"),
    }
}

//! Density-sweep exploration: find a density that gives a randomly chosen rule
//! a long-lived, visually rich trajectory.

use crate::config::SweepConfig;
use crate::render::FrameSink;
use crate::runner::{RunReport, Runner};
use fractide_data::{ColorScheme, Rule};
use rand::Rng;

/// Sweeps the density upward multiplicatively, re-running the same rule until
/// a run is kept or the ceiling is exceeded.
///
/// Frames of rejected attempts are discarded through the sink so repeated
/// exploration does not accumulate storage. Returns the first kept report, or
/// the last (un-kept) one once the ceiling is passed.
pub fn sweep(
    runner: &Runner,
    config: &SweepConfig,
    start_density: f64,
    rule: &Rule,
    scheme: &ColorScheme,
    rng: &mut impl Rng,
    sink: &mut dyn FrameSink,
) -> anyhow::Result<RunReport> {
    let mut k = start_density;
    loop {
        let report = runner.run(rule, scheme, k, rng, sink)?;
        if report.kept {
            return Ok(report);
        }
        sink.discard(report.id)?;

        let next = k * config.factor;
        // A zero start can never climb; bail out instead of spinning.
        if next <= k || next > config.ceiling {
            tracing::info!(
                ceiling = config.ceiling,
                last_density = k,
                "Sweep exhausted without a kept run"
            );
            return Ok(report);
        }
        tracing::info!(from = k, to = next, "Sweep step");
        k = next;
    }
}

//! Randomized rule and colorscheme generation for exploration.

use anyhow::Result;
use fractide_data::{ColorScheme, Rgb, Rule};
use rand::Rng;
use std::collections::BTreeSet;

/// Per-source inclusion probabilities and the accepted-set density used when
/// randomizing rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleProbabilities {
    pub p_local: f64,
    pub p_parents: f64,
    pub p_children: f64,
    /// Probability each count in `[0, max_neighbors)` joins the accepted set.
    pub density: f64,
}

/// Draws a random rule.
///
/// Each source flag is independently true with its probability; if all three
/// come out false, `sum_local` is forced true. Each integer in
/// `[0, max_neighbors)` joins the accepted set with probability `density`. An
/// empty draw falls back to sampling `max_neighbors` values uniformly from
/// `[0, max_neighbors]` with replacement and keeping the distinct ones, which
/// is never empty.
pub fn randomize_rule(probs: &RuleProbabilities, rng: &mut impl Rng) -> Result<Rule> {
    let mut sum_local = rng.gen::<f64>() < probs.p_local;
    let sum_parents = rng.gen::<f64>() < probs.p_parents;
    let sum_children = rng.gen::<f64>() < probs.p_children;
    if !(sum_local || sum_parents || sum_children) {
        sum_local = true;
    }

    let max = Rule::max_neighbors_for(sum_local, sum_parents, sum_children);
    let mut accepts: BTreeSet<u8> = (0..max)
        .filter(|_| rng.gen::<f64>() < probs.density)
        .collect();
    if accepts.is_empty() {
        accepts = (0..max).map(|_| rng.gen_range(0..=max)).collect();
    }

    Rule::new(sum_local, sum_parents, sum_children, accepts)
}

/// Draws a random 2-color scheme, choosing uniformly among complement,
/// grayscale and fully random colors.
pub fn randomize_colorscheme(rng: &mut impl Rng) -> ColorScheme {
    match rng.gen_range(0..3u8) {
        0 => {
            let alive = random_color(rng);
            ColorScheme::new(alive.complement(), alive)
        }
        1 => ColorScheme::new(Rgb::gray(rng.gen()), Rgb::gray(rng.gen())),
        _ => ColorScheme::new(random_color(rng), random_color(rng)),
    }
}

fn random_color(rng: &mut impl Rng) -> Rgb {
    Rgb([rng.gen(), rng.gen(), rng.gen()])
}

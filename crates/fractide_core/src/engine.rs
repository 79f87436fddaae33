//! Hierarchy initialization and the generation update cycle.

use crate::neighbors::aggregate_level;
use fractide_data::{GridLevel, Hierarchy, Rule};
use rand::Rng;

/// Samples a fresh hierarchy: for each level `d` in `[0, depth)`, a
/// `2^d x 2^d` binary matrix where each cell is alive with probability `k`.
///
/// `k` outside `[0, 1]` degenerates to all-dead/all-alive rather than
/// erroring; the configuration layer rejects such values before they reach
/// setup.
#[must_use]
pub fn random_hierarchy(depth: usize, k: f64, rng: &mut impl Rng) -> Hierarchy {
    let levels = (0..depth)
        .map(|d| {
            let side = 1usize << d;
            let mut level = GridLevel::dead(side);
            for cell in level.cells_mut() {
                *cell = u8::from(rng.gen::<f64>() < k);
            }
            level
        })
        .collect();
    Hierarchy::from_levels(levels)
}

/// One full update cycle: a pure function from the previous generation's
/// hierarchy to the next.
///
/// Level 0 carries over unchanged. Every level `d` in `[1, depth)` is set
/// cell-wise to alive iff its aggregated neighbor count is a member of the
/// rule's accepted set. All aggregation reads the input hierarchy, so there is
/// no intra-step read-after-write hazard regardless of level order.
#[must_use]
pub fn step(current: &Hierarchy, rule: &Rule) -> Hierarchy {
    let mut next = current.clone();
    for d in 1..current.depth() {
        let counts = aggregate_level(current, rule, d);
        let level = next.level_mut(d);
        for (cell, count) in level.cells_mut().iter_mut().zip(counts) {
            *cell = u8::from(rule.admits(count));
        }
    }
    next
}

/// The evolving automaton: the current hierarchy, its fixed rule and the
/// generation counter.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub hierarchy: Hierarchy,
    pub rule: Rule,
    generation: u64,
}

impl Automaton {
    #[must_use]
    pub fn new(hierarchy: Hierarchy, rule: Rule) -> Self {
        Self {
            hierarchy,
            rule,
            generation: 0,
        }
    }

    /// Commits one generation: computes the next hierarchy and replaces the
    /// current one atomically.
    pub fn advance(&mut self) {
        self.hierarchy = step(&self.hierarchy, &self.rule);
        self.generation += 1;
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rule(counts: &[u8]) -> Rule {
        Rule::new(true, false, false, counts.iter().copied().collect()).unwrap()
    }

    #[test]
    fn test_random_hierarchy_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let h = random_hierarchy(6, 0.3, &mut rng);
        assert_eq!(h.depth(), 6);
        for (d, level) in h.levels().iter().enumerate() {
            assert_eq!(level.side(), 1 << d);
        }
    }

    #[test]
    fn test_density_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let dead = random_hierarchy(5, 0.0, &mut rng);
        assert!(dead.levels().iter().all(GridLevel::is_all_dead));
        let alive = random_hierarchy(5, 1.0, &mut rng);
        assert!(alive.levels().iter().all(GridLevel::is_all_alive));
    }

    #[test]
    fn test_level_zero_never_mutated() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let h = random_hierarchy(4, 0.5, &mut rng);
        let before = h.level(0).clone();
        let next = step(&h, &rule(&[3, 5]));
        assert_eq!(next.level(0), &before);
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let h = random_hierarchy(5, 0.4, &mut rng);
        let r = rule(&[2, 3, 7]);
        assert_eq!(step(&h, &r), step(&h, &r));
    }

    #[test]
    fn test_all_alive_local_eight_is_fixed_point() {
        // Every finest-level cell sees exactly 8 wrapped neighbors, so a rule
        // accepting {8} keeps the whole hierarchy alive forever.
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let h = random_hierarchy(4, 1.0, &mut rng);
        let next = step(&h, &rule(&[8]));
        assert_eq!(next, h);
    }

    #[test]
    fn test_dead_hierarchy_stays_dead_without_zero() {
        let h = Hierarchy::dead(3);
        let next = step(&h, &rule(&[3]));
        assert!(next.levels().iter().all(GridLevel::is_all_dead));
    }

    #[test]
    fn test_dead_hierarchy_ignites_with_zero() {
        let h = Hierarchy::dead(3);
        let next = step(&h, &rule(&[0]));
        assert!(next.level(0).is_all_dead());
        assert!(next.level(1).is_all_alive());
        assert!(next.level(2).is_all_alive());
    }

    #[test]
    fn test_automaton_generation_counter() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut automaton = Automaton::new(random_hierarchy(4, 0.5, &mut rng), rule(&[3]));
        assert_eq!(automaton.generation(), 0);
        automaton.advance();
        automaton.advance();
        assert_eq!(automaton.generation(), 2);
    }
}

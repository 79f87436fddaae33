//! Cross-scale neighbor aggregation.
//!
//! For every level `d >= 1` the aggregated count field is the sum of up to
//! three contributions, each toggled by the rule's source flags:
//!
//! - **local**: the 8 toroidally wrapped Moore neighbors at the same level
//! - **parents**: a 2x2 window of the half-resolution level `d - 1`, anchored
//!   at the parent cell and extended per the child's quadrant
//! - **children**: the exact 2x2 block of the double-resolution level `d + 1`
//!   the cell subdivides into
//!
//! All contributions read the previous generation's values only; level 0 has
//! no parent and is never aggregated.

use fractide_data::{GridLevel, Hierarchy, Rule};

/// Sum of the 8 Moore neighbors at the cell's own level, periodic boundary in
/// both dimensions.
#[must_use]
pub fn local_counts(level: &GridLevel) -> Vec<u8> {
    let side = level.side();
    let mut counts = vec![0u8; side * side];
    for row in 0..side {
        for col in 0..side {
            let mut sum = 0u8;
            for dr in [side - 1, 0, 1] {
                for dc in [side - 1, 0, 1] {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    sum += level.get((row + dr) % side, (col + dc) % side);
                }
            }
            counts[row * side + col] = sum;
        }
    }
    counts
}

/// Parent contribution for a level of side `side` over its half-resolution
/// parent.
///
/// Cell `(row, col)` maps to parent `(row / 2, col / 2)`; the summed window is
/// that cell plus one step per dimension in the direction selected by the
/// child's quadrant (offset 0 reaches the previous row/column, offset 1 the
/// next), wrapped toroidally at the parent's resolution. Each of a parent's 4
/// children therefore sees a different 2x2 sub-window, all containing the
/// parent cell itself.
#[must_use]
pub fn parent_counts(parent: &GridLevel, side: usize) -> Vec<u8> {
    let p_side = parent.side();
    let mut counts = vec![0u8; side * side];
    for row in 0..side {
        for col in 0..side {
            let p_row = row / 2;
            let p_col = col / 2;
            let other_row = if row % 2 == 0 {
                (p_row + p_side - 1) % p_side
            } else {
                (p_row + 1) % p_side
            };
            let other_col = if col % 2 == 0 {
                (p_col + p_side - 1) % p_side
            } else {
                (p_col + 1) % p_side
            };
            let sum = parent.get(p_row, p_col)
                + parent.get(p_row, other_col)
                + parent.get(other_row, p_col)
                + parent.get(other_row, other_col);
            counts[row * side + col] = sum;
        }
    }
    counts
}

/// Child contribution for a level of side `side` over its double-resolution
/// child level: the exact non-overlapping 2x2 block sum. An exact partition,
/// so no wrapping is involved.
#[must_use]
pub fn child_counts(child: &GridLevel, side: usize) -> Vec<u8> {
    let mut counts = vec![0u8; side * side];
    for row in 0..side {
        for col in 0..side {
            counts[row * side + col] = child.get(2 * row, 2 * col)
                + child.get(2 * row, 2 * col + 1)
                + child.get(2 * row + 1, 2 * col)
                + child.get(2 * row + 1, 2 * col + 1);
        }
    }
    counts
}

/// Aggregated neighbor-count field for level `d` of the hierarchy under the
/// rule's source flags. Panics if `d == 0`; level 0 is never updated.
#[must_use]
pub fn aggregate_level(hierarchy: &Hierarchy, rule: &Rule, d: usize) -> Vec<u8> {
    assert!(d >= 1, "level 0 is never aggregated");
    let level = hierarchy.level(d);
    let side = level.side();
    let mut counts = vec![0u8; side * side];

    if rule.sum_local {
        for (total, c) in counts.iter_mut().zip(local_counts(level)) {
            *total += c;
        }
    }
    if rule.sum_parents {
        for (total, c) in counts.iter_mut().zip(parent_counts(hierarchy.level(d - 1), side)) {
            *total += c;
        }
    }
    if rule.sum_children && d + 1 < hierarchy.depth() {
        for (total, c) in counts.iter_mut().zip(child_counts(hierarchy.level(d + 1), side)) {
            *total += c;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(side: usize) -> GridLevel {
        let mut level = GridLevel::dead(side);
        for row in 0..side {
            for col in 0..side {
                level.set(row, col, 1);
            }
        }
        level
    }

    fn checkerboard(side: usize) -> GridLevel {
        let mut level = GridLevel::dead(side);
        for row in 0..side {
            for col in 0..side {
                level.set(row, col, ((row + col) % 2) as u8);
            }
        }
        level
    }

    #[test]
    fn test_local_all_alive_wraps_to_eight_everywhere() {
        // Edges and corners must see the full Moore neighborhood via wrap.
        for side in [2, 4, 8] {
            let counts = local_counts(&full(side));
            assert!(
                counts.iter().all(|&c| c == 8),
                "side {side}: expected 8 at every cell, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_local_single_cell_neighborhood() {
        let mut level = GridLevel::dead(4);
        level.set(1, 1, 1);
        let counts = local_counts(&level);
        // The 8 cells around (1,1) each count it once; (1,1) itself does not.
        assert_eq!(counts[1 * 4 + 1], 0);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[2 * 4 + 2], 1);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 8);
    }

    #[test]
    fn test_parent_window_includes_parent_cell() {
        let mut parent = GridLevel::dead(4);
        parent.set(1, 1, 1);
        let counts = parent_counts(&parent, 8);
        // All four children of parent (1,1) see their own parent cell.
        for (row, col) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            assert!(counts[row * 8 + col] >= 1, "child ({row},{col}) missed its parent");
        }
    }

    #[test]
    fn test_parent_window_quadrants_differ() {
        // Mark the cell right of the parent; only children in the right-hand
        // quadrant (odd column) extend their window toward it.
        let mut parent = GridLevel::dead(4);
        parent.set(1, 2, 1);
        let counts = parent_counts(&parent, 8);
        assert_eq!(counts[2 * 8 + 3], 1);
        assert_eq!(counts[3 * 8 + 3], 1);
        assert_eq!(counts[2 * 8 + 2], 0);
        assert_eq!(counts[3 * 8 + 2], 0);
    }

    #[test]
    fn test_parent_all_alive_counts_four() {
        let counts = parent_counts(&full(2), 4);
        assert!(counts.iter().all(|&c| c == 4));
    }

    #[test]
    fn test_parent_of_single_cell_level() {
        // Level 1's parent is the single level-0 cell; the wrapped 2x2 window
        // lands on that one cell four times.
        let counts = parent_counts(&full(1), 2);
        assert!(counts.iter().all(|&c| c == 4));
    }

    #[test]
    fn test_child_block_sum_checkerboard() {
        // Every non-overlapping 2x2 block of a checkerboard holds exactly two
        // alive cells; the block sum must be exact, not an approximation.
        let counts = child_counts(&checkerboard(8), 4);
        assert!(counts.iter().all(|&c| c == 2), "got {counts:?}");
    }

    #[test]
    fn test_child_block_sum_exact_partition() {
        let mut child = GridLevel::dead(4);
        child.set(0, 0, 1);
        child.set(0, 1, 1);
        child.set(1, 0, 1);
        child.set(1, 1, 1);
        let counts = child_counts(&child, 2);
        assert_eq!(counts, vec![4, 0, 0, 0]);
    }

    #[test]
    fn test_aggregate_respects_flags() {
        use fractide_data::Hierarchy;
        let levels = vec![full(1), full(2), full(4)];
        let h = Hierarchy::from_levels(levels);

        let local_only = Rule::new(true, false, false, [8].into_iter().collect()).unwrap();
        assert!(aggregate_level(&h, &local_only, 2).iter().all(|&c| c == 8));

        let all = Rule::new(true, true, true, [16].into_iter().collect()).unwrap();
        // Finest level has no children: 8 local + 4 parent.
        assert!(aggregate_level(&h, &all, 2).iter().all(|&c| c == 12));
        // Middle level gets all three: 8 + 4 + 4.
        assert!(aggregate_level(&h, &all, 1).iter().all(|&c| c == 16));
    }
}

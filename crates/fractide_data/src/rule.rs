use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The update rule: which neighbor sources contribute, and which combined
/// counts flip a cell alive.
///
/// `accepts` is an exact membership set, not a threshold: a cell becomes alive
/// next generation iff its aggregated neighbor count is in the set. Invariants
/// (at least one source flag, counts within `[0, max_neighbors]`, non-empty
/// set) are validated at construction; a rule is immutable once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub sum_local: bool,
    pub sum_parents: bool,
    pub sum_children: bool,
    accepts: BTreeSet<u8>,
}

impl Rule {
    pub fn new(
        sum_local: bool,
        sum_parents: bool,
        sum_children: bool,
        accepts: BTreeSet<u8>,
    ) -> Result<Self> {
        anyhow::ensure!(
            sum_local || sum_parents || sum_children,
            "Rule must enable at least one neighbor source"
        );
        anyhow::ensure!(!accepts.is_empty(), "Accepted-count set must be non-empty");
        let max = Self::max_neighbors_for(sum_local, sum_parents, sum_children);
        if let Some(&worst) = accepts.iter().next_back() {
            anyhow::ensure!(
                worst <= max,
                "Accepted count {worst} exceeds max neighbors {max}"
            );
        }
        Ok(Self {
            sum_local,
            sum_parents,
            sum_children,
            accepts,
        })
    }

    /// Largest combined neighbor count the enabled sources can produce:
    /// 8 from the Moore neighborhood, 4 from the parent window, 4 from the
    /// child block.
    #[must_use]
    pub fn max_neighbors(&self) -> u8 {
        Self::max_neighbors_for(self.sum_local, self.sum_parents, self.sum_children)
    }

    #[must_use]
    pub fn max_neighbors_for(sum_local: bool, sum_parents: bool, sum_children: bool) -> u8 {
        8 * u8::from(sum_local) + 4 * u8::from(sum_parents) + 4 * u8::from(sum_children)
    }

    /// Exact set-membership test on the aggregated count.
    #[inline]
    #[must_use]
    pub fn admits(&self, count: u8) -> bool {
        self.accepts.contains(&count)
    }

    #[must_use]
    pub fn accepted_counts(&self) -> &BTreeSet<u8> {
        &self.accepts
    }
}

/// Printable form used for captions: enabled sources joined with `+`, then the
/// sorted accepted counts.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sources = Vec::new();
        if self.sum_local {
            sources.push("local");
        }
        if self.sum_parents {
            sources.push("parents");
        }
        if self.sum_children {
            sources.push("children");
        }
        write!(f, "{} {{", sources.join("+"))?;
        for (i, count) in self.accepts.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, "}}")
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Random per-run identity scoping all artifacts (frames, animation, run log)
/// produced by one simulated trajectory.
///
/// Built from 128 bits drawn from the caller's RNG, so a seeded run produces a
/// reproducible id. Formats as the 32-char lowercase hex form used in file
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    #[must_use]
    pub fn from_bits(bits: u128) -> Self {
        Self(Uuid::from_u128(bits))
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

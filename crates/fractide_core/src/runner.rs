//! Run controller: drives repeated update cycles, renders each generation and
//! evaluates termination.

use crate::config::{EngineConfig, RenderConfig};
use crate::engine::{random_hierarchy, Automaton};
use crate::render::{render, FrameSink};
use fractide_data::{ColorScheme, GridLevel, Rule, RunId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Finest level went entirely dead.
    Converged,
    /// Frame cap reached.
    MaxFrames,
    /// Finest level saturated (entirely alive, or above the configured alive
    /// fraction after warm-up).
    BlownUp,
}

/// Everything the caller needs to know about a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: RunId,
    pub outcome: RunOutcome,
    pub frames: u32,
    pub generations: u64,
    pub density: f64,
    pub rule: Rule,
    /// True iff the run produced frames, at least the configured minimum,
    /// and is therefore worth assembling into an animation.
    pub kept: bool,
    /// Deterministic caption derived from the rule's printable form and the
    /// density, used verbatim when posting.
    pub caption: String,
}

/// Drives one trajectory: `SETUP -> RUNNING -> {CONVERGED, MAX_FRAMES,
/// BLOWN_UP}`.
#[derive(Debug, Clone)]
pub struct Runner {
    engine: EngineConfig,
    render: RenderConfig,
}

impl Runner {
    #[must_use]
    pub fn new(engine: EngineConfig, render: RenderConfig) -> Self {
        Self { engine, render }
    }

    /// Termination conditions in priority order: frame cap, convergence,
    /// saturation. Evaluated against the current state before each step, so an
    /// all-dead (or saturated) initial hierarchy terminates at generation 1
    /// with zero frames regardless of the rule.
    #[must_use]
    pub fn termination(&self, finest: &GridLevel, generation: u64, frames: u32) -> Option<RunOutcome> {
        if frames >= self.engine.max_frames {
            return Some(RunOutcome::MaxFrames);
        }
        if finest.is_all_dead() {
            return Some(RunOutcome::Converged);
        }
        let saturation = &self.engine.saturation;
        if saturation.enabled {
            if finest.is_all_alive() {
                return Some(RunOutcome::BlownUp);
            }
            if generation >= saturation.warmup && finest.alive_fraction() > saturation.threshold {
                return Some(RunOutcome::BlownUp);
            }
        }
        None
    }

    /// Runs one trajectory at density `k` under a fixed rule and color scheme.
    ///
    /// Sink failures surface as errors without touching the in-memory
    /// hierarchy.
    pub fn run(
        &self,
        rule: &Rule,
        scheme: &ColorScheme,
        k: f64,
        rng: &mut impl Rng,
        sink: &mut dyn FrameSink,
    ) -> anyhow::Result<RunReport> {
        let id = RunId::from_bits(rng.gen());
        let hierarchy = random_hierarchy(self.engine.depth, k, rng);
        let mut automaton = Automaton::new(hierarchy, rule.clone());
        let mut frames: u32 = 0;
        tracing::debug!(run = %id, density = k, rule = %rule, "Run setup");

        let outcome = loop {
            if let Some(outcome) =
                self.termination(automaton.hierarchy.finest(), automaton.generation(), frames)
            {
                break outcome;
            }

            automaton.advance();
            let frame = render(automaton.hierarchy.finest(), scheme, self.render.frame_size);
            sink.persist(id, frames, &frame)?;
            frames += 1;

            if frames % 50 == 0 {
                tracing::debug!(
                    run = %id,
                    frames = frames,
                    alive = automaton.hierarchy.finest().alive_count(),
                    "Run progress"
                );
            }
        };

        let kept = frames > 0 && frames >= self.engine.min_frames;
        let caption = caption(rule, k, frames);
        tracing::info!(
            run = %id,
            outcome = ?outcome,
            frames = frames,
            kept = kept,
            "Run finished"
        );
        Ok(RunReport {
            id,
            outcome,
            frames,
            generations: automaton.generation(),
            density: k,
            rule: rule.clone(),
            kept,
            caption,
        })
    }
}

/// The short descriptive caption posted with an animation.
#[must_use]
pub fn caption(rule: &Rule, density: f64, frames: u32) -> String {
    format!("{rule} | k = {density:.3} | {frames} frames")
}

//! # Fractide Core
//!
//! The hierarchical automaton engine for Fractide.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Grid-hierarchy initialization at a given density
//! - Cross-scale neighbor aggregation (local, parent, child contributions)
//! - The generation update cycle
//! - Randomized rule and colorscheme generation
//! - The run controller state machine and density-sweep exploration
//! - Configuration, metrics collection and structured logging
//!
//! ## Determinism
//!
//! Every randomized operation takes an explicit `&mut impl Rng`; seeding a
//! `ChaCha8Rng` reproduces a full run (hierarchy, rule, colors, run id and
//! frames) bit for bit.
//!
//! ## Example
//!
//! ```
//! use fractide_core::engine::{random_hierarchy, step};
//! use fractide_data::Rule;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let hierarchy = random_hierarchy(6, 0.2, &mut rng);
//! let rule = Rule::new(true, false, false, [2, 3].into_iter().collect()).unwrap();
//! let next = step(&hierarchy, &rule);
//! assert_eq!(next.depth(), 6);
//! ```

/// Configuration management for engine, render, output and posting parameters
pub mod config;
/// Hierarchy initialization and the generation update cycle
pub mod engine;
/// Density-sweep exploration over repeated runs
pub mod explore;
/// Metrics collection and logging
pub mod metrics;
/// Cross-scale neighbor aggregation
pub mod neighbors;
/// Randomized rule and colorscheme generation
pub mod randomize;
/// Finest-level grid to pixel-buffer rendering and the frame sink seam
pub mod render;
/// Run controller state machine
pub mod runner;

pub use config::AppConfig;
pub use engine::{random_hierarchy, step, Automaton};
pub use metrics::{init_logging, Metrics};
pub use render::{render, FrameSink};
pub use runner::{RunOutcome, RunReport, Runner};

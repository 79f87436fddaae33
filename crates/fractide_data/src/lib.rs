//! # Fractide Data
//!
//! Shared data types for the Fractide hierarchical automaton.
//!
//! This crate holds the plain state carried between the engine, the renderer
//! and the I/O layers:
//! - Grid hierarchy (per-level binary matrices)
//! - Update rules (source flags + accepted-neighbor-count set)
//! - Color schemes and pixel buffers
//! - Run identity
//!
//! Logic that consumes these types (aggregation, stepping, rendering) lives in
//! `fractide_core`.

/// Two-color schemes for rendering dead/alive cells
pub mod color;
/// RGB pixel buffers handed from the renderer to the encoder
pub mod frame;
/// Binary grid levels and the multi-resolution hierarchy
pub mod grid;
/// Update rule: source flags plus the accepted-neighbor-count set
pub mod rule;
/// Per-run identity used to namespace generated artifacts
pub mod run;

pub use color::{ColorScheme, Rgb};
pub use frame::FrameBuffer;
pub use grid::{GridLevel, Hierarchy};
pub use rule::Rule;
pub use run::RunId;

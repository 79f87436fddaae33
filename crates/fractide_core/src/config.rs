//! Configuration management for run parameters.
//!
//! Strongly-typed structures mapping to `config.toml`. Defaults are hardcoded
//! in the `Default` impls and overridden by the file; malformed values fail
//! fast in [`AppConfig::validate`] rather than producing degenerate grids.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! seed = 42
//!
//! [engine]
//! depth = 9
//! density = 0.05
//! max_frames = 200
//!
//! [engine.saturation]
//! enabled = true
//! threshold = 0.9
//!
//! [render]
//! frame_size = 512
//! ```

use serde::{Deserialize, Serialize};

/// Early-termination policy for saturated, visually static patterns.
///
/// When enabled, a run blows up as soon as the finest level is entirely alive,
/// or once its alive fraction exceeds `threshold` after `warmup` generations.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct SaturationConfig {
    pub enabled: bool,
    pub warmup: u64,
    pub threshold: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            warmup: 5,
            threshold: 0.95,
        }
    }
}

/// Core automaton parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid-hierarchy level count; the rendered level has side `2^(depth-1)`.
    pub depth: usize,
    /// Probability a cell starts alive.
    pub density: f64,
    /// Hard cap on frames per run.
    pub max_frames: u32,
    /// Runs shorter than this are considered uninteresting and not assembled.
    pub min_frames: u32,
    pub saturation: SaturationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 9,
            density: 0.05,
            max_frames: 200,
            min_frames: 20,
            saturation: SaturationConfig::default(),
        }
    }
}

/// Probabilities used when randomizing rules.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RuleConfig {
    pub p_local: f64,
    pub p_parents: f64,
    pub p_children: f64,
    /// Probability each candidate count joins the accepted set.
    pub density: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            p_local: 0.8,
            p_parents: 0.5,
            p_children: 0.5,
            density: 0.3,
        }
    }
}

/// Density-sweep exploration parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SweepConfig {
    /// Multiplicative step applied to the density between attempts.
    pub factor: f64,
    /// Sweep stops once the density exceeds this ceiling.
    pub ceiling: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            factor: 1.5,
            ceiling: 0.5,
        }
    }
}

/// Frame and animation rendering parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// Square frame edge in pixels.
    pub frame_size: u32,
    /// Per-frame delay in the assembled GIF, in milliseconds.
    pub frame_delay_ms: u32,
    /// When false, the run uses the plain black-on-white scheme instead of a
    /// randomized one.
    pub randomize_colors: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_size: 512,
            frame_delay_ms: 60,
            randomize_colors: true,
        }
    }
}

/// Artifact directory roots and cleanup policy.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub frames_dir: String,
    pub gifs_dir: String,
    /// Keep per-frame PNGs after assembly instead of removing them.
    pub keep_frames: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames_dir: "frames".to_string(),
            gifs_dir: "gifs".to_string(),
            keep_frames: false,
        }
    }
}

/// Posting collaborator settings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PostConfig {
    pub enabled: bool,
    /// Instance base URL, e.g. `https://botsin.space`.
    pub base_url: String,
    /// Bearer token; the `FRACTIDE_TOKEN` environment variable overrides it.
    pub token: Option<String>,
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub rule: RuleConfig,
    pub sweep: SweepConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
    pub post: PostConfig,
    /// RNG seed; omit for a fresh entropy-seeded run.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Validates all invariants, failing fast on malformed configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.engine.depth >= 1, "Depth must be at least 1");
        anyhow::ensure!(self.engine.depth <= 14, "Depth too large (max 14)");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.engine.density),
            "Density must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.engine.max_frames > 0, "Max frames must be positive");
        anyhow::ensure!(
            self.engine.min_frames <= self.engine.max_frames,
            "Min frames must not exceed max frames"
        );
        anyhow::ensure!(
            self.engine.saturation.threshold > 0.0 && self.engine.saturation.threshold <= 1.0,
            "Saturation threshold must be in (0.0, 1.0]"
        );
        for (name, p) in [
            ("p_local", self.rule.p_local),
            ("p_parents", self.rule.p_parents),
            ("p_children", self.rule.p_children),
            ("rule density", self.rule.density),
        ] {
            anyhow::ensure!((0.0..=1.0).contains(&p), "{name} must be in [0.0, 1.0]");
        }
        anyhow::ensure!(self.sweep.factor > 1.0, "Sweep factor must exceed 1.0");
        anyhow::ensure!(
            self.sweep.ceiling > 0.0 && self.sweep.ceiling <= 1.0,
            "Sweep ceiling must be in (0.0, 1.0]"
        );
        anyhow::ensure!(self.render.frame_size > 0, "Frame size must be positive");
        anyhow::ensure!(
            self.render.frame_size <= 4096,
            "Frame size too large (max 4096)"
        );
        anyhow::ensure!(
            self.render.frame_delay_ms > 0,
            "Frame delay must be positive"
        );
        if self.post.enabled {
            anyhow::ensure!(
                !self.post.base_url.is_empty(),
                "Posting enabled but no base URL configured"
            );
        }
        Ok(())
    }

    /// Parses and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = path, "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stable digest of the simulation-relevant sections, logged with each run
    /// for provenance.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.engine).as_bytes());
        hasher.update(format!("{:?}", self.rule).as_bytes());
        hasher.update(format!("{:?}", self.sweep).as_bytes());
        hasher.update(format!("{:?}", self.render).as_bytes());
        hex::encode(hasher.finalize())
    }
}

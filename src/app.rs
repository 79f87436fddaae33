//! Application driver: wires the engine, frame store, GIF assembly and the
//! posting client into one exploratory pipeline.

use anyhow::{Context, Result};
use chrono::Utc;
use fractide_core::explore;
use fractide_core::randomize::{randomize_colorscheme, randomize_rule, RuleProbabilities};
use fractide_core::runner::{RunReport, Runner};
use fractide_core::{AppConfig, Metrics};
use fractide_data::ColorScheme;
use fractide_io::{assemble_gif, FrameStore};
use fractide_net::{Credentials, StatusClient};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What one process execution wrote next to each kept animation.
#[derive(Serialize)]
struct RunLog<'a> {
    timestamp: String,
    config_fingerprint: String,
    report: &'a RunReport,
    animation: &'a Path,
}

pub struct App {
    pub config: AppConfig,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed = seed, fingerprint = config.fingerprint(), "App setup");
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            metrics: Metrics::new(),
        })
    }

    /// One run at the configured density.
    pub async fn run_once(&mut self) -> Result<RunReport> {
        let (rule, scheme) = self.draw_rule_and_scheme()?;
        let runner = self.runner();
        let mut store = FrameStore::new(&self.config.output.frames_dir);
        let started = Instant::now();
        let report = runner.run(
            &rule,
            &scheme,
            self.config.engine.density,
            &mut self.rng,
            &mut store,
        )?;
        self.metrics.record_run(&report, started.elapsed());
        self.finish(&store, report).await
    }

    /// Sweeps the density upward with one randomized rule until a run is kept
    /// or the ceiling is exceeded.
    pub async fn run_sweep(&mut self) -> Result<RunReport> {
        let (rule, scheme) = self.draw_rule_and_scheme()?;
        let runner = self.runner();
        let mut store = FrameStore::new(&self.config.output.frames_dir);
        let started = Instant::now();
        let report = explore::sweep(
            &runner,
            &self.config.sweep,
            self.config.engine.density,
            &rule,
            &scheme,
            &mut self.rng,
            &mut store,
        )?;
        self.metrics.record_run(&report, started.elapsed());
        self.finish(&store, report).await
    }

    fn runner(&self) -> Runner {
        Runner::new(self.config.engine.clone(), self.config.render.clone())
    }

    fn draw_rule_and_scheme(&mut self) -> Result<(fractide_data::Rule, ColorScheme)> {
        let probs = RuleProbabilities {
            p_local: self.config.rule.p_local,
            p_parents: self.config.rule.p_parents,
            p_children: self.config.rule.p_children,
            density: self.config.rule.density,
        };
        let rule = randomize_rule(&probs, &mut self.rng)?;
        let scheme = if self.config.render.randomize_colors {
            randomize_colorscheme(&mut self.rng)
        } else {
            ColorScheme::default()
        };
        tracing::info!(rule = %rule, "Drew rule");
        Ok((rule, scheme))
    }

    /// Assembly, run log, posting and cleanup for a finished run.
    async fn finish(&mut self, store: &FrameStore, report: RunReport) -> Result<RunReport> {
        if report.kept {
            let gifs_dir = PathBuf::from(&self.config.output.gifs_dir);
            let animation = assemble_gif(
                store,
                report.id,
                &gifs_dir,
                self.config.render.frame_delay_ms,
            )
            .context("assembling animation")?;
            self.metrics.increment_counter("animations");
            self.write_run_log(&report, &animation)?;

            if self.config.post.enabled {
                let credentials = Credentials::resolve(
                    &self.config.post.base_url,
                    self.config.post.token.as_deref(),
                )?;
                StatusClient::new(credentials)
                    .publish(&animation, &report.caption)
                    .await
                    .context("publishing animation")?;
                self.metrics.increment_counter("posts");
            }
        }

        if !self.config.output.keep_frames {
            store.remove_run(report.id)?;
        }
        Ok(report)
    }

    fn write_run_log(&self, report: &RunReport, animation: &Path) -> Result<()> {
        let log = RunLog {
            timestamp: Utc::now().to_rfc3339(),
            config_fingerprint: self.config.fingerprint(),
            report,
            animation,
        };
        let path = PathBuf::from(&self.config.output.gifs_dir).join(format!("{}.json", report.id));
        std::fs::write(&path, serde_json::to_string_pretty(&log)?)?;
        Ok(())
    }
}

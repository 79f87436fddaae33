//! Per-run frame storage.
//!
//! Frames live under `<root>/<run_id>/frame_<index>.png` with zero-padded
//! indices so lexical order equals frame order for external tooling.

use crate::error::{OutputError, Result};
use fractide_core::render::FrameSink;
use fractide_data::{FrameBuffer, RunId};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the frames root directory and the per-run layout beneath it.
#[derive(Debug, Clone)]
pub struct FrameStore {
    root: PathBuf,
}

impl FrameStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn run_dir(&self, run: RunId) -> PathBuf {
        self.root.join(run.to_string())
    }

    /// Zero-padded frame filename, 5 digits.
    #[must_use]
    pub fn frame_path(&self, run: RunId, index: u32) -> PathBuf {
        self.run_dir(run).join(format!("frame_{index:05}.png"))
    }

    /// Encodes one frame as PNG under the run's directory.
    pub fn write_frame(&self, run: RunId, index: u32, frame: &FrameBuffer) -> Result<PathBuf> {
        let dir = self.run_dir(run);
        fs::create_dir_all(&dir)?;
        let path = self.frame_path(run, index);
        let img = RgbImage::from_raw(frame.width(), frame.height(), frame.pixels().to_vec())
            .ok_or_else(|| OutputError::encode("pixel buffer does not match frame dimensions"))?;
        img.save(&path)
            .map_err(|e| OutputError::encode(e.to_string()))?;
        Ok(path)
    }

    /// The run's frame files in lexical (= frame) order.
    pub fn frame_paths(&self, run: RunId) -> Result<Vec<PathBuf>> {
        let dir = self.run_dir(run);
        if !dir.exists() {
            return Err(OutputError::not_found(format!("run {run}")));
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Removes every artifact of the run. Missing directories are fine; the
    /// run may have produced no frames at all.
    pub fn remove_run(&self, run: RunId) -> Result<()> {
        let dir = self.run_dir(run);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            tracing::debug!(run = %run, "Removed frame directory");
        }
        Ok(())
    }
}

impl FrameSink for FrameStore {
    fn persist(&mut self, run: RunId, index: u32, frame: &FrameBuffer) -> anyhow::Result<()> {
        self.write_frame(run, index, frame)?;
        Ok(())
    }

    fn discard(&mut self, run: RunId) -> anyhow::Result<()> {
        self.remove_run(run)?;
        Ok(())
    }
}

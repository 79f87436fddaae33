//! Animation assembly: one looping GIF per kept run.

use crate::error::{OutputError, Result};
use crate::frames::FrameStore;
use fractide_data::RunId;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Assembles the run's lexically ordered frames into `<gifs_dir>/<run>.gif`.
///
/// The engine guarantees frame ordering and naming; this is the encoding
/// collaborator. Returns the path of the written animation.
pub fn assemble_gif(
    store: &FrameStore,
    run: RunId,
    gifs_dir: &Path,
    frame_delay_ms: u32,
) -> Result<PathBuf> {
    let paths = store.frame_paths(run)?;
    if paths.is_empty() {
        return Err(OutputError::assembly(format!("run {run} has no frames")));
    }

    fs::create_dir_all(gifs_dir)?;
    let out_path = gifs_dir.join(format!("{run}.gif"));
    let writer = BufWriter::new(File::create(&out_path)?);
    let mut encoder = GifEncoder::new_with_speed(writer, 10);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| OutputError::assembly(e.to_string()))?;

    let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
    for path in &paths {
        let img = image::open(path)
            .map_err(|e| OutputError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        let frame = Frame::from_parts(img, 0, 0, delay);
        encoder
            .encode_frame(frame)
            .map_err(|e| OutputError::assembly(e.to_string()))?;
    }
    drop(encoder);

    tracing::info!(run = %run, frames = paths.len(), path = %out_path.display(), "Assembled animation");
    Ok(out_path)
}

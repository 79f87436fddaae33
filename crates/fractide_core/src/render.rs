//! Finest-level rendering and the frame sink seam.

use fractide_data::{ColorScheme, FrameBuffer, GridLevel, RunId};

/// Destination for rendered frames.
///
/// The production implementation persists PNG files (`fractide_io`); tests use
/// in-memory sinks. `discard` drops everything persisted for a run whose
/// trajectory turned out uninteresting.
pub trait FrameSink {
    fn persist(&mut self, run: RunId, index: u32, frame: &FrameBuffer) -> anyhow::Result<()>;

    fn discard(&mut self, _run: RunId) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Maps the finest-level grid to a fixed-size pixel buffer by nearest-neighbor
/// upscaling: each logical cell becomes a block of identically colored pixels,
/// dead cells in `scheme.dead`, alive cells in `scheme.alive`.
#[must_use]
pub fn render(finest: &GridLevel, scheme: &ColorScheme, frame_size: u32) -> FrameBuffer {
    let side = finest.side();
    let mut frame = FrameBuffer::filled(frame_size, frame_size, scheme.dead);
    for y in 0..frame_size {
        let row = y as usize * side / frame_size as usize;
        for x in 0..frame_size {
            let col = x as usize * side / frame_size as usize;
            if finest.get(row, col) != 0 {
                frame.put(x, y, scheme.alive);
            }
        }
    }
    frame
}

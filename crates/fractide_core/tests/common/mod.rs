use fractide_core::render::FrameSink;
use fractide_data::{FrameBuffer, RunId};
use std::collections::HashMap;

/// In-memory frame sink: records every persisted frame and discarded run.
#[derive(Default)]
pub struct MemorySink {
    pub frames: Vec<(RunId, u32, FrameBuffer)>,
    pub discarded: Vec<RunId>,
}

#[allow(dead_code)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames persisted per run id, in persist order.
    pub fn by_run(&self) -> HashMap<RunId, Vec<u32>> {
        let mut map: HashMap<RunId, Vec<u32>> = HashMap::new();
        for (run, index, _) in &self.frames {
            map.entry(*run).or_default().push(*index);
        }
        map
    }
}

impl FrameSink for MemorySink {
    fn persist(&mut self, run: RunId, index: u32, frame: &FrameBuffer) -> anyhow::Result<()> {
        self.frames.push((run, index, frame.clone()));
        Ok(())
    }

    fn discard(&mut self, run: RunId) -> anyhow::Result<()> {
        self.discarded.push(run);
        self.frames.retain(|(r, _, _)| *r != run);
        Ok(())
    }
}

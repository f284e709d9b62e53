use std::sync::OnceLock;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::frame::Frame;

/// Destination for rendered frames.
///
/// Frames may arrive from several workers at once and in any order; each index is written at most
/// once per render.
pub trait FrameSink: Sync {
    /// Number of frame slots.
    fn frame_count(&self) -> u64;

    /// Store `frame` at `index`. Indices at or beyond [`FrameSink::frame_count`] are rejected.
    fn write_frame(&self, index: FrameIndex, frame: &Frame) -> RenderResult<()>;
}

pub(crate) fn check_index(index: FrameIndex, frame_count: u64) -> RenderResult<()> {
    if index.0 >= frame_count {
        return Err(RenderError::validation(format!(
            "frame index {} out of range (frame count {frame_count})",
            index.0
        )));
    }
    Ok(())
}

/// Write-once in-memory frame store.
#[derive(Debug, Default)]
pub struct InMemorySink {
    slots: Vec<OnceLock<Frame>>,
}

impl InMemorySink {
    pub fn new(frame_count: u64) -> Self {
        Self {
            slots: (0..frame_count).map(|_| OnceLock::new()).collect(),
        }
    }

    pub fn frame(&self, index: FrameIndex) -> Option<&Frame> {
        self.slots.get(index.0 as usize)?.get()
    }

    /// Number of slots written so far.
    pub fn written(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    /// All frames in index order. Fails if any slot was never written.
    pub fn into_frames(self) -> RenderResult<Vec<Frame>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.into_inner()
                    .ok_or_else(|| RenderError::render(format!("frame {i} was never written")))
            })
            .collect()
    }
}

impl FrameSink for InMemorySink {
    fn frame_count(&self) -> u64 {
        self.slots.len() as u64
    }

    fn write_frame(&self, index: FrameIndex, frame: &Frame) -> RenderResult<()> {
        check_index(index, self.frame_count())?;
        self.slots[index.0 as usize]
            .set(frame.clone())
            .map_err(|_| RenderError::render(format!("frame {} written twice", index.0)))
    }
}

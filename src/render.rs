//! Rendering: coordinate transforms, snapshots, per-pixel compositing and the frame scheduler.

pub(crate) mod compositor;
pub(crate) mod frame;
pub(crate) mod pipeline;
pub(crate) mod scheduler;
pub(crate) mod snapshot;
pub(crate) mod transform;

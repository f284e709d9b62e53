//! Live scene state: camera, actors, background and screen-space shaders.
//!
//! The scene is mutated between ticks (directly or through a think callback) and is only ever read
//! by rendering through immutable snapshots.

pub(crate) mod actor;
pub(crate) mod camera;
pub(crate) mod def;
pub(crate) mod model;

//! Frame sinks: where rendered frames go.
//!
//! [`sink::InMemorySink`] keeps frames in memory. [`movie::Movie`] stages them on disk as BMP
//! images and hands the sequence to the system `ffmpeg` binary.

pub(crate) mod movie;
pub(crate) mod sink;

//! Snapshot simulation and frame-parallel rendering.
//!
//! Simulation runs single-threaded and produces one snapshot per tick plus the initial state.
//! Rendering then hands frame indices out through a shared atomic counter to a fixed pool of
//! workers. Each index is claimed by exactly one worker, so every frame is rendered and written
//! exactly once whatever the worker count.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::encode::sink::FrameSink;
use crate::foundation::color::BlendMode;
use crate::foundation::core::{Extent, FrameIndex};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::compositor::composite;
use crate::render::snapshot::SceneSnapshot;
use crate::scene::model::Scene;

/// Options for still and movie renders.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    /// Worker count. `None` uses the available hardware parallelism; `Some(0)` is rejected.
    pub threads: Option<usize>,
    pub blend: BlendMode,
    /// How often the coordinating thread reports progress while workers run.
    pub progress_interval: Duration,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            threads: None,
            blend: BlendMode::Replace,
            progress_interval: Duration::from_millis(500),
        }
    }
}

impl RenderOpts {
    pub fn validate(&self) -> RenderResult<()> {
        if self.threads == Some(0) {
            return Err(RenderError::validation(
                "render option 'threads' must be >= 1 when set",
            ));
        }
        if self.progress_interval.is_zero() {
            return Err(RenderError::validation(
                "render option 'progress_interval' must be non-zero",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub workers: usize,
}

/// Shared frame counter handing out each index once.
#[derive(Debug)]
pub struct FrameClaims {
    next: AtomicU64,
    done: AtomicU64,
    total: u64,
    aborted: AtomicBool,
}

impl FrameClaims {
    pub fn new(total: u64) -> Self {
        Self {
            next: AtomicU64::new(0),
            done: AtomicU64::new(0),
            total,
            aborted: AtomicBool::new(false),
        }
    }

    /// Claim the next unrendered index, or `None` once every index is taken or the run aborted.
    pub fn claim(&self) -> Option<FrameIndex> {
        if self.aborted.load(Ordering::Acquire) {
            return None;
        }
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        (i < self.total).then_some(FrameIndex(i))
    }

    /// Record a finished frame.
    pub fn complete(&self) {
        self.done.fetch_add(1, Ordering::AcqRel);
    }

    /// Stop handing out indices.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Frames finished so far.
    pub fn completed(&self) -> u64 {
        self.done.load(Ordering::Acquire)
    }
}

/// Capture the initial state, then tick through `times`, capturing after every think call.
///
/// Returns `times.len() + 1` snapshots. Frame `i` renders snapshot `i` at `times[i]`; the last
/// snapshot is the final state.
#[tracing::instrument(skip(scene, think), fields(ticks = times.len()))]
pub fn simulate(
    scene: &mut Scene,
    times: &[f64],
    think: &mut dyn FnMut(&mut Scene, f64, f64),
) -> Vec<SceneSnapshot> {
    let dt = scene.dt();
    let mut snapshots = Vec::with_capacity(times.len() + 1);
    snapshots.push(SceneSnapshot::capture(scene));
    for &t in times {
        think(scene, t, dt);
        snapshots.push(SceneSnapshot::capture(scene));
    }
    snapshots
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> RenderResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RenderError::validation(
            "render option 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("sprite2d-render-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RenderError::render(format!("failed to build rayon thread pool: {e}")))
}

/// Render `times.len()` frames from `snapshots` into `sink` on a worker pool.
///
/// The first error from any worker stops further claims and is returned once every worker has
/// exited.
#[tracing::instrument(skip(snapshots, times, opts, sink), fields(frames = times.len()))]
pub fn render_frames(
    snapshots: &[SceneSnapshot],
    times: &[f64],
    resolution: Extent,
    opts: &RenderOpts,
    sink: &dyn FrameSink,
) -> RenderResult<RenderStats> {
    opts.validate()?;
    if times.is_empty() {
        return Err(RenderError::validation(
            "cannot render a movie from an empty time sequence (fps * duration is zero)",
        ));
    }
    if snapshots.len() < times.len() {
        return Err(RenderError::render(format!(
            "{} snapshots cannot cover {} frames",
            snapshots.len(),
            times.len()
        )));
    }
    Extent::non_zero(resolution.width, resolution.height)?;

    let pool = build_thread_pool(opts.threads)?;
    let workers = pool.current_num_threads();
    let claims = FrameClaims::new(times.len() as u64);
    let started = Instant::now();
    let (tx, rx) = mpsc::channel::<RenderResult<()>>();

    let first_err = pool.in_place_scope(|s| {
        for _ in 0..workers {
            let tx = tx.clone();
            let claims = &claims;
            s.spawn(move |_| {
                let res = worker_loop(claims, snapshots, times, resolution, opts.blend, sink);
                if res.is_err() {
                    claims.abort();
                }
                let _ = tx.send(res);
            });
        }
        drop(tx);

        let mut first_err = None;
        let mut exited = 0usize;
        while exited < workers {
            match rx.recv_timeout(opts.progress_interval) {
                Ok(res) => {
                    exited += 1;
                    if let Err(e) = res
                        && first_err.is_none()
                    {
                        first_err = Some(e);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    tracing::debug!(
                        done = claims.completed(),
                        total = claims.total(),
                        "rendering frames"
                    );
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
        first_err
    });

    if let Some(e) = first_err {
        tracing::warn!(error = %e, done = claims.completed(), "render aborted");
        return Err(e);
    }

    let stats = RenderStats {
        frames_total: claims.total(),
        frames_rendered: claims.completed(),
        workers,
    };
    tracing::info!(
        frames = stats.frames_rendered,
        workers,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered frames"
    );
    Ok(stats)
}

fn worker_loop(
    claims: &FrameClaims,
    snapshots: &[SceneSnapshot],
    times: &[f64],
    resolution: Extent,
    blend: BlendMode,
    sink: &dyn FrameSink,
) -> RenderResult<()> {
    while let Some(idx) = claims.claim() {
        let i = idx.0 as usize;
        let frame = composite(&snapshots[i], resolution, times[i], blend);
        sink.write_frame(idx, &frame)?;
        claims.complete();
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;

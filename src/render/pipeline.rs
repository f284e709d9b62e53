use crate::encode::movie::{Movie, StagingArea};
use crate::encode::sink::FrameSink;
use crate::foundation::core::Extent;
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::compositor::composite;
use crate::render::frame::Frame;
use crate::render::scheduler::{RenderOpts, RenderStats, render_frames, simulate};
use crate::render::snapshot::SceneSnapshot;
use crate::scene::model::Scene;

/// Per-tick scene update: `(scene, time, dt)`.
pub type ThinkFn = Box<dyn FnMut(&mut Scene, f64, f64) + Send>;

/// Owns a scene and renders it at a fixed resolution.
///
/// Still renders read the live scene. Movie renders first simulate the whole timeline (running the
/// bound think callback once per tick, which mutates the live scene) and then render every frame
/// in parallel.
pub struct Renderer {
    resolution: Extent,
    scene: Scene,
    opts: RenderOpts,
    think: Option<ThinkFn>,
    staging: StagingArea,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("resolution", &self.resolution)
            .field("opts", &self.opts)
            .field("think", &self.think.is_some())
            .field("staging", &self.staging.root())
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Renderer with default options. The resolution must be non-zero.
    pub fn new(resolution: Extent, scene: Scene) -> RenderResult<Self> {
        Self::with_opts(resolution, scene, RenderOpts::default())
    }

    pub fn with_opts(resolution: Extent, scene: Scene, opts: RenderOpts) -> RenderResult<Self> {
        Extent::non_zero(resolution.width, resolution.height)?;
        opts.validate()?;
        Ok(Self {
            resolution,
            scene,
            opts,
            think: None,
            staging: StagingArea::in_temp_dir(),
        })
    }

    /// Stage movies under `staging` instead of a fresh temp directory.
    pub fn with_staging(mut self, staging: StagingArea) -> Self {
        self.staging = staging;
        self
    }

    pub fn resolution(&self) -> Extent {
        self.resolution
    }

    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// Install the per-tick callback, replacing any previous one.
    pub fn bind_think(&mut self, think: impl FnMut(&mut Scene, f64, f64) + Send + 'static) {
        self.think = Some(Box::new(think));
    }

    /// Go back to the no-op callback.
    pub fn unbind_think(&mut self) {
        self.think = None;
    }

    /// Render the live scene as it is now, at `time`.
    #[tracing::instrument(skip(self))]
    pub fn render(&self, time: f64) -> Frame {
        let snapshot = SceneSnapshot::capture(&self.scene);
        composite(&snapshot, self.resolution, time, self.opts.blend)
    }

    /// Render frame `n` of the timeline.
    ///
    /// Runs the think callback for ticks `0..n` on a copy of the scene, so the live scene is left
    /// untouched.
    #[tracing::instrument(skip(self))]
    pub fn render_frame_num(&mut self, n: u64) -> RenderResult<Frame> {
        let times = self.scene.time_sequence();
        let Some(&time) = times.get(n as usize) else {
            return Err(RenderError::validation(format!(
                "frame {n} out of range (frame count {})",
                times.len()
            )));
        };

        let mut scene = self.scene.clone();
        let dt = scene.dt();
        if let Some(think) = self.think.as_mut() {
            for &t in &times[..n as usize] {
                think(&mut scene, t, dt);
            }
        }
        let snapshot = SceneSnapshot::capture(&scene);
        Ok(composite(&snapshot, self.resolution, time, self.opts.blend))
    }

    /// Run the think callback over the whole timeline, returning one snapshot per frame plus the
    /// final state.
    pub fn simulate(&mut self) -> Vec<SceneSnapshot> {
        let times = self.scene.time_sequence();
        match self.think.as_mut() {
            Some(think) => simulate(&mut self.scene, &times, think.as_mut()),
            None => simulate(&mut self.scene, &times, &mut |_: &mut Scene, _: f64, _: f64| {}),
        }
    }

    /// Simulate and render every frame into a staged [`Movie`].
    #[tracing::instrument(skip(self))]
    pub fn render_all(&mut self) -> RenderResult<Movie> {
        let frame_count = self.scene.frame_count();
        if frame_count == 0 {
            return Err(RenderError::validation(
                "cannot render a movie from an empty time sequence (fps * duration is zero)",
            ));
        }
        let movie = Movie::new(&self.staging, self.scene.fps(), frame_count, self.resolution)?;
        self.render_all_into(&movie)?;
        Ok(movie)
    }

    /// Simulate and render every frame into `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_all_into(&mut self, sink: &dyn FrameSink) -> RenderResult<RenderStats> {
        let times = self.scene.time_sequence();
        if times.is_empty() {
            return Err(RenderError::validation(
                "cannot render a movie from an empty time sequence (fps * duration is zero)",
            ));
        }
        let snapshots = self.simulate();
        render_frames(&snapshots, &times, self.resolution, &self.opts, sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

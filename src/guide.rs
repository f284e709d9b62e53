//! # sprite2d guide
//!
//! This module is a standalone walkthrough of how a render works: which coordinate spaces exist,
//! what order pixels are produced in, and how movie renders are split across threads.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Scene`](crate::Scene): camera, background, actors (insertion order) and screen shaders
//! - [`Actor`](crate::Actor): a shared [`Sprite`](crate::Sprite) placed, sized and rotated in the
//!   world, with its own shader queue
//! - [`Shader`](crate::Shader): a pure per-fragment color transform
//! - [`SceneSnapshot`](crate::SceneSnapshot): an immutable copy of a scene at one instant
//! - [`Renderer`](crate::Renderer): owns a scene and a resolution, renders stills and movies
//! - [`Frame`](crate::Frame): straight-alpha RGBA8 pixels, top row first
//!
//! ---
//!
//! ## Coordinate spaces
//!
//! - **Screen**: integer pixels, column `j`, row `i`, with row 0 at the *bottom* of the frame.
//! - **World**: continuous, y up. The screen midpoint (`size / 2`, integer halving) shows the
//!   camera center. A screen offset is divided by the zoom, moved by the center and then rotated
//!   by the camera rotation ([`screen_to_world`](crate::screen_to_world)).
//! - **Actor**: world minus the actor position, rotated by the negative actor rotation
//!   ([`world_to_actor`](crate::world_to_actor)). The actor covers `[-w/2, w/2)` horizontally and
//!   `(-h/2, h/2]` vertically; the sprite's top row sits at the top.
//!
//! Sprites are resampled nearest-neighbor from actor size to sprite size.
//!
//! ---
//!
//! ## Building and rendering a scene
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sprite2d::{Actor, Extent, Rainbow, Renderer, Rgb, Rgba, Scene, Shader, Sprite, Vec2};
//!
//! # fn main() -> sprite2d::RenderResult<()> {
//! let mut scene = Scene::new(30, 2.0)?;
//! scene.set_background_color(Rgb::new(16, 18, 28));
//!
//! let sprite = Arc::new(Sprite::filled(Extent::new(32, 32), Rgba::WHITE));
//! let mut actor = Actor::new(sprite)?.at(Vec2::new(-40.0, 0.0));
//! actor.queue_shader(Shader::new(Rainbow::default()));
//! let key = scene.add_actor(actor);
//!
//! let mut renderer = Renderer::new(Extent::new(320, 240), scene)?;
//! renderer.bind_think(move |scene, _time, dt| {
//!     if let Some(a) = scene.actor_mut(key) {
//!         a.translate(Vec2::new(40.0 * dt, 0.0));
//!         a.rotate(dt);
//!     }
//! });
//!
//! renderer.render(0.0).output("still.png")?;
//! let movie = renderer.render_all()?;
//! let outcome = movie.output("spin");
//! assert!(outcome.is_encoded());
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Per-pixel order
//!
//! For every output pixel the [`composite`](crate::composite) function:
//!
//! 1. starts from the flat background color (alpha 255), blended under a tiled background sprite
//!    if one is set
//! 2. for each actor in insertion order, samples the sprite, runs the actor's shader queue with
//!    the *sprite* coordinate and sprite size, and blends the result over the running color
//! 3. after the whole grid is done, runs the screen shader queue with the *screen* coordinate
//!    (bottom-origin) and the frame size
//!
//! Blending is controlled by [`BlendMode`](crate::BlendMode). The default,
//! [`BlendMode::Replace`](crate::BlendMode::Replace), writes the foreground color as-is, including
//! its alpha. Use [`BlendMode::SourceOver`](crate::BlendMode::SourceOver) through
//! [`RenderOpts`](crate::RenderOpts) for real transparency.
//!
//! ---
//!
//! ## Movie renders
//!
//! [`Renderer::render_all`](crate::Renderer::render_all) runs in two phases:
//!
//! 1. **Simulation** (one thread). The timeline has `ceil(fps * duration)` samples `i / fps`. The
//!    initial state is captured, then for every sample the think callback runs and the state is
//!    captured again. Frame `i` renders snapshot `i`, i.e. the state *before* tick `i`.
//! 2. **Rendering** (worker pool). Workers claim indices from a shared atomic counter
//!    ([`FrameClaims`](crate::FrameClaims)) and write each frame to the sink at that index. The
//!    first worker error stops further claims and is returned to the caller.
//!
//! Output is bit-identical for any worker count.
//!
//! ---
//!
//! ## Scene files
//!
//! [`SceneDef`](crate::SceneDef) describes a scene as JSON, including constant-velocity motion
//! that [`MotionScript::think`](crate::MotionScript::think) applies per tick. The `sprite2d`
//! binary renders these files:
//!
//! ```text
//! sprite2d frame --in scene.json --out still.png --time 0.5
//! sprite2d render --in scene.json --out movie.mp4 --threads 8
//! ```

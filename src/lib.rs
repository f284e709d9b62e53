//! sprite2d renders 2D sprite scenes into still frames and movies.
//!
//! A [`Scene`] holds a camera, a background and an ordered list of [`Actor`]s, each backed by a
//! shared [`Sprite`]. Per-pixel color transforms ([`Shader`]s) can be queued on actors and on the
//! screen. A [`Renderer`] composites the scene into [`Frame`]s:
//!
//! - [`Renderer::render`] for a single still of the live scene
//! - [`Renderer::render_all`] to simulate the timeline and render every frame in parallel into a
//!   staged [`Movie`], which [`Movie::output`] hands to `ffmpeg`
//! - [`Renderer::render_all_into`] to stream frames into any [`FrameSink`]
//!
//! See [`guide`] for a walkthrough of coordinate spaces and the render pipeline.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod render;
mod scene;
mod shader;

pub mod guide;

pub use crate::foundation::color::{BlendMode, ColorDef, Hsv, Rgb, Rgba, alpha_blend};
pub use crate::foundation::core::{Affine, Extent, FrameIndex, PixelCoord, Point, Vec2};
pub use crate::foundation::error::{RenderError, RenderResult};

pub use crate::assets::decode::decode_sprite;
pub use crate::assets::sprite::Sprite;

pub use crate::shader::library::{
    Fill, Grayscale, Invert, Mandelbrot, Multibrot, Rainbow, Scale, ShaderDef, Tint,
};
pub use crate::shader::queue::ShaderQueue;
pub use crate::shader::{Fragment, FragmentShader, Shader};

pub use crate::scene::actor::Actor;
pub use crate::scene::camera::Camera;
pub use crate::scene::def::{
    ActorDef, BackgroundDef, CameraDef, MotionScript, SceneDef, SpriteDef,
};
pub use crate::scene::model::{ActorKey, Scene};

pub use crate::render::compositor::composite;
pub use crate::render::frame::Frame;
pub use crate::render::pipeline::{Renderer, ThinkFn};
pub use crate::render::scheduler::{FrameClaims, RenderOpts, RenderStats, render_frames, simulate};
pub use crate::render::snapshot::SceneSnapshot;
pub use crate::render::transform::{
    actor_to_world, screen_to_actor, screen_to_world, world_to_actor,
};

pub use crate::encode::movie::{
    EncodeOpts, EncodeOutcome, Movie, StagingArea, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use crate::encode::sink::{FrameSink, InMemorySink};

//! JSON scene description.
//!
//! A [`SceneDef`] describes the initial state of a [`Scene`] plus simple per-actor motion. Image
//! paths are resolved relative to a root directory handed to [`SceneDef::build`].
//!
//! ```json
//! {
//!   "fps": 30,
//!   "duration": 2.0,
//!   "background": { "color": "#102030" },
//!   "actors": [
//!     {
//!       "sprite": { "kind": "solid", "width": 8, "height": 8, "color": [255, 0, 0] },
//!       "position": [0, 0],
//!       "spin_deg": 90,
//!       "shaders": [{ "kind": "rainbow" }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::sprite::Sprite;
use crate::foundation::color::ColorDef;
use crate::foundation::core::{Extent, Vec2};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::RAD_PER_DEG;
use crate::scene::actor::Actor;
use crate::scene::camera::Camera;
use crate::scene::model::{ActorKey, Scene};
use crate::shader::library::ShaderDef;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub background: BackgroundDef,
    #[serde(default)]
    pub camera: CameraDef,
    #[serde(default)]
    pub actors: Vec<ActorDef>,
    /// Screen-space shaders, applied after compositing.
    #[serde(default)]
    pub shaders: Vec<ShaderDef>,
}

fn default_fps() -> u32 {
    30
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackgroundDef {
    #[serde(default)]
    pub color: ColorDef,
    /// Image tiled over the flat color.
    #[serde(default)]
    pub sprite: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDef {
    #[serde(default)]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    /// World units per second.
    #[serde(default)]
    pub velocity: [f64; 2],
    /// Degrees per second.
    #[serde(default)]
    pub spin_deg: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: default_zoom(),
            rotation_deg: 0.0,
            velocity: [0.0, 0.0],
            spin_deg: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorDef {
    pub sprite: SpriteDef,
    #[serde(default)]
    pub position: [f64; 2],
    /// Defaults to the sprite's native size.
    #[serde(default)]
    pub size: Option<[u32; 2]>,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub shaders: Vec<ShaderDef>,
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub spin_deg: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpriteDef {
    Image { path: String },
    Solid { width: u32, height: u32, color: ColorDef },
}

impl SceneDef {
    /// Parse a scene description from JSON text.
    pub fn from_json_str(s: &str) -> RenderResult<Self> {
        serde_json::from_str(s).map_err(|e| RenderError::serde(e.to_string()))
    }

    /// Read and parse a scene description file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene file '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Build the initial scene and its motion script. Image paths are relative to `root`.
    #[tracing::instrument(skip(self), fields(actors = self.actors.len()))]
    pub fn build(&self, root: &Path) -> RenderResult<(Scene, MotionScript)> {
        let mut scene = Scene::new(self.fps, self.duration)?;

        scene.set_background_color(self.background.color.to_rgba()?.rgb());
        if let Some(p) = &self.background.sprite {
            scene.set_background_sprite(Some(Arc::new(Sprite::open(root.join(p))?)));
        }

        let cam = &self.camera;
        *scene.camera_mut() = Camera::new(
            Vec2::new(cam.center[0], cam.center[1]),
            cam.zoom,
            cam.rotation_deg * RAD_PER_DEG,
        )?;

        for def in &self.shaders {
            scene.queue_shader(def.to_shader()?);
        }

        let mut script = MotionScript {
            camera: Motion::from_def(cam.velocity, cam.spin_deg),
            actors: Vec::new(),
        };

        for (idx, def) in self.actors.iter().enumerate() {
            let actor = def
                .build(root)
                .map_err(|e| RenderError::validation(format!("actor #{idx}: {e}")))?;
            let key = scene.add_actor(actor);
            let motion = Motion::from_def(def.velocity, def.spin_deg);
            if !motion.is_still() {
                script.actors.push((key, motion));
            }
        }

        Ok((scene, script))
    }
}

impl ActorDef {
    fn build(&self, root: &Path) -> RenderResult<Actor> {
        let sprite = match &self.sprite {
            SpriteDef::Image { path } => Sprite::open(root.join(path))?,
            SpriteDef::Solid {
                width,
                height,
                color,
            } => Sprite::filled(Extent::new(*width, *height), color.to_rgba()?),
        };

        let mut actor = Actor::new(Arc::new(sprite))?;
        if let Some([w, h]) = self.size {
            actor.set_size(Extent::new(w, h))?;
        }
        actor.set_position(Vec2::new(self.position[0], self.position[1]));
        actor.set_rotation(self.rotation_deg * RAD_PER_DEG);
        for def in &self.shaders {
            actor.queue_shader(def.to_shader()?);
        }
        Ok(actor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Motion {
    velocity: Vec2,
    spin: f64,
}

impl Motion {
    fn from_def(velocity: [f64; 2], spin_deg: f64) -> Self {
        Self {
            velocity: Vec2::new(velocity[0], velocity[1]),
            spin: spin_deg * RAD_PER_DEG,
        }
    }

    fn is_still(&self) -> bool {
        self.velocity == Vec2::ZERO && self.spin == 0.0
    }
}

/// Constant-velocity motion for the camera and actors, applied once per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionScript {
    camera: Motion,
    actors: Vec<(ActorKey, Motion)>,
}

impl MotionScript {
    /// Return `true` when nothing moves.
    pub fn is_still(&self) -> bool {
        self.camera.is_still() && self.actors.is_empty()
    }

    /// Advance every moving object by `dt` seconds. Removed actors are skipped.
    pub fn think(&self, scene: &mut Scene, _time: f64, dt: f64) {
        let cam = scene.camera_mut();
        cam.translate(self.camera.velocity * dt);
        cam.rotate(self.camera.spin * dt);

        for (key, motion) in &self.actors {
            if let Some(actor) = scene.actor_mut(*key) {
                actor.translate(motion.velocity * dt);
                actor.rotate(motion.spin * dt);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/def.rs"]
mod tests;

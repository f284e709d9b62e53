use std::sync::Arc;

use crate::assets::sprite::Sprite;
use crate::foundation::color::Rgb;
use crate::scene::actor::Actor;
use crate::scene::camera::Camera;
use crate::scene::model::Scene;
use crate::shader::queue::ShaderQueue;

/// Immutable copy of everything a render reads from a [`Scene`] at one instant.
///
/// Sprites and shaders are shared through `Arc`; camera and actor values are copied, so later
/// scene edits never leak into a captured snapshot.
#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    pub(crate) camera: Camera,
    pub(crate) actors: Vec<Actor>,
    pub(crate) background_color: Rgb,
    pub(crate) background_sprite: Option<Arc<Sprite>>,
    pub(crate) screen_shaders: ShaderQueue,
}

impl SceneSnapshot {
    /// Capture `scene` as it is now. Actors keep insertion order.
    pub fn capture(scene: &Scene) -> Self {
        Self {
            camera: *scene.camera(),
            actors: scene.actors().map(|(_, a)| a.clone()).collect(),
            background_color: scene.background_color(),
            background_sprite: scene.background_sprite().cloned(),
            screen_shaders: scene.shader_queue().clone(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }
}

use std::sync::Arc;

use slotmap::SlotMap;

use crate::assets::sprite::Sprite;
use crate::foundation::color::Rgb;
use crate::foundation::error::{RenderError, RenderResult};
use crate::scene::actor::Actor;
use crate::scene::camera::Camera;
use crate::shader::Shader;
use crate::shader::queue::ShaderQueue;

/// Slack absorbed by [`Scene::frame_count`] before rounding up.
const FRAME_COUNT_EPSILON: f64 = 1e-9;

slotmap::new_key_type! {
    /// Stable handle to an actor in a [`Scene`]. Keys of removed actors never resolve again.
    pub struct ActorKey;
}

/// Mutable scene state plus its timeline.
///
/// Actors are composited in insertion order. The timeline is `ceil(fps * duration)` samples
/// spaced `1 / fps` apart, starting at zero.
#[derive(Clone, Debug)]
pub struct Scene {
    fps: u32,
    duration: f64,
    background_color: Rgb,
    background_sprite: Option<Arc<Sprite>>,
    camera: Camera,
    actors: SlotMap<ActorKey, Actor>,
    order: Vec<ActorKey>,
    screen_shaders: ShaderQueue,
}

impl Scene {
    /// Scene with a timeline of `duration` seconds at `fps` frames per second.
    pub fn new(fps: u32, duration: f64) -> RenderResult<Self> {
        if fps == 0 {
            return Err(RenderError::validation("scene fps must be non-zero"));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(RenderError::validation(format!(
                "scene duration must be finite and >= 0, got {duration}"
            )));
        }
        Ok(Self {
            fps,
            duration,
            background_color: Rgb::default(),
            background_sprite: None,
            camera: Camera::default(),
            actors: SlotMap::with_key(),
            order: Vec::new(),
            screen_shaders: ShaderQueue::new(),
        })
    }

    /// Scene with an empty timeline, for still renders.
    pub fn still() -> Self {
        Self {
            fps: 1,
            duration: 0.0,
            background_color: Rgb::default(),
            background_sprite: None,
            camera: Camera::default(),
            actors: SlotMap::with_key(),
            order: Vec::new(),
            screen_shaders: ShaderQueue::new(),
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Timeline length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds between consecutive samples.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    /// Number of samples in the timeline: `ceil(fps * duration)`.
    ///
    /// Products within `1e-9` above an integer round down to it, so `25 * 2.2`
    /// is 55 frames.
    pub fn frame_count(&self) -> u64 {
        (f64::from(self.fps) * self.duration - FRAME_COUNT_EPSILON).ceil() as u64
    }

    /// Sample times `i / fps` for every frame.
    pub fn time_sequence(&self) -> Vec<f64> {
        let fps = f64::from(self.fps);
        (0..self.frame_count()).map(|i| i as f64 / fps).collect()
    }

    pub fn background_color(&self) -> Rgb {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.background_color = color;
    }

    pub fn background_sprite(&self) -> Option<&Arc<Sprite>> {
        self.background_sprite.as_ref()
    }

    /// Tile `sprite` over the background. `None` leaves only the flat color.
    pub fn set_background_sprite(&mut self, sprite: Option<Arc<Sprite>>) {
        self.background_sprite = sprite;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Add an actor on top of every existing one.
    pub fn add_actor(&mut self, actor: Actor) -> ActorKey {
        let key = self.actors.insert(actor);
        self.order.push(key);
        key
    }

    /// Add several actors, preserving their order.
    pub fn add_actors(&mut self, actors: impl IntoIterator<Item = Actor>) -> Vec<ActorKey> {
        actors.into_iter().map(|a| self.add_actor(a)).collect()
    }

    /// Remove an actor, returning it if the key was still live.
    pub fn remove_actor(&mut self, key: ActorKey) -> Option<Actor> {
        let actor = self.actors.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(actor)
    }

    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.actors.get_mut(key)
    }

    /// Number of live actors.
    pub fn actor_count(&self) -> usize {
        self.order.len()
    }

    /// Actors in insertion (compositing) order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorKey, &Actor)> + '_ {
        self.order
            .iter()
            .filter_map(|&k| self.actors.get(k).map(|a| (k, a)))
    }

    /// Append a screen-space shader.
    pub fn queue_shader(&mut self, shader: Shader) {
        self.screen_shaders.queue(shader);
    }

    pub fn clear_shaders(&mut self) {
        self.screen_shaders.clear();
    }

    pub fn shader_queue(&self) -> &ShaderQueue {
        &self.screen_shaders
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

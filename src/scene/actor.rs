use std::sync::Arc;

use crate::assets::sprite::Sprite;
use crate::foundation::core::{Extent, Vec2};
use crate::foundation::error::{RenderError, RenderResult};
use crate::shader::Shader;
use crate::shader::queue::ShaderQueue;

/// A sprite placed in the world.
///
/// `position` is the world coordinate of the actor's center. `size` is the on-screen footprint in
/// world units; the sprite is resampled (nearest neighbor) to fill it. The size is never zero in
/// either axis.
#[derive(Clone, Debug)]
pub struct Actor {
    sprite: Arc<Sprite>,
    position: Vec2,
    size: Extent,
    rotation: f64,
    shaders: ShaderQueue,
}

impl Actor {
    /// Place `sprite` at the origin at its native size.
    pub fn new(sprite: Arc<Sprite>) -> RenderResult<Self> {
        let size = sprite.size();
        check_size(size)?;
        Ok(Self {
            sprite,
            position: Vec2::ZERO,
            size,
            rotation: 0.0,
            shaders: ShaderQueue::new(),
        })
    }

    /// Builder form of [`Actor::set_position`].
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder form of [`Actor::set_rotation`].
    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder form of [`Actor::set_size`].
    pub fn with_size(mut self, size: Extent) -> RenderResult<Self> {
        self.set_size(size)?;
        Ok(self)
    }

    pub fn sprite(&self) -> &Arc<Sprite> {
        &self.sprite
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    /// Rotation in radians, counter-clockwise.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Swap the sprite, keeping the current size.
    pub fn set_sprite(&mut self, sprite: Arc<Sprite>) {
        self.sprite = sprite;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Extent) -> RenderResult<()> {
        check_size(size)?;
        self.size = size;
        Ok(())
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn rotate(&mut self, angle: f64) {
        self.rotation += angle;
    }

    /// Scale both axes by `factor`.
    pub fn scale(&mut self, factor: f64) -> RenderResult<()> {
        self.scale_xy(factor, factor)
    }

    /// Scale each axis independently. The result is truncated to whole pixels and must stay
    /// non-zero.
    pub fn scale_xy(&mut self, sx: f64, sy: f64) -> RenderResult<()> {
        let scale_axis = |v: u32, s: f64| -> RenderResult<u32> {
            let scaled = f64::from(v) * s;
            if !scaled.is_finite() || scaled < 1.0 || scaled > f64::from(u32::MAX) {
                return Err(RenderError::validation(format!(
                    "actor scale {s} turns axis {v} into {scaled}"
                )));
            }
            Ok(scaled as u32)
        };
        let size = Extent::new(
            scale_axis(self.size.width, sx)?,
            scale_axis(self.size.height, sy)?,
        );
        self.set_size(size)
    }

    /// Append a shader to the actor's queue.
    pub fn queue_shader(&mut self, shader: Shader) {
        self.shaders.queue(shader);
    }

    pub fn clear_shaders(&mut self) {
        self.shaders.clear();
    }

    pub fn shader_queue(&self) -> &ShaderQueue {
        &self.shaders
    }
}

fn check_size(size: Extent) -> RenderResult<()> {
    if size.is_empty() {
        return Err(RenderError::validation(format!(
            "actor size must be non-zero, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/actor.rs"]
mod tests;

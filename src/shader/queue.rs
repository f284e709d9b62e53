use crate::foundation::color::Rgba;
use crate::shader::{Fragment, Shader};

/// Ordered, append-only list of shaders.
///
/// There is no removal by identity; a queue can only grow or be cleared.
#[derive(Clone, Debug, Default)]
pub struct ShaderQueue {
    shaders: Vec<Shader>,
}

impl ShaderQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shader to the end of the queue.
    pub fn queue(&mut self, shader: Shader) {
        self.shaders.push(shader);
    }

    /// Remove every shader.
    pub fn clear(&mut self) {
        self.shaders.clear();
    }

    /// Number of queued shaders.
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Return `true` when no shader is queued.
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    /// Shaders in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Shader> {
        self.shaders.iter()
    }

    /// Run every shader in order, feeding each one the previous output.
    pub fn apply(&self, input: Rgba, frag: &Fragment) -> Rgba {
        self.shaders
            .iter()
            .fold(input, |color, shader| shader.apply(color, frag))
    }
}

impl FromIterator<Shader> for ShaderQueue {
    fn from_iter<I: IntoIterator<Item = Shader>>(iter: I) -> Self {
        Self {
            shaders: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/queue.rs"]
mod tests;

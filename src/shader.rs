//! Fragment shader contract.
//!
//! A shader is a pure per-pixel color transform. It receives the incoming fragment color plus the
//! fragment's coordinate, the resolution of the space that coordinate lives in, and the elapsed
//! scene time, and it always returns an output color. Parameters ("uniforms") are captured when
//! the shader value is built and never change afterwards.
//!
//! Shaders are applied through a [`ShaderQueue`], in registration order, each one consuming the
//! previous one's output.

pub(crate) mod library;
pub(crate) mod queue;

use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::core::{Extent, PixelCoord};

/// Per-fragment inputs handed to a shader alongside the incoming color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Fragment coordinate.
    ///
    /// For actor shaders this is the sampled sprite pixel (top-origin); for screen shaders it is
    /// the output pixel with row 0 at the bottom of the frame.
    pub coord: PixelCoord,
    /// Size of the space `coord` lives in (sprite size or frame size).
    pub resolution: Extent,
    /// Elapsed scene time in seconds.
    pub time: f64,
}

/// A pure fragment transform.
///
/// Implementations must be side-effect free apart from their return value; they are shared across
/// render workers.
pub trait FragmentShader: Send + Sync {
    /// Transform `input` into the fragment's output color.
    fn shade(&self, input: Rgba, frag: &Fragment) -> Rgba;
}

impl<F> FragmentShader for F
where
    F: Fn(Rgba, &Fragment) -> Rgba + Send + Sync,
{
    fn shade(&self, input: Rgba, frag: &Fragment) -> Rgba {
        self(input, frag)
    }
}

/// Shared handle to a fragment shader, cheap to clone into snapshots.
#[derive(Clone)]
pub struct Shader {
    inner: Arc<dyn FragmentShader>,
}

impl Shader {
    /// Wrap a shader implementation (a built-in parameter struct or a closure).
    pub fn new(shader: impl FragmentShader + 'static) -> Self {
        Self {
            inner: Arc::new(shader),
        }
    }

    /// Run the shader for one fragment.
    pub fn apply(&self, input: Rgba, frag: &Fragment) -> Rgba {
        self.inner.shade(input, frag)
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Shader(..)")
    }
}

use crate::foundation::error::{RenderError, RenderResult};

pub use kurbo::{Affine, Point, Vec2};

/// Absolute 0-based frame index in movie timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Width/height pair in whole pixels.
///
/// Used for output resolutions, sprite sizes and actor sizes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Create an extent without validation.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create an extent that must be at least 1x1.
    pub fn non_zero(width: u32, height: u32) -> RenderResult<Self> {
        let e = Self::new(width, height);
        if e.is_empty() {
            return Err(RenderError::validation(format!(
                "extent must be non-zero in both axes, got {width}x{height}"
            )));
        }
        Ok(e)
    }

    /// Return `true` when either axis is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Extent as a floating-point vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Integer pixel coordinate.
///
/// For screen-space fragments `y` counts rows from the bottom of the frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl PixelCoord {
    /// Create a pixel coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use crate::foundation::core::Vec2;
use crate::foundation::error::{RenderError, RenderResult};

/// View into world space.
///
/// `center` is the world point shown at the screen midpoint, `zoom` scales world units to pixels
/// and `rotation` (radians) rotates the view counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    center: Vec2,
    zoom: f64,
    rotation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
        }
    }
}

impl Camera {
    /// Build a camera, validating that `zoom` is finite and positive.
    pub fn new(center: Vec2, zoom: f64, rotation: f64) -> RenderResult<Self> {
        validate_zoom(zoom)?;
        Ok(Self {
            center,
            zoom,
            rotation,
        })
    }

    /// World point at the screen midpoint.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Pixels per world unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// View rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) -> RenderResult<()> {
        validate_zoom(zoom)?;
        self.zoom = zoom;
        Ok(())
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Move the center by `delta` world units.
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Multiply the zoom by `factor`.
    pub fn scale_zoom(&mut self, factor: f64) -> RenderResult<()> {
        self.set_zoom(self.zoom * factor)
    }

    /// Add `angle` radians to the rotation.
    pub fn rotate(&mut self, angle: f64) {
        self.rotation += angle;
    }
}

fn validate_zoom(zoom: f64) -> RenderResult<()> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(RenderError::validation(format!(
            "camera zoom must be finite and > 0, got {zoom}"
        )));
    }
    Ok(())
}

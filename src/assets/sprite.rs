use std::path::Path;

use anyhow::Context as _;

use crate::foundation::color::Rgba;
use crate::foundation::core::Extent;
use crate::foundation::error::{RenderError, RenderResult};

/// Immutable RGBA pixel buffer sampled by actors and backgrounds.
///
/// Pixels are stored row-major with the top row first. Sprites are shared between the live scene
/// and every snapshot through `Arc<Sprite>`, so they never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    size: Extent,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// A sprite of `size` where every pixel is `color`.
    ///
    /// Zero-sized sprites are allowed; they sample as "no sprite" when used as a background.
    pub fn filled(size: Extent, color: Rgba) -> Self {
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    /// Wrap an existing pixel vector.
    pub fn from_pixels(size: Extent, pixels: Vec<Rgba>) -> RenderResult<Self> {
        if pixels.len() != size.area() {
            return Err(RenderError::validation(format!(
                "sprite pixel count {} does not match {}x{}",
                pixels.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self { size, pixels })
    }

    /// Build from tightly packed straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> RenderResult<Self> {
        let size = Extent::new(width, height);
        if bytes.len() != size.area() * 4 {
            return Err(RenderError::validation(format!(
                "rgba8 buffer of {} bytes does not match {width}x{height}",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self { size, pixels })
    }

    /// Decode an encoded image (PNG, BMP, ...) held in memory.
    pub fn from_image_bytes(bytes: &[u8]) -> RenderResult<Self> {
        crate::assets::decode::decode_sprite(bytes)
    }

    /// Load and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read sprite image '{}'", path.display()))?;
        Self::from_image_bytes(&bytes)
            .map_err(|e| RenderError::validation(format!("sprite '{}': {e}", path.display())))
    }

    /// Sprite width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Sprite height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Sprite dimensions.
    pub fn size(&self) -> Extent {
        self.size
    }

    /// Row-major pixel buffer, top row first.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y` (top-origin), if in range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.at(x, y))
    }

    /// Pixel lookup for coordinates already known to be in range.
    pub(crate) fn at(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y as usize) * (self.size.width as usize) + (x as usize)]
    }
}

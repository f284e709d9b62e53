use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::color::Rgba;
use crate::foundation::error::{RenderError, RenderResult};

/// A rendered RGBA8 image, straight alpha, rows stored top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// A frame where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let n = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&color.to_array());
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel at linear `index` (row-major, top row first).
    pub fn pixel(&self, index: usize) -> Option<Rgba> {
        let px = self.data.get(index * 4..index * 4 + 4)?;
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Overwrite the pixel at linear `index`.
    pub fn set_pixel(&mut self, index: usize, color: Rgba) -> RenderResult<()> {
        let len = self.len();
        let px = self
            .data
            .get_mut(index * 4..index * 4 + 4)
            .ok_or_else(|| {
                RenderError::validation(format!("pixel index {index} out of range ({len})"))
            })?;
        px.copy_from_slice(&color.to_array());
        Ok(())
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Drop alpha, producing tightly packed RGB8 bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Write the frame as a PNG. `.png` is appended when `path` has no extension.
    ///
    /// Returns the path actually written.
    pub fn output(&self, path: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension("png");
        }
        crate::encode::movie::ensure_parent_dir(&path)?;
        image::save_buffer_with_format(
            &path,
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(path)
    }
}

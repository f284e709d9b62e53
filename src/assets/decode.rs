use anyhow::Context;

use crate::{RenderResult, assets::sprite::Sprite};

/// Decode image bytes into a straight-alpha RGBA sprite.
///
/// Grayscale and RGB sources are expanded to opaque RGBA by the `image` crate.
pub fn decode_sprite(bytes: &[u8]) -> RenderResult<Sprite> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Sprite::from_rgba8(width, height, rgba.as_raw())
}

use crate::assets::sprite::Sprite;
use crate::foundation::color::{BlendMode, Rgba, alpha_blend};
use crate::foundation::core::{Affine, Extent, PixelCoord, Point};
use crate::render::frame::Frame;
use crate::render::snapshot::SceneSnapshot;
use crate::render::transform::{actor_affine, actor_index, camera_affine, centered};
use crate::scene::actor::Actor;
use crate::shader::Fragment;

struct PreparedActor<'a> {
    actor: &'a Actor,
    to_local: Affine,
}

/// Render `snapshot` at `time` into a frame of `resolution`.
///
/// Each pixel starts from the background, then every actor is blended on top in snapshot order.
/// A second pass runs the screen-space shader queue over the finished grid. Screen-space fragment
/// rows count from the bottom of the frame.
#[tracing::instrument(level = "trace", skip(snapshot))]
pub fn composite(
    snapshot: &SceneSnapshot,
    resolution: Extent,
    time: f64,
    blend: BlendMode,
) -> Frame {
    let (w, h) = (resolution.width, resolution.height);
    let mut frame = Frame::filled(w, h, Rgba::TRANSPARENT);

    let to_world = camera_affine(&snapshot.camera);
    let actors: Vec<PreparedActor<'_>> = snapshot
        .actors
        .iter()
        .filter(|a| !a.sprite().size().is_empty())
        .map(|actor| PreparedActor {
            actor,
            to_local: actor_affine(actor),
        })
        .collect();

    for i in 0..h {
        let row = (h - i - 1) as usize * w as usize;
        for j in 0..w {
            let world = to_world * centered(resolution, PixelCoord::new(j, i));
            let mut out = background_at(snapshot, world, blend);
            for prepared in &actors {
                if let Some(c) = actor_sample(prepared, world, time) {
                    out = alpha_blend(c, out, blend);
                }
            }
            write_px(&mut frame, row + j as usize, out);
        }
    }

    if !snapshot.screen_shaders.is_empty() {
        for i in 0..h {
            let row = (h - i - 1) as usize * w as usize;
            for j in 0..w {
                let idx = row + j as usize;
                let frag = Fragment {
                    coord: PixelCoord::new(j, i),
                    resolution,
                    time,
                };
                let input = read_px(&frame, idx);
                write_px(&mut frame, idx, snapshot.screen_shaders.apply(input, &frag));
            }
        }
    }

    frame
}

fn background_at(snapshot: &SceneSnapshot, world: Point, blend: BlendMode) -> Rgba {
    let flat = snapshot.background_color.with_alpha(255);
    match snapshot.background_sprite.as_deref() {
        Some(sprite) if !sprite.size().is_empty() => {
            alpha_blend(tile_sample(sprite, world), flat, blend)
        }
        _ => flat,
    }
}

/// Sample a background sprite anchored with its top-left at `(-(w/2), h/2)`, tiling both axes.
fn tile_sample(sprite: &Sprite, world: Point) -> Rgba {
    let (w, h) = (i64::from(sprite.width()), i64::from(sprite.height()));
    let left = -(w / 2) as f64;
    let top = (h / 2) as f64;
    let x = (world.x - left).floor() as i64;
    let y = (top - world.y).floor() as i64;
    sprite.at(x.rem_euclid(w) as u32, y.rem_euclid(h) as u32)
}

fn actor_sample(prepared: &PreparedActor<'_>, world: Point, time: f64) -> Option<Rgba> {
    let actor = prepared.actor;
    let size = actor.size();
    let (ax, ay) = actor_index(size, prepared.to_local * world)?;

    let sprite = actor.sprite();
    let sprite_size = sprite.size();
    let sx = (u64::from(ax) * u64::from(sprite_size.width) / u64::from(size.width)) as u32;
    let sy = (u64::from(ay) * u64::from(sprite_size.height) / u64::from(size.height)) as u32;

    let frag = Fragment {
        coord: PixelCoord::new(sx, sy),
        resolution: sprite_size,
        time,
    };
    Some(actor.shader_queue().apply(sprite.at(sx, sy), &frag))
}

fn read_px(frame: &Frame, idx: usize) -> Rgba {
    let o = idx * 4;
    Rgba::from_array([
        frame.data[o],
        frame.data[o + 1],
        frame.data[o + 2],
        frame.data[o + 3],
    ])
}

fn write_px(frame: &mut Frame, idx: usize, c: Rgba) {
    let o = idx * 4;
    frame.data[o..o + 4].copy_from_slice(&c.to_array());
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

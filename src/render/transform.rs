//! Coordinate transforms between screen, world and actor space.
//!
//! Screen space is integer pixels with row 0 at the bottom. World space is continuous with y up.
//! Actor space is world space translated to the actor's center and rotated into its frame. None of
//! these functions clamp or bounds-check.

use crate::foundation::core::{Affine, Extent, PixelCoord, Point, Vec2};
use crate::scene::actor::Actor;
use crate::scene::camera::Camera;

/// Affine taking screen-centered pixel offsets to world coordinates.
pub fn camera_affine(camera: &Camera) -> Affine {
    Affine::rotate(camera.rotation())
        * Affine::translate(camera.center())
        * Affine::scale(1.0 / camera.zoom())
}

/// Affine taking world coordinates into `actor`'s local frame.
pub fn actor_affine(actor: &Actor) -> Affine {
    Affine::rotate(-actor.rotation()) * Affine::translate(-actor.position())
}

/// Offset of `coord` from the screen midpoint. The midpoint uses integer halving.
pub(crate) fn centered(size: Extent, coord: PixelCoord) -> Point {
    let cx = i64::from(coord.x) - i64::from(size.width / 2);
    let cy = i64::from(coord.y) - i64::from(size.height / 2);
    Point::new(cx as f64, cy as f64)
}

/// World coordinate seen at screen pixel `coord`.
pub fn screen_to_world(camera: &Camera, screen_size: Extent, coord: PixelCoord) -> Point {
    camera_affine(camera) * centered(screen_size, coord)
}

/// `world` expressed in `actor`'s local frame.
pub fn world_to_actor(actor: &Actor, world: Point) -> Point {
    actor_affine(actor) * world
}

/// Inverse of [`world_to_actor`].
pub fn actor_to_world(actor: &Actor, local: Point) -> Point {
    Affine::translate(actor.position()) * Affine::rotate(actor.rotation()) * local
}

/// Composition of [`screen_to_world`] and [`world_to_actor`].
pub fn screen_to_actor(
    camera: &Camera,
    screen_size: Extent,
    coord: PixelCoord,
    actor: &Actor,
) -> Point {
    world_to_actor(actor, screen_to_world(camera, screen_size, coord))
}

/// Top-left-relative index into an actor of `size` for a local point, or `None` when the point
/// falls outside the actor.
pub(crate) fn actor_index(size: Extent, local: Point) -> Option<(u32, u32)> {
    let half = Vec2::new(f64::from(size.width / 2), f64::from(size.height / 2));
    let x = (local.x + half.x).floor();
    let y = (half.y - local.y).floor();
    if x < 0.0 || y < 0.0 || x >= f64::from(size.width) || y >= f64::from(size.height) {
        return None;
    }
    Some((x as u32, y as u32))
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;

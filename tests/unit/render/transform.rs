use std::sync::Arc;

use approx::assert_abs_diff_eq;

use super::*;
use crate::assets::sprite::Sprite;
use crate::foundation::color::Rgba;

fn actor(pos: Vec2, rot: f64) -> Actor {
    let sprite = Arc::new(Sprite::filled(Extent::new(4, 4), Rgba::WHITE));
    Actor::new(sprite).unwrap().at(pos).rotated(rot)
}

#[test]
fn screen_midpoint_maps_to_camera_center() {
    let mut cam = Camera::default();
    cam.set_center(Vec2::new(7.0, -2.0));
    let p = screen_to_world(&cam, Extent::new(10, 9), PixelCoord::new(5, 4));
    assert_abs_diff_eq!(p.x, 7.0);
    assert_abs_diff_eq!(p.y, -2.0);
}

#[test]
fn zoom_shrinks_world_distance() {
    let cam = Camera::new(Vec2::ZERO, 2.0, 0.0).unwrap();
    let p = screen_to_world(&cam, Extent::new(10, 10), PixelCoord::new(9, 1));
    assert_abs_diff_eq!(p.x, 2.0);
    assert_abs_diff_eq!(p.y, -2.0);
}

#[test]
fn camera_rotation_applies_after_centering() {
    let cam = Camera::new(Vec2::new(1.0, 0.0), 1.0, std::f64::consts::FRAC_PI_2).unwrap();
    let p = screen_to_world(&cam, Extent::new(2, 2), PixelCoord::new(1, 1));
    assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
}

#[test]
fn actor_transform_round_trips() {
    let a = actor(Vec2::new(3.0, 4.0), 0.7);
    let cam = Camera::default();
    let size = Extent::new(64, 48);

    for (x, y) in [(0u32, 0u32), (10, 40), (63, 47), (32, 24)] {
        let coord = PixelCoord::new(x, y);
        let local = screen_to_actor(&cam, size, coord, &a);
        let world = actor_to_world(&a, local);
        let expected = screen_to_world(&cam, size, coord);
        assert_abs_diff_eq!(world.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(world.y, expected.y, epsilon = 1e-9);
        assert_abs_diff_eq!(world.x, f64::from(x) - 32.0, epsilon = 1e-9);
    }
}

#[test]
fn actor_index_is_top_left_relative() {
    let size = Extent::new(4, 4);
    assert_eq!(actor_index(size, Point::new(-2.0, 2.5)), None);
    assert_eq!(actor_index(size, Point::new(-2.0, 2.0)), Some((0, 0)));
    assert_eq!(actor_index(size, Point::new(-2.0, 1.5)), Some((0, 0)));
    assert_eq!(actor_index(size, Point::new(1.9, -1.9)), Some((3, 3)));
    assert_eq!(actor_index(size, Point::new(2.0, 0.0)), None);
    assert_eq!(actor_index(size, Point::new(-2.1, 0.0)), None);
}

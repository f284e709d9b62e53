use super::*;
use crate::foundation::color::Rgba;

fn sprite(w: u32, h: u32) -> Arc<Sprite> {
    Arc::new(Sprite::filled(Extent::new(w, h), Rgba::WHITE))
}

#[test]
fn size_defaults_to_sprite_size() {
    let a = Actor::new(sprite(4, 3)).unwrap();
    assert_eq!(a.size(), Extent::new(4, 3));
    assert_eq!(a.position(), Vec2::ZERO);
    assert!(a.shader_queue().is_empty());
}

#[test]
fn empty_sprite_without_size_is_rejected() {
    let err = Actor::new(sprite(0, 5)).unwrap_err();
    assert!(err.to_string().contains("non-zero"));
}

#[test]
fn explicit_size_must_be_non_zero() {
    let a = Actor::new(sprite(2, 2)).unwrap();
    assert!(a.clone().with_size(Extent::new(3, 0)).is_err());
    assert_eq!(
        a.with_size(Extent::new(8, 1)).unwrap().size(),
        Extent::new(8, 1)
    );
}

#[test]
fn scaling_truncates_and_keeps_size_non_zero() {
    let mut a = Actor::new(sprite(10, 4)).unwrap();
    a.scale_xy(1.5, 0.5).unwrap();
    assert_eq!(a.size(), Extent::new(15, 2));
    assert!(a.scale(0.1).is_err());
    assert_eq!(a.size(), Extent::new(15, 2));
    a.scale(2.0).unwrap();
    assert_eq!(a.size(), Extent::new(30, 4));
}

#[test]
fn movement_accumulates() {
    let mut a = Actor::new(sprite(1, 1))
        .unwrap()
        .at(Vec2::new(5.0, 5.0))
        .rotated(1.0);
    a.translate(Vec2::new(-1.0, 2.0));
    a.rotate(0.5);
    assert_eq!(a.position(), Vec2::new(4.0, 7.0));
    assert_eq!(a.rotation(), 1.5);
}

#[test]
fn shader_queue_can_be_cleared() {
    let mut a = Actor::new(sprite(1, 1)).unwrap();
    a.queue_shader(Shader::new(crate::shader::library::Invert));
    a.queue_shader(Shader::new(crate::shader::library::Grayscale));
    assert_eq!(a.shader_queue().len(), 2);
    a.clear_shaders();
    assert!(a.shader_queue().is_empty());
}

use std::sync::Arc;

use super::*;
use crate::assets::sprite::Sprite;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::{Rgb, Rgba};
use crate::foundation::core::{FrameIndex, Vec2};
use crate::scene::actor::Actor;

fn scene(fps: u32, duration: f64) -> Scene {
    let mut s = Scene::new(fps, duration).unwrap();
    s.set_background_color(Rgb::new(0, 0, 40));
    let sprite = Arc::new(Sprite::filled(Extent::new(2, 2), Rgba::WHITE));
    s.add_actor(Actor::new(sprite).unwrap().at(Vec2::new(-4.0, 0.0)));
    s
}

fn push_right(s: &mut Scene, _t: f64, _dt: f64) {
    let keys: Vec<_> = s.actors().map(|(k, _)| k).collect();
    for k in keys {
        if let Some(a) = s.actor_mut(k) {
            a.translate(Vec2::new(1.0, 0.0));
        }
    }
}

#[test]
fn construction_validates_inputs() {
    assert!(Renderer::new(Extent::new(0, 4), Scene::still()).is_err());
    let opts = RenderOpts {
        threads: Some(0),
        ..RenderOpts::default()
    };
    assert!(Renderer::with_opts(Extent::new(4, 4), Scene::still(), opts).is_err());
}

#[test]
fn still_render_reads_live_scene() {
    let r = Renderer::new(Extent::new(8, 4), scene(1, 0.0)).unwrap();
    let f = r.render(0.0);
    assert_eq!((f.width, f.height), (8, 4));
    // Top-left lands on the actor at (-4, 0); top-right is bare background.
    assert_eq!(f.pixel(0), Some(Rgba::WHITE));
    assert_eq!(f.pixel(7), Some(Rgba::new(0, 0, 40, 255)));
}

#[test]
fn still_render_follows_scene_mutation() {
    let mut r = Renderer::new(Extent::new(8, 4), scene(1, 0.0)).unwrap();
    let key = r.scene().actors().next().unwrap().0;
    r.scene_mut().actor_mut(key).unwrap().set_position(Vec2::new(3.0, 0.0));
    let f = r.render(0.0);
    assert_eq!(f.pixel(0), Some(Rgba::new(0, 0, 40, 255)));
    assert_eq!(f.pixel(7), Some(Rgba::WHITE));
}

#[test]
fn frame_num_matches_bulk_render_and_leaves_scene_alone() {
    let mut r = Renderer::new(Extent::new(12, 4), scene(4, 1.0)).unwrap();
    r.bind_think(push_right);

    let single = r.render_frame_num(2).unwrap();
    assert_eq!(r.scene().actors().next().unwrap().1.position().x, -4.0);
    assert!(r.render_frame_num(4).is_err());

    let sink = InMemorySink::new(4);
    let stats = r.render_all_into(&sink).unwrap();
    assert_eq!(stats.frames_rendered, 4);
    assert_eq!(sink.frame(FrameIndex(2)), Some(&single));
    assert_eq!(r.scene().actors().next().unwrap().1.position().x, 0.0);
}

#[test]
fn unbound_think_keeps_frames_static() {
    let mut r = Renderer::new(Extent::new(6, 4), scene(2, 1.0)).unwrap();
    r.bind_think(push_right);
    r.unbind_think();
    let frames = {
        let sink = InMemorySink::new(2);
        r.render_all_into(&sink).unwrap();
        sink.into_frames().unwrap()
    };
    assert_eq!(frames[0], frames[1]);
}

#[test]
fn render_all_rejects_empty_timeline() {
    let mut r = Renderer::new(Extent::new(4, 4), Scene::still()).unwrap();
    let err = r.render_all().unwrap_err();
    assert!(err.to_string().contains("empty time sequence"));
}

#[test]
fn render_all_stages_every_frame() {
    let root = std::env::temp_dir().join(format!("sprite2d_pipeline_{}", std::process::id()));
    let mut r = Renderer::new(Extent::new(4, 4), scene(3, 1.0))
        .unwrap()
        .with_staging(StagingArea::new(&root));
    let movie = r.render_all().unwrap();
    assert_eq!(movie.frame_count(), 3);
    for i in 0..3 {
        assert!(movie.frame_path(FrameIndex(i)).is_file());
    }
    let dir = movie.staging_dir().to_path_buf();
    drop(movie);
    assert!(!dir.exists());
    std::fs::remove_dir(&root).unwrap();
}

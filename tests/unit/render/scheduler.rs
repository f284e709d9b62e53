use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use super::*;
use crate::assets::sprite::Sprite;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::Rgba;
use crate::foundation::core::Vec2;
use crate::scene::actor::Actor;

fn moving_scene(fps: u32, duration: f64) -> Scene {
    let mut s = Scene::new(fps, duration).unwrap();
    let sprite = Arc::new(Sprite::filled(Extent::new(2, 2), Rgba::WHITE));
    s.add_actor(Actor::new(sprite).unwrap().at(Vec2::new(-6.0, 0.0)));
    s
}

fn step_right(scene: &mut Scene, _t: f64, _dt: f64) {
    let keys: Vec<_> = scene.actors().map(|(k, _)| k).collect();
    for k in keys {
        if let Some(a) = scene.actor_mut(k) {
            a.translate(Vec2::new(1.0, 0.0));
        }
    }
}

#[test]
fn claims_hand_out_each_index_once() {
    let claims = FrameClaims::new(500);
    let seen = Mutex::new(Vec::new());
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let mut mine = Vec::new();
                while let Some(i) = claims.claim() {
                    mine.push(i.0);
                    claims.complete();
                }
                seen.lock().unwrap().extend(mine);
            });
        }
    });
    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 500);
    let unique: BTreeSet<u64> = seen.into_iter().collect();
    assert_eq!(unique.len(), 500);
    assert_eq!(claims.completed(), 500);
    assert!(claims.claim().is_none());
}

#[test]
fn aborted_claims_stop() {
    let claims = FrameClaims::new(10);
    assert_eq!(claims.claim(), Some(FrameIndex(0)));
    claims.abort();
    assert!(claims.is_aborted());
    assert_eq!(claims.claim(), None);
}

#[test]
fn simulate_captures_initial_state_and_every_tick() {
    let mut scene = moving_scene(4, 1.0);
    let times = scene.time_sequence();
    let mut seen_times = Vec::new();
    let mut think = |s: &mut Scene, t: f64, dt: f64| {
        seen_times.push((t, dt));
        step_right(s, t, dt);
    };
    let snaps = simulate(&mut scene, &times, &mut think);

    assert_eq!(snaps.len(), 5);
    let xs: Vec<f64> = snaps.iter().map(|s| s.actors()[0].position().x).collect();
    assert_eq!(xs, vec![-6.0, -5.0, -4.0, -3.0, -2.0]);
    assert_eq!(
        seen_times,
        vec![(0.0, 0.25), (0.25, 0.25), (0.5, 0.25), (0.75, 0.25)]
    );
    let (_, live) = scene.actors().next().unwrap();
    assert_eq!(live.position().x, -2.0);
}

#[test]
fn frames_render_from_snapshot_before_tick() {
    let mut scene = moving_scene(2, 2.0);
    let times = scene.time_sequence();
    let snaps = simulate(&mut scene, &times, &mut step_right);
    let sink = InMemorySink::new(times.len() as u64);
    let res = Extent::new(16, 4);

    let stats = render_frames(&snaps, &times, res, &RenderOpts::default(), &sink).unwrap();
    assert_eq!(stats.frames_total, 4);
    assert_eq!(stats.frames_rendered, 4);

    for (i, snap) in snaps.iter().take(times.len()).enumerate() {
        let expected = composite(snap, res, times[i], BlendMode::Replace);
        assert_eq!(sink.frame(FrameIndex(i as u64)), Some(&expected));
    }
    assert_ne!(sink.frame(FrameIndex(0)), sink.frame(FrameIndex(3)));
}

#[test]
fn empty_time_sequence_is_rejected() {
    let mut scene = Scene::still();
    let snaps = simulate(&mut scene, &[], &mut |_: &mut Scene, _: f64, _: f64| {});
    let sink = InMemorySink::new(0);
    let err = render_frames(&snaps, &[], Extent::new(2, 2), &RenderOpts::default(), &sink)
        .unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
    assert!(err.to_string().contains("empty time sequence"));
}

#[test]
fn sink_errors_surface_instead_of_exiting() {
    let mut scene = moving_scene(10, 1.0);
    let times = scene.time_sequence();
    let snaps = simulate(&mut scene, &times, &mut step_right);
    let short = InMemorySink::new(3);
    let opts = RenderOpts {
        threads: Some(2),
        ..RenderOpts::default()
    };

    let err = render_frames(&snaps, &times, Extent::new(4, 4), &opts, &short).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn zero_threads_are_rejected() {
    let opts = RenderOpts {
        threads: Some(0),
        ..RenderOpts::default()
    };
    assert!(opts.validate().is_err());
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(3)).unwrap().current_num_threads(), 3);
}

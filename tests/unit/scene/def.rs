use std::path::Path;

use approx::assert_abs_diff_eq;

use super::*;
use crate::foundation::color::{Rgb, Rgba};

const SCENE: &str = r##"{
    "fps": 4,
    "duration": 1.0,
    "background": { "color": "#102030" },
    "camera": { "zoom": 2.0, "velocity": [1.0, 0.0] },
    "actors": [
        {
            "sprite": { "kind": "solid", "width": 2, "height": 3, "color": [255, 0, 0, 128] },
            "position": [5.0, -1.0],
            "rotation_deg": 90,
            "velocity": [4.0, 8.0],
            "spin_deg": 180,
            "shaders": [{ "kind": "invert" }]
        },
        {
            "sprite": { "kind": "solid", "width": 1, "height": 1, "color": "#00ff00" },
            "size": [10, 20]
        }
    ],
    "shaders": [{ "kind": "grayscale" }]
}"##;

#[test]
fn builds_scene_from_json() {
    let def = SceneDef::from_json_str(SCENE).unwrap();
    let (scene, script) = def.build(Path::new(".")).unwrap();

    assert_eq!(scene.frame_count(), 4);
    assert_eq!(scene.background_color(), Rgb::new(0x10, 0x20, 0x30));
    assert_eq!(scene.camera().zoom(), 2.0);
    assert_eq!(scene.shader_queue().len(), 1);

    let actors: Vec<_> = scene.actors().map(|(_, a)| a.clone()).collect();
    assert_eq!(actors.len(), 2);
    assert_eq!(actors[0].size(), Extent::new(2, 3));
    assert_eq!(actors[0].sprite().pixel(0, 0), Some(Rgba::new(255, 0, 0, 128)));
    assert_abs_diff_eq!(actors[0].rotation(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_eq!(actors[0].shader_queue().len(), 1);
    assert_eq!(actors[1].size(), Extent::new(10, 20));
    assert!(!script.is_still());
}

#[test]
fn motion_script_integrates_per_tick() {
    let def = SceneDef::from_json_str(SCENE).unwrap();
    let (mut scene, script) = def.build(Path::new(".")).unwrap();
    let dt = scene.dt();
    script.think(&mut scene, 0.0, dt);
    script.think(&mut scene, dt, dt);

    let (_, first) = scene.actors().next().unwrap();
    assert_abs_diff_eq!(first.position().x, 7.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first.position().y, 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first.rotation(), std::f64::consts::PI, epsilon = 1e-12);
    assert_abs_diff_eq!(scene.camera().center().x, 0.5, epsilon = 1e-12);
}

#[test]
fn defaults_fill_missing_fields() {
    let def = SceneDef::from_json_str("{}").unwrap();
    assert_eq!(def.fps, 30);
    let (scene, script) = def.build(Path::new(".")).unwrap();
    assert_eq!(scene.frame_count(), 0);
    assert_eq!(scene.actor_count(), 0);
    assert_eq!(*scene.camera(), Camera::default());
    assert!(script.is_still());
}

#[test]
fn invalid_scenes_fail_with_context() {
    let err = SceneDef::from_json_str(r#"{"fps": "fast"}"#).unwrap_err();
    assert!(matches!(err, RenderError::Serde(_)));

    let def = SceneDef::from_json_str(
        r#"{"actors": [{"sprite": {"kind": "solid", "width": 0, "height": 1, "color": [0,0,0]}}]}"#,
    )
    .unwrap();
    let err = def.build(Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("actor #0"));

    let def = SceneDef::from_json_str(r#"{"camera": {"zoom": 0}}"#).unwrap();
    assert!(def.build(Path::new(".")).is_err());
}

use super::*;
use crate::foundation::color::Rgba;

fn staging(tag: &str) -> StagingArea {
    StagingArea::new(std::env::temp_dir().join(format!(
        "sprite2d_movie_test_{tag}_{}",
        std::process::id()
    )))
}

#[test]
fn staged_frames_land_as_bmp_and_are_removed_on_drop() {
    let area = staging("drop");
    let movie = Movie::new(&area, 24, 2, Extent::new(3, 2)).unwrap();
    let dir = movie.staging_dir().to_path_buf();
    assert!(dir.is_dir());

    let frame = Frame::filled(3, 2, Rgba::new(200, 100, 50, 255));
    movie.write_frame(&frame, FrameIndex(1)).unwrap();
    let staged = movie.frame_path(FrameIndex(1));
    assert_eq!(staged, dir.join("1.bmp"));
    let img = image::open(&staged).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50]);

    drop(movie);
    assert!(!dir.exists());
    assert!(area.root().is_dir());
    std::fs::remove_dir(area.root()).unwrap();
}

#[test]
fn caller_root_survives_and_temp_root_is_reclaimed() {
    let area = staging("keep");
    std::fs::create_dir_all(area.root()).unwrap();
    drop(Movie::new(&area, 24, 1, Extent::new(1, 1)).unwrap());
    assert!(area.root().is_dir());
    std::fs::remove_dir(area.root()).unwrap();

    let temp = StagingArea::in_temp_dir();
    let a = Movie::new(&temp, 24, 1, Extent::new(1, 1)).unwrap();
    let b = Movie::new(&temp, 24, 1, Extent::new(1, 1)).unwrap();
    drop(a);
    assert!(temp.root().is_dir());
    drop(b);
    assert!(!temp.root().exists());
}

#[test]
fn out_of_range_and_mismatched_frames_are_rejected() {
    let area = staging("range");
    let movie = Movie::new(&area, 10, 2, Extent::new(2, 2)).unwrap();
    let frame = Frame::filled(2, 2, Rgba::BLACK);
    let err = movie.write_frame(&frame, FrameIndex(2)).unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
    assert!(
        movie
            .write_frame(&Frame::filled(3, 2, Rgba::BLACK), FrameIndex(0))
            .is_err()
    );
}

#[test]
fn staging_directories_are_distinct_per_movie() {
    let area = staging("distinct");
    let a = Movie::new(&area, 1, 1, Extent::new(1, 1)).unwrap();
    let b = Movie::new(&area, 1, 1, Extent::new(1, 1)).unwrap();
    assert_ne!(a.staging_dir(), b.staging_dir());
    assert!(a.staging_dir().starts_with(area.root()));
}

#[test]
fn metadata_reflects_construction() {
    let area = staging("meta");
    let m = Movie::new(&area, 4, 10, Extent::new(8, 6)).unwrap();
    assert_eq!(m.fps(), 4);
    assert_eq!(m.frame_count(), 10);
    assert_eq!((m.width(), m.height()), (8, 6));
    assert_eq!(m.duration(), 2.5);
    assert!(Movie::new(&area, 0, 1, Extent::new(1, 1)).is_err());
}

#[test]
fn ffmpeg_arguments_follow_the_fixed_template() {
    let area = staging("args");
    let m = Movie::new(&area, 30, 1, Extent::new(2, 2)).unwrap();
    let out = Movie::output_path(Path::new("clips/run"));
    assert_eq!(out, PathBuf::from("clips/run.mp4"));
    assert_eq!(Movie::output_path(Path::new("a.mp4")), PathBuf::from("a.mp4"));

    let args: Vec<String> = m
        .ffmpeg_args(&out)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let pattern = m.staging_dir().join("%d.bmp").to_string_lossy().into_owned();
    assert_eq!(
        args,
        vec![
            "-y", "-v", "-8", "-framerate", "30", "-f", "image2", "-i", pattern.as_str(), "-c", "h264",
            "-pix_fmt", "yuv420p", "-b:v", "32768k", "clips/run.mp4",
        ]
    );
}

#[test]
fn missing_encoder_is_an_outcome_not_an_error() {
    let area = staging("noenc");
    let m = Movie::new(&area, 1, 1, Extent::new(2, 2))
        .unwrap()
        .with_encode_opts(EncodeOpts {
            ffmpeg: PathBuf::from("definitely-not-an-encoder-binary"),
            ..EncodeOpts::default()
        });
    let out = area.root().join("out");
    match m.output(&out) {
        EncodeOutcome::Failed(msg) => assert!(msg.contains("failed to spawn")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, check_index};
use crate::foundation::core::{Extent, FrameIndex};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::frame::Frame;

/// ffmpeg invocation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    /// ffmpeg executable, looked up on `PATH` when relative.
    pub ffmpeg: PathBuf,
    pub codec: String,
    pub pix_fmt: String,
    pub bitrate: String,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            codec: "h264".to_string(),
            pix_fmt: "yuv420p".to_string(),
            bitrate: "32768k".to_string(),
        }
    }
}

/// Result of handing a staged movie to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The encoder exited successfully and wrote this file.
    Encoded(PathBuf),
    /// The encoder could not be started or exited with an error.
    Failed(String),
}

impl EncodeOutcome {
    pub fn is_encoded(&self) -> bool {
        matches!(self, Self::Encoded(_))
    }
}

/// Allocates per-movie staging directories under one root.
#[derive(Debug)]
pub struct StagingArea {
    root: PathBuf,
    next: AtomicU64,
    owns_root: bool,
}

impl StagingArea {
    /// Stage under a caller-provided root. The root itself is never removed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next: AtomicU64::new(0),
            owns_root: false,
        }
    }

    /// A fresh root in the system temp directory, unique to this process and instant.
    ///
    /// The root is removed once the last movie staged under it is dropped.
    pub fn in_temp_dir() -> Self {
        Self {
            owns_root: true,
            ..Self::new(std::env::temp_dir().join(format!(
                "sprite2d_staging_{}_{}",
                std::process::id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or(0)
            )))
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the next `movie<N>` directory. An existing directory is an error.
    fn allocate(&self) -> RenderResult<PathBuf> {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        let dir = self.root.join(format!("movie{id}"));
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("failed to create staging root '{}'", self.root.display())
        })?;
        std::fs::create_dir(&dir)
            .with_context(|| format!("failed to create staging directory '{}'", dir.display()))?;
        Ok(dir)
    }
}

/// A fixed-length frame sequence staged on disk as `<dir>/<index>.bmp`.
///
/// The staging directory is removed when the movie is dropped.
#[derive(Debug)]
pub struct Movie {
    dir: PathBuf,
    owned_root: Option<PathBuf>,
    fps: u32,
    frame_count: u64,
    size: Extent,
    encode: EncodeOpts,
}

impl Movie {
    pub fn new(
        staging: &StagingArea,
        fps: u32,
        frame_count: u64,
        size: Extent,
    ) -> RenderResult<Self> {
        if fps == 0 {
            return Err(RenderError::validation("movie fps must be non-zero"));
        }
        Extent::non_zero(size.width, size.height)?;
        let dir = staging.allocate()?;
        tracing::debug!(dir = %dir.display(), frame_count, "staging movie");
        Ok(Self {
            dir,
            owned_root: staging.owns_root.then(|| staging.root().to_path_buf()),
            fps,
            frame_count,
            size,
            encode: EncodeOpts::default(),
        })
    }

    /// Replace the encoder settings.
    pub fn with_encode_opts(mut self, encode: EncodeOpts) -> Self {
        self.encode = encode;
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_count as f64 / f64::from(self.fps)
    }

    pub fn staging_dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the staged image for `index`.
    pub fn frame_path(&self, index: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}.bmp", index.0))
    }

    /// Stage `frame` as the image for `index`.
    pub fn write_frame(&self, frame: &Frame, index: FrameIndex) -> RenderResult<()> {
        check_index(index, self.frame_count)?;
        if frame.width != self.size.width || frame.height != self.size.height {
            return Err(RenderError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.size.width, self.size.height
            )));
        }
        let path = self.frame_path(index);
        image::save_buffer_with_format(
            &path,
            &frame.to_rgb8(),
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
            image::ImageFormat::Bmp,
        )
        .map_err(|e| RenderError::encode(format!("stage '{}': {e}", path.display())))
    }

    /// Final output path: `.mp4` is appended unless `path` already ends in it.
    pub fn output_path(path: &Path) -> PathBuf {
        if path.extension().is_some_and(|e| e == "mp4") {
            return path.to_path_buf();
        }
        let mut s = path.as_os_str().to_os_string();
        s.push(".mp4");
        PathBuf::from(s)
    }

    /// Arguments passed to ffmpeg to encode into `out`.
    pub fn ffmpeg_args(&self, out: &Path) -> Vec<OsString> {
        let fps = self.fps.to_string();
        let mut args: Vec<OsString> = ["-y", "-v", "-8", "-framerate", fps.as_str(), "-f", "image2"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push("-i".into());
        args.push(self.dir.join("%d.bmp").into_os_string());
        for a in [
            "-c",
            self.encode.codec.as_str(),
            "-pix_fmt",
            self.encode.pix_fmt.as_str(),
            "-b:v",
            self.encode.bitrate.as_str(),
        ] {
            args.push(a.into());
        }
        args.push(out.as_os_str().to_os_string());
        args
    }

    /// Encode the staged frames with ffmpeg.
    ///
    /// Encoder failures are logged and reported as [`EncodeOutcome::Failed`]; they are not errors.
    #[tracing::instrument(skip(self, path), fields(frames = self.frame_count))]
    pub fn output(&self, path: impl AsRef<Path>) -> EncodeOutcome {
        let out = Self::output_path(path.as_ref());
        if let Err(e) = ensure_parent_dir(&out) {
            tracing::error!(error = %e, "Error outputting file!");
            return EncodeOutcome::Failed(e.to_string());
        }

        let status = Command::new(&self.encode.ffmpeg)
            .args(self.ffmpeg_args(&out))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => {
                tracing::info!(out = %out.display(), "encoded movie");
                EncodeOutcome::Encoded(out)
            }
            Ok(s) => {
                let msg = format!("ffmpeg exited with status {s}");
                tracing::error!(error = %msg, "Error outputting file!");
                EncodeOutcome::Failed(msg)
            }
            Err(e) => {
                let msg = format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.encode.ffmpeg.display()
                );
                tracing::error!(error = %msg, "Error outputting file!");
                EncodeOutcome::Failed(msg)
            }
        }
    }
}

impl FrameSink for Movie {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn write_frame(&self, index: FrameIndex, frame: &Frame) -> RenderResult<()> {
        Movie::write_frame(self, frame, index)
    }
}

impl Drop for Movie {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
        // Only succeeds once the last movie under this root is gone.
        if let Some(root) = &self.owned_root {
            let _ = std::fs::remove_dir(root);
        }
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/movie.rs"]
mod tests;

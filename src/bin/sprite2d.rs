use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sprite2d", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Timeline frame to render (0-based). Runs the scene's motion up to that frame.
    #[arg(long, conflicts_with = "time")]
    frame: Option<u64>,

    /// Render the initial scene state at this time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path (`.mp4` is appended when missing).
    #[arg(long)]
    out: PathBuf,

    /// Worker threads (defaults to available parallelism).
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// How actor pixels combine with what is beneath them.
    #[arg(long, value_enum, default_value_t = BlendChoice::Replace)]
    blend: BlendChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendChoice {
    Replace,
    SourceOver,
}

impl From<BlendChoice> for sprite2d::BlendMode {
    fn from(c: BlendChoice) -> Self {
        match c {
            BlendChoice::Replace => Self::Replace,
            BlendChoice::SourceOver => Self::SourceOver,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_renderer(
    in_path: &Path,
    output: &OutputArgs,
    threads: Option<usize>,
) -> anyhow::Result<sprite2d::Renderer> {
    let def = sprite2d::SceneDef::load(in_path)?;
    let root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let (scene, script) = def
        .build(root)
        .with_context(|| format!("build scene '{}'", in_path.display()))?;

    let opts = sprite2d::RenderOpts {
        threads,
        blend: output.blend.into(),
        ..sprite2d::RenderOpts::default()
    };
    let resolution = sprite2d::Extent::new(output.width, output.height);
    let mut renderer = sprite2d::Renderer::with_opts(resolution, scene, opts)?;
    if !script.is_still() {
        renderer.bind_think(move |scene, time, dt| script.think(scene, time, dt));
    }
    Ok(renderer)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = load_renderer(&args.in_path, &args.output, None)?;
    let frame = match args.frame {
        Some(n) => renderer.render_frame_num(n)?,
        None => renderer.render(args.time),
    };
    let written = frame.output(&args.out)?;
    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !sprite2d::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for MP4 rendering, but was not found on PATH");
    }

    let mut renderer = load_renderer(&args.in_path, &args.output, args.threads)?;
    let movie = renderer.render_all()?;
    match movie.output(&args.out) {
        sprite2d::EncodeOutcome::Encoded(path) => {
            eprintln!("wrote {}", path.display());
            Ok(())
        }
        sprite2d::EncodeOutcome::Failed(msg) => anyhow::bail!("encoding failed: {msg}"),
    }
}

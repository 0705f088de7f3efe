use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spriteloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Assemble every valid frame into an animated GIF.
    Export(ExportArgs),
    /// Re-pack every valid frame into a PNG sheet.
    Sheet(SheetArgs),
    /// Print the frame that is active at a given time.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input sprite sheet image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sheet project JSON (grid + offsets + exclusions).
    #[arg(long)]
    project: Option<PathBuf>,

    /// Override grid rows (resets total frames to rows * cols).
    #[arg(long)]
    rows: Option<u32>,

    /// Override grid columns (resets total frames to rows * cols).
    #[arg(long)]
    cols: Option<u32>,

    /// Override playback rate.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Skip keying and scaling; write the composited cell as-is.
    #[arg(long)]
    raw: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// GIF quantization speed (1 = best, 30 = fastest).
    #[arg(long, default_value_t = 10)]
    speed: i32,
}

#[derive(Args, Debug)]
struct SheetArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Elapsed playback time in milliseconds.
    #[arg(long)]
    at_ms: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Sheet(args) => cmd_sheet(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn load_group(args: &SourceArgs) -> anyhow::Result<spriteloop::Group> {
    let source = spriteloop::SourceImage::open(&args.in_path)?;
    let mut group = spriteloop::Group::new(spriteloop::GroupId(0), Arc::new(source));

    if let Some(path) = &args.project {
        spriteloop::SheetProject::load(path)?.apply_to(&mut group);
    }
    if args.rows.is_some() || args.cols.is_some() {
        let rows = args.rows.unwrap_or(group.config().rows());
        let cols = args.cols.unwrap_or(group.config().cols());
        group.set_grid(rows, cols, spriteloop::OverlayPolicy::Keep)?;
    }
    if let Some(fps) = args.fps {
        group.set_fps(fps)?;
    }
    Ok(group)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let group = load_group(&args.source)?;
    let frame = if args.raw {
        spriteloop::composite(group.source(), group.config(), group.edits(), args.frame)?
    } else {
        let mut frame = spriteloop::render_export_frame(&group, args.frame)?;
        if group.config().transparency().is_keyed() {
            spriteloop::key_to_alpha(&mut frame);
        }
        frame
    };
    write_output(&args.out, &frame.to_png()?)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let group = load_group(&args.source)?;
    let mut codec = spriteloop::GifCodec::with_speed(args.speed);
    let mut last = None;
    let anim = spriteloop::assemble(&group, &mut codec, &mut |p| {
        if last != Some(p) {
            tracing::info!(progress = p, "encoding");
            last = Some(p);
        }
    })?;
    write_output(&args.out, &anim.bytes)?;
    eprintln!(
        "{} frames at {}x{}, {} ms per frame",
        anim.frames.len(),
        anim.width,
        anim.height,
        anim.delay_ms
    );
    Ok(())
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let group = load_group(&args.source)?;
    let sheet = spriteloop::export_sheet(&group)?;
    write_output(&args.out, &sheet.png)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let group = load_group(&args.source)?;
    let clock = spriteloop::PlaybackClock::new(group.config().fps());
    match clock.active_frame(args.at_ms, &group.valid_frames()) {
        Some(index) => println!("{index}"),
        None => println!("none"),
    }
    Ok(())
}

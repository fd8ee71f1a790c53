use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyreel::{
    CompileOpts, FfmpegRenderOpts, FrameIndex, LayoutContext, Preview, ReelConfig, RenderManifest,
    Script, SubtitleMode, build_manifest, compile::subtitles::write_srt, compile_manifest,
    render_program, script::edits_from_reader,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    /// Render configuration JSON (defaults apply to missing fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a render manifest from a script.
    Manifest(ManifestArgs),
    /// Print the ffmpeg filter program for a manifest.
    Program(ProgramArgs),
    /// Evaluate one frame of a manifest and print it as JSON.
    Preview(PreviewArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Editor segments JSON array (one entry per sentence).
    #[arg(long)]
    edits: Option<PathBuf>,

    /// Output manifest path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Skip font loading and use character-count metrics.
    #[arg(long, default_value_t = false)]
    no_font_metrics: bool,
}

#[derive(Parser, Debug)]
struct ProgramArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Write captions to this SRT file and burn it instead of per-chunk drawtext.
    #[arg(long)]
    srt: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of overwriting an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Write captions to this SRT file and burn it instead of per-chunk drawtext.
    #[arg(long)]
    srt: Option<PathBuf>,

    /// libx264 constant rate factor.
    #[arg(long, default_value_t = 23)]
    crf: u8,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => ReelConfig::from_path(path)?,
        None => ReelConfig::default(),
    };
    match cli.cmd {
        Command::Manifest(args) => cmd_manifest(args, &cfg),
        Command::Program(args) => cmd_program(args, &cfg),
        Command::Preview(args) => cmd_preview(args),
        Command::Render(args) => cmd_render(args, &cfg),
    }
}

fn cmd_manifest(args: ManifestArgs, cfg: &ReelConfig) -> anyhow::Result<()> {
    let script = Script::from_path(&args.script)?;
    let edits = match &args.edits {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open editor segments '{}'", path.display()))?;
            edits_from_reader(BufReader::new(f))?
        }
        None => Vec::new(),
    };

    let mut ctx = if args.no_font_metrics {
        LayoutContext::without_metrics(cfg.fallback_char_width_ratio)
    } else {
        LayoutContext::from_font_files(
            &[&cfg.title.font_path, &cfg.caption.font_path],
            cfg.fallback_char_width_ratio,
        )
    };
    let manifest = build_manifest(&script, &edits, cfg, &mut ctx)?;
    let json = manifest.to_json()?;

    match &args.out {
        Some(out) => {
            ensure_parent(out)?;
            std::fs::write(out, json.as_bytes())
                .with_context(|| format!("write manifest '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write manifest to stdout")?;
        }
    }
    Ok(())
}

fn cmd_program(args: ProgramArgs, cfg: &ReelConfig) -> anyhow::Result<()> {
    let manifest = RenderManifest::from_path(&args.manifest)?;
    let opts = compile_opts(&manifest, cfg, args.srt.as_deref())?;
    let program = compile_manifest(&manifest, &opts)?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", program.to_script()).context("write program to stdout")?;
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let manifest = RenderManifest::from_path(&args.manifest)?;
    let preview = Preview::new(&manifest)?;
    let frame = preview.frame(FrameIndex(args.frame))?;

    let json = serde_json::to_string_pretty(&frame).context("serialize preview frame")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("write preview to stdout")?;
    Ok(())
}

fn cmd_render(args: RenderArgs, cfg: &ReelConfig) -> anyhow::Result<()> {
    let manifest = RenderManifest::from_path(&args.manifest)?;
    let opts = compile_opts(&manifest, cfg, args.srt.as_deref())?;
    let program = compile_manifest(&manifest, &opts)?;

    let mut ff = FfmpegRenderOpts::new(&args.out);
    ff.overwrite = !args.no_overwrite;
    ff.crf = args.crf;
    render_program(&program, &ff)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn compile_opts(
    manifest: &RenderManifest,
    cfg: &ReelConfig,
    srt: Option<&Path>,
) -> anyhow::Result<CompileOpts> {
    let mut opts = CompileOpts::from_config(cfg);
    if let Some(path) = srt {
        ensure_parent(path)?;
        write_srt(manifest, path)?;
        opts.subtitles = SubtitleMode::Track {
            path: path.to_string_lossy().into_owned(),
        };
    }
    Ok(opts)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

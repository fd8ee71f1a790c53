use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::compile::program::{FilterProgram, num};
use crate::foundation::error::{ReelError, ReelResult};

/// Options for rendering a [`FilterProgram`] to MP4.
#[derive(Clone, Debug)]
pub struct FfmpegRenderOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// libx264 constant rate factor.
    pub crf: u8,
    /// AAC bitrate, e.g. `192k`.
    pub audio_bitrate: String,
}

impl FfmpegRenderOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            crf: 23,
            audio_bitrate: "192k".to_string(),
        }
    }
}

/// Full `ffmpeg` argument vector (without the program name).
pub fn build_ffmpeg_args(program: &FilterProgram, opts: &FfmpegRenderOpts) -> Vec<String> {
    let mut args = vec![
        if opts.overwrite { "-y" } else { "-n" }.to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ];

    for input in &program.inputs {
        args.extend(input.options.iter().cloned());
        args.push("-i".to_string());
        args.push(input.path.clone());
    }

    args.push("-filter_complex".to_string());
    args.push(program.filter_complex());

    args.extend([
        "-map".to_string(),
        format!("[{}]", program.outputs.video),
        "-map".to_string(),
        format!("[{}]", program.outputs.audio),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-crf".to_string(),
        opts.crf.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-r".to_string(),
        program.fps.to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        opts.audio_bitrate.clone(),
        "-t".to_string(),
        num(program.duration_secs),
        "-movflags".to_string(),
        "+faststart".to_string(),
    ]);
    args.push(opts.out_path.to_string_lossy().into_owned());
    args
}

/// Run the system `ffmpeg` on a compiled program.
#[tracing::instrument(skip_all, fields(out = %opts.out_path.display()))]
pub fn render_program(program: &FilterProgram, opts: &FfmpegRenderOpts) -> ReelResult<()> {
    ensure_parent_dir(&opts.out_path)?;
    if !opts.overwrite && opts.out_path.exists() {
        return Err(ReelError::validation(format!(
            "output file '{}' already exists",
            opts.out_path.display()
        )));
    }
    if !is_ffmpeg_on_path() {
        return Err(ReelError::encode(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let args = build_ffmpeg_args(program, opts);
    tracing::debug!(inputs = program.inputs.len(), "spawning ffmpeg");
    let output = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            ReelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReelError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;

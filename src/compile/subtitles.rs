use std::{fmt::Write as _, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
    manifest::model::{Element, RenderManifest},
};

/// Render the manifest's caption chunks as an SRT track.
///
/// Cues are numbered from 1 in element order; blank or zero-length chunks are left out. Wrapped
/// lines are kept as separate cue lines.
pub fn to_srt(manifest: &RenderManifest) -> ReelResult<String> {
    let fps = Fps::new(manifest.metadata.fps)?;
    let mut out = String::new();
    let mut cue = 0usize;
    for el in &manifest.elements {
        let Element::SubtitleChunk(chunk) = el else {
            continue;
        };
        if chunk.text.trim().is_empty() || chunk.start_frame == chunk.end_frame {
            continue;
        }
        cue += 1;
        let start = format_srt_time(fps.frames_to_millis(chunk.start_frame));
        let end = format_srt_time(fps.frames_to_millis(chunk.end_frame));
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{cue}\n{start} --> {end}");
        if chunk.lines.is_empty() {
            let _ = writeln!(out, "{}", chunk.text);
        } else {
            for line in &chunk.lines {
                let _ = writeln!(out, "{line}");
            }
        }
        out.push('\n');
    }
    Ok(out)
}

/// Write [`to_srt`] output to `path`.
pub fn write_srt(manifest: &RenderManifest, path: &Path) -> ReelResult<()> {
    let srt = to_srt(manifest)?;
    std::fs::write(path, srt)
        .with_context(|| format!("write subtitle track '{}'", path.display()))
        .map_err(ReelError::from)
}

/// `HH:MM:SS,mmm`.
pub fn format_srt_time(total_ms: u64) -> String {
    let ms = total_ms % 1000;
    let total_sec = total_ms / 1000;
    let s = total_sec % 60;
    let total_min = total_sec / 60;
    let m = total_min % 60;
    let h = total_min / 60;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
#[path = "../../tests/unit/compile/subtitles.rs"]
mod tests;

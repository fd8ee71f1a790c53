use crate::{
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{ReelError, ReelResult},
    script::Sentence,
};

/// Resolved frame placement of one sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SentenceTiming {
    /// Full sentence slot including the lead-in delay.
    pub range: FrameRange,
    /// Portion of the slot where the narration plays.
    pub narration: FrameRange,
}

/// Contiguous per-sentence frame ranges plus the grand total.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Timeline {
    /// One entry per sentence, in order.
    pub sentences: Vec<SentenceTiming>,
    /// Last sentence end frame (0 for an empty timeline).
    pub total_frames: u64,
}

/// Lay sentences back to back at `fps`.
///
/// Sentence `i` lasts `floor(((duration_i or default_secs) + delay_i) * fps)` frames. The narration
/// begins `floor(delay_i * fps)` frames into the slot.
pub fn compute_timeline(
    sentences: &[Sentence],
    delays: &[f64],
    fps: Fps,
    default_secs: f64,
) -> ReelResult<Timeline> {
    if sentences.len() != delays.len() {
        return Err(ReelError::invariant(format!(
            "timing needs one delay per sentence ({} sentences, {} delays)",
            sentences.len(),
            delays.len()
        )));
    }

    let mut out = Vec::with_capacity(sentences.len());
    let mut cursor = 0u64;
    for (idx, (sentence, &delay)) in sentences.iter().zip(delays).enumerate() {
        let spoken = sentence.duration.unwrap_or(default_secs);
        if !spoken.is_finite() || spoken < 0.0 {
            return Err(ReelError::invariant(format!(
                "sentence {idx} duration must be finite and >= 0 (got {spoken})"
            )));
        }
        if !delay.is_finite() || delay < 0.0 {
            return Err(ReelError::invariant(format!(
                "sentence {idx} delay must be finite and >= 0 (got {delay})"
            )));
        }

        let frames = fps.secs_to_frames_floor(spoken + delay);
        let start = cursor;
        let end = start + frames;
        let lead_in = fps.secs_to_frames_floor(delay).min(frames);

        out.push(SentenceTiming {
            range: FrameRange::new(FrameIndex(start), FrameIndex(end))?,
            narration: FrameRange::new(FrameIndex(start + lead_in), FrameIndex(end))?,
        });
        cursor = end;
    }

    Ok(Timeline {
        sentences: out,
        total_frames: cursor,
    })
}

#[cfg(test)]
#[path = "../tests/unit/timing/timing.rs"]
mod tests;

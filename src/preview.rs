//! In-memory manifest interpreter for live preview.
//!
//! Evaluates what is visible and audible at a single frame using the same motion curve the
//! compiled filter program encodes, so a preview and an offline render agree frame for frame.

use crate::{
    foundation::core::{Affine, Fps, FrameIndex, Vec2},
    foundation::error::{ReelError, ReelResult},
    manifest::model::{AudioRole, Element, RenderManifest},
    motion::MotionSample,
};

/// Everything drawn or played at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewFrame {
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Active background image, if any.
    pub image: Option<PreviewImage>,
    /// Title runs in draw order.
    pub title: Vec<PreviewText>,
    /// Active caption chunks.
    pub captions: Vec<PreviewCaption>,
    /// Audio clips playing at this frame.
    pub audio: Vec<PreviewAudio>,
}

/// Image draw with its resolved Ken-Burns state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewImage {
    /// Source element id.
    pub element_id: String,
    /// Image path.
    pub src: String,
    /// Frame offset inside the element.
    pub local_frame: u64,
    /// Interpolated scale and offset.
    pub motion: MotionSample,
    /// Transform applied to the cover-fitted image: scale about the canvas center, then offset.
    pub transform: Affine,
}

/// One positioned title run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewText {
    /// Run text.
    pub text: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Line top in canvas pixels.
    pub y: f64,
    /// Drawn in the highlight color.
    pub highlight: bool,
    /// Fill color as `#rrggbbaa`, when the manifest carries one.
    pub color: Option<String>,
}

/// One visible caption chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewCaption {
    /// Source element id.
    pub element_id: String,
    /// Lines to draw, centered horizontally.
    pub lines: Vec<String>,
    /// Top of the first line.
    pub y: Option<f64>,
    /// Fill color as `#rrggbbaa`, when the manifest carries one.
    pub color: Option<String>,
}

/// One playing audio clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreviewAudio {
    /// Source element id.
    pub element_id: String,
    /// Audio path.
    pub src: String,
    /// Clip role.
    pub role: AudioRole,
    /// Playback position inside the clip in seconds.
    pub offset_secs: f64,
    /// Linear gain.
    pub volume: f64,
}

/// Frame evaluator over a validated manifest.
pub struct Preview<'a> {
    manifest: &'a RenderManifest,
    fps: Fps,
}

impl<'a> Preview<'a> {
    /// Validate `manifest` and wrap it for evaluation.
    pub fn new(manifest: &'a RenderManifest) -> ReelResult<Self> {
        manifest.validate()?;
        Ok(Self {
            manifest,
            fps: Fps::new(manifest.metadata.fps)?,
        })
    }

    /// Evaluate a single frame.
    #[tracing::instrument(skip(self))]
    pub fn frame(&self, frame: FrameIndex) -> ReelResult<PreviewFrame> {
        let total = self.manifest.metadata.total_frames;
        if frame.0 >= total {
            return Err(ReelError::validation(format!(
                "frame {} is out of bounds (totalFrames {total})",
                frame.0
            )));
        }

        let center = Vec2::new(
            f64::from(self.manifest.canvas.width) / 2.0,
            f64::from(self.manifest.canvas.height) / 2.0,
        );
        let mut out = PreviewFrame {
            frame,
            image: None,
            title: Vec::new(),
            captions: Vec::new(),
            audio: Vec::new(),
        };

        for el in &self.manifest.elements {
            let range = el.range()?;
            match el {
                Element::Image(img) if range.contains(frame) => {
                    let local_frame = frame.0 - range.start.0;
                    let motion = img.ken_burns.sample(local_frame, range.len_frames());
                    out.image = Some(PreviewImage {
                        element_id: img.id.clone(),
                        src: img.src.clone(),
                        local_frame,
                        motion,
                        transform: motion_transform(motion, center),
                    });
                }
                Element::TitleText(title) => {
                    // Title frames are informational; the title stays on screen throughout.
                    for line in &title.lines {
                        for seg in &line.segments {
                            let color = if seg.is_highlight {
                                title.highlight_color.clone()
                            } else {
                                title.color.clone()
                            };
                            out.title.push(PreviewText {
                                text: seg.text.clone(),
                                x: seg.x,
                                y: line.y,
                                highlight: seg.is_highlight,
                                color,
                            });
                        }
                    }
                }
                Element::SubtitleChunk(chunk)
                    if range.contains(frame) && !chunk.text.trim().is_empty() =>
                {
                    let lines = if chunk.lines.is_empty() {
                        vec![chunk.text.clone()]
                    } else {
                        chunk.lines.clone()
                    };
                    out.captions.push(PreviewCaption {
                        element_id: chunk.id.clone(),
                        lines,
                        y: chunk.y,
                        color: chunk.color.clone(),
                    });
                }
                Element::Audio(clip) if range.contains(frame) => {
                    out.audio.push(PreviewAudio {
                        element_id: clip.id.clone(),
                        src: clip.src.clone(),
                        role: clip.role,
                        offset_secs: self.fps.frames_to_secs(frame.0 - range.start.0),
                        volume: clip.volume,
                    });
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

/// Scale about `center`, then translate by the motion offset.
pub fn motion_transform(motion: MotionSample, center: Vec2) -> Affine {
    Affine::translate(center + Vec2::new(motion.x, motion.y))
        * Affine::scale(motion.scale)
        * Affine::translate(-center)
}

#[cfg(test)]
#[path = "../tests/unit/preview/preview.rs"]
mod tests;

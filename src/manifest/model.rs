use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::{Canvas, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    foundation::math::Fnv1a64,
    layout::title::TitleLine,
    motion::KenBurns,
    script::Vfx,
};

/// Fully resolved, renderer-independent description of one video.
///
/// Built once per render request and never mutated; every position, width and frame range is
/// final. Serialized field names are camelCase and element variants carry a `type` tag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderManifest {
    /// Manifest schema version.
    pub version: String,
    /// Output canvas.
    pub canvas: Canvas,
    /// Ordered elements.
    pub elements: Vec<Element>,
    /// Timeline-wide facts.
    pub metadata: Metadata,
}

/// Timeline-wide manifest facts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// End frame of the last image element.
    pub total_frames: u64,
    /// Frames per second.
    pub fps: u32,
    /// Plain script title.
    pub title: String,
}

/// Manifest element, discriminated by `type`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Full-canvas still image with Ken-Burns motion.
    Image(ImageElement),
    /// Pre-measured title block.
    TitleText(TitleElement),
    /// One timed caption chunk.
    SubtitleChunk(SubtitleElement),
    /// Narration, sound effect or background music clip.
    Audio(AudioElement),
}

/// Image track entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    /// Unique element id.
    pub id: String,
    /// Opaque image path.
    pub src: String,
    /// Inclusive first frame.
    pub start_frame: u64,
    /// Exclusive end frame.
    pub end_frame: u64,
    /// Effect tag the motion was derived from.
    pub vfx: Vfx,
    /// Linear pan/zoom parameters.
    pub ken_burns: KenBurns,
}

/// Title text block with pixel positions resolved on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleElement {
    /// Unique element id.
    pub id: String,
    /// One or two lines.
    pub lines: Vec<TitleLine>,
    /// Inclusive first frame.
    #[serde(default)]
    pub start_frame: u64,
    /// Exclusive end frame.
    #[serde(default)]
    pub end_frame: u64,
    /// Font size the segments were measured at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Regular segment color as `#rrggbbaa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Highlighted segment color as `#rrggbbaa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
}

/// Caption chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleElement {
    /// Unique element id.
    pub id: String,
    /// Chunk text.
    pub text: String,
    /// Inclusive first frame.
    pub start_frame: u64,
    /// Exclusive end frame.
    pub end_frame: u64,
    /// `text` wrapped to the caption width budget.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    /// Top of the caption block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Caption font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Distance between wrapped lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    /// Caption fill color as `#rrggbbaa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// What an audio element is used for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioRole {
    /// Sentence narration.
    #[default]
    Narration,
    /// One-shot sound effect.
    Sfx,
    /// Looping background music.
    Music,
}

/// Audio clip placed on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioElement {
    /// Unique element id.
    pub id: String,
    /// Opaque audio path.
    pub src: String,
    /// Inclusive first frame.
    pub start_frame: u64,
    /// Exclusive end frame.
    pub end_frame: u64,
    /// Linear gain.
    pub volume: f64,
    /// Clip role.
    #[serde(default)]
    pub role: AudioRole,
}

impl Element {
    /// Element id.
    pub fn id(&self) -> &str {
        match self {
            Self::Image(e) => &e.id,
            Self::TitleText(e) => &e.id,
            Self::SubtitleChunk(e) => &e.id,
            Self::Audio(e) => &e.id,
        }
    }

    /// `(startFrame, endFrame)` as stored.
    pub fn frames(&self) -> (u64, u64) {
        match self {
            Self::Image(e) => (e.start_frame, e.end_frame),
            Self::TitleText(e) => (e.start_frame, e.end_frame),
            Self::SubtitleChunk(e) => (e.start_frame, e.end_frame),
            Self::Audio(e) => (e.start_frame, e.end_frame),
        }
    }

    /// Validated frame range of the element.
    pub fn range(&self) -> ReelResult<FrameRange> {
        let (start, end) = self.frames();
        FrameRange::new(FrameIndex(start), FrameIndex(end))
            .map_err(|e| ReelError::invariant(format!("element '{}': {e}", self.id())))
    }
}

impl RenderManifest {
    /// Parse and validate a manifest from JSON text.
    pub fn from_json(s: &str) -> ReelResult<Self> {
        let manifest: Self = serde_json::from_str(s)
            .map_err(|e| ReelError::validation(format!("parse manifest JSON: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let manifest: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse manifest JSON: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open manifest JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("serialize manifest: {e}")))
    }

    /// FNV-1a 64 of the compact JSON encoding.
    pub fn fingerprint(&self) -> ReelResult<u64> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| ReelError::serde(format!("serialize manifest: {e}")))?;
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&bytes);
        Ok(h.finish())
    }

    /// Image elements in manifest order.
    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.elements.iter().filter_map(|e| match e {
            Element::Image(img) => Some(img),
            _ => None,
        })
    }

    /// Check the structural invariants every renderer relies on.
    ///
    /// Ids are non-empty and unique, every element satisfies `start <= end <= totalFrames`, and
    /// the image track is contiguous from frame 0 to `totalFrames`.
    pub fn validate(&self) -> ReelResult<()> {
        if self.metadata.fps == 0 {
            return Err(ReelError::validation("manifest fps must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("manifest canvas must be non-empty"));
        }

        let total = self.metadata.total_frames;
        let mut ids = HashSet::<&str>::with_capacity(self.elements.len());
        for el in &self.elements {
            let id = el.id();
            if id.is_empty() {
                return Err(ReelError::invariant("element id must be non-empty"));
            }
            if !ids.insert(id) {
                return Err(ReelError::invariant(format!("duplicate element id '{id}'")));
            }
            let range = el.range()?;
            if range.end.0 > total {
                return Err(ReelError::invariant(format!(
                    "element '{id}' ends at frame {} past totalFrames {total}",
                    range.end.0
                )));
            }
        }

        let mut cursor = 0u64;
        for img in self.images() {
            if img.start_frame != cursor {
                return Err(ReelError::invariant(format!(
                    "image '{}' starts at frame {} but the previous image ended at {cursor}",
                    img.id, img.start_frame
                )));
            }
            cursor = img.end_frame;
        }
        if cursor != total {
            return Err(ReelError::invariant(format!(
                "image track ends at frame {cursor} but totalFrames is {total}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;

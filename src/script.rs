use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{ReelError, ReelResult};

/// Narrated script produced by the story generator: a title plus ordered sentences.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Video title, optionally carrying `*highlight*` markers.
    pub title: String,
    /// Ordered narration sentences.
    pub sentences: Vec<Sentence>,
}

/// One narrated sentence with its prepared assets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// Narration text.
    pub text: String,
    /// Image search keyword.
    #[serde(default)]
    pub keyword: String,
    /// Opaque path of the sentence image.
    pub image_path: String,
    /// Opaque path of the narration clip.
    pub audio_path: String,
    /// Measured narration length in seconds; `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// User-editable overlay for a sentence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorSegment {
    /// Lead-in pause in seconds before the narration starts.
    #[serde(default)]
    pub delay: f64,
    /// Motion applied to the sentence image.
    #[serde(default)]
    pub vfx: Vfx,
    /// Optional sound-effect tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,
}

impl Default for EditorSegment {
    fn default() -> Self {
        Self {
            delay: 0.0,
            vfx: Vfx::default(),
            sfx: None,
        }
    }
}

/// Visual effect tag for an image.
///
/// Unknown tags deserialize to [`Vfx::Static`] instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Vfx {
    /// Scale up over the element.
    #[default]
    ZoomIn,
    /// Scale down over the element.
    ZoomOut,
    /// Slide the image towards the left.
    PanLeft,
    /// Slide the image towards the right.
    PanRight,
    /// Camera shake; rendered without Ken-Burns motion.
    Shake,
    /// No motion.
    Static,
}

impl Vfx {
    /// Canonical tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            Vfx::ZoomIn => "zoom-in",
            Vfx::ZoomOut => "zoom-out",
            Vfx::PanLeft => "pan-left",
            Vfx::PanRight => "pan-right",
            Vfx::Shake => "shake",
            Vfx::Static => "static",
        }
    }

    /// Parse a tag, degrading unknown values to [`Vfx::Static`].
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zoom-in" => Vfx::ZoomIn,
            "zoom-out" => Vfx::ZoomOut,
            "pan-left" => Vfx::PanLeft,
            "pan-right" => Vfx::PanRight,
            "shake" => Vfx::Shake,
            _ => Vfx::Static,
        }
    }
}

impl From<String> for Vfx {
    fn from(value: String) -> Self {
        Vfx::parse(&value)
    }
}

impl From<Vfx> for String {
    fn from(value: Vfx) -> Self {
        value.as_str().to_string()
    }
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Structural validation run before any layout work.
    pub fn validate(&self) -> ReelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ReelError::validation("script title must be non-empty"));
        }
        if self.sentences.is_empty() {
            return Err(ReelError::validation(
                "script must contain at least one sentence",
            ));
        }
        for (idx, s) in self.sentences.iter().enumerate() {
            if let Some(d) = s.duration
                && (!d.is_finite() || d < 0.0)
            {
                return Err(ReelError::invariant(format!(
                    "sentence {idx} duration must be finite and >= 0 (got {d})"
                )));
            }
        }
        Ok(())
    }
}

/// Parse editor segments from a JSON array reader.
pub fn edits_from_reader<R: std::io::Read>(r: R) -> ReelResult<Vec<EditorSegment>> {
    serde_json::from_reader(r)
        .map_err(|e| ReelError::validation(format!("parse editor segments JSON: {e}")))
}

/// Pair every sentence with its editor segment.
///
/// An empty `edits` slice means "no edits" and yields defaults; any other length must match.
pub fn resolve_edits(script: &Script, edits: &[EditorSegment]) -> ReelResult<Vec<EditorSegment>> {
    if edits.is_empty() {
        return Ok(vec![EditorSegment::default(); script.sentences.len()]);
    }
    if edits.len() != script.sentences.len() {
        return Err(ReelError::validation(format!(
            "expected {} editor segments, got {}",
            script.sentences.len(),
            edits.len()
        )));
    }
    for (idx, e) in edits.iter().enumerate() {
        if !e.delay.is_finite() || e.delay < 0.0 {
            return Err(ReelError::invariant(format!(
                "editor segment {idx} delay must be finite and >= 0 (got {})",
                e.delay
            )));
        }
    }
    Ok(edits.to_vec())
}

#[cfg(test)]
#[path = "../tests/unit/script/script.rs"]
mod tests;

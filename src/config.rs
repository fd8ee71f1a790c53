use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{ReelError, ReelResult},
};

/// Global render configuration.
///
/// Every field has a default so partial JSON files are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Manifest schema version written into every manifest.
    pub manifest_version: String,
    /// Output canvas.
    pub canvas: Canvas,
    /// Timeline frame rate.
    pub fps: u32,
    /// Narration length used when a sentence has no measured duration.
    pub default_sentence_secs: f64,
    /// Width of one character relative to font size when no font metrics are available.
    pub fallback_char_width_ratio: f64,
    /// Title text style and placement.
    pub title: TitleStyle,
    /// Caption text style and wrap budget.
    pub caption: CaptionStyle,
    /// Ken-Burns constants.
    pub motion: MotionConfig,
    /// Audio sources and gains.
    pub audio: AudioMix,
    /// Top/bottom bars drawn over the image stream.
    pub letterbox: LetterboxStyle,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            manifest_version: "1.0".to_string(),
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            fps: 60,
            default_sentence_secs: 3.0,
            fallback_char_width_ratio: 0.6,
            title: TitleStyle::default(),
            caption: CaptionStyle::default(),
            motion: MotionConfig::default(),
            audio: AudioMix::default(),
            letterbox: LetterboxStyle::default(),
        }
    }
}

/// Title style and placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    /// Font file used for measurement and drawing.
    pub font_path: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Vertical anchor of the title block.
    pub y: f64,
    /// Plain titles longer than this are split into two lines.
    pub max_chars_per_line: usize,
    /// Distance between the two title lines.
    pub line_spacing: f64,
    /// Regular segment color.
    pub color: Rgba8,
    /// Highlighted segment color.
    pub highlight_color: Rgba8,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_path: "assets/fonts/title.ttf".to_string(),
            size_px: 80.0,
            y: 260.0,
            max_chars_per_line: 15,
            line_spacing: 100.0,
            color: Rgba8::rgb(255, 255, 255),
            highlight_color: Rgba8::rgb(255, 214, 0),
        }
    }
}

/// Caption style and wrap budget.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Font file used for measurement and drawing.
    pub font_path: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Top of the caption block.
    pub y: f64,
    /// Spacing between wrapped caption lines.
    pub line_spacing: f64,
    /// Width of the area captions are played in.
    pub play_width: f64,
    /// Left margin inside the play area.
    pub margin_left: f64,
    /// Right margin inside the play area.
    pub margin_right: f64,
    /// Extra horizontal slack kept free.
    pub safety_pad: f64,
    /// Largest visual up-scale applied to captions by animation.
    pub max_scale: f64,
    /// Characters per line for the wrap used without font metrics.
    pub fallback_max_chars: usize,
    /// Caption text color.
    pub color: Rgba8,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_path: "assets/fonts/caption.ttf".to_string(),
            size_px: 64.0,
            y: 1400.0,
            line_spacing: 80.0,
            play_width: 1080.0,
            margin_left: 60.0,
            margin_right: 60.0,
            safety_pad: 40.0,
            max_scale: 1.2,
            fallback_max_chars: 16,
            color: Rgba8::rgb(255, 255, 255),
        }
    }
}

impl CaptionStyle {
    /// Pre-scale width budget for wrapped caption lines.
    pub fn max_line_width(&self) -> f64 {
        let avail =
            (self.play_width - self.margin_left - self.margin_right - self.safety_pad).max(0.0);
        if self.max_scale > 0.0 {
            avail / self.max_scale
        } else {
            avail
        }
    }
}

/// Ken-Burns constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Scale at the un-zoomed end of a zoom.
    pub start_scale: f64,
    /// Scale at the zoomed end of a zoom; also used while panning.
    pub end_scale: f64,
    /// Horizontal pan travel from center, in output pixels.
    pub pan_offset: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            start_scale: 1.0,
            end_scale: 1.2,
            pan_offset: 50.0,
        }
    }
}

/// Audio sources and gains.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioMix {
    /// Narration gain.
    pub tts_volume: f64,
    /// Optional looping background music.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgm_path: Option<String>,
    /// Background music gain.
    pub bgm_volume: f64,
    /// Directory holding sound effects named `<tag>.<sfx_ext>`.
    pub sfx_dir: String,
    /// Sound effect file extension.
    pub sfx_ext: String,
    /// Sound effect gain.
    pub sfx_volume: f64,
    /// Fixed length of a sound effect element.
    pub sfx_secs: f64,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            tts_volume: 1.0,
            bgm_path: None,
            bgm_volume: 0.15,
            sfx_dir: "assets/sfx".to_string(),
            sfx_ext: "mp3".to_string(),
            sfx_volume: 0.6,
            sfx_secs: 1.0,
        }
    }
}

impl AudioMix {
    /// Resolve a sound-effect tag to its file path.
    pub fn sfx_path(&self, tag: &str) -> String {
        let dir = self.sfx_dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{tag}.{}", self.sfx_ext)
        } else {
            format!("{dir}/{tag}.{}", self.sfx_ext)
        }
    }
}

/// Letterbox bars.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LetterboxStyle {
    /// Top bar height in pixels.
    pub top_px: u32,
    /// Bottom bar height in pixels.
    pub bottom_px: u32,
    /// Bar color.
    pub color: Rgba8,
}

impl Default for LetterboxStyle {
    fn default() -> Self {
        Self {
            top_px: 220,
            bottom_px: 220,
            color: Rgba8::rgb(0, 0, 0),
        }
    }
}

impl ReelConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges that would otherwise produce degenerate layouts.
    pub fn validate(&self) -> ReelResult<()> {
        if self.fps == 0 {
            return Err(ReelError::validation("config fps must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("config canvas must be non-empty"));
        }
        if !self.default_sentence_secs.is_finite() || self.default_sentence_secs < 0.0 {
            return Err(ReelError::validation(
                "config default_sentence_secs must be finite and >= 0",
            ));
        }
        if !(self.title.size_px.is_finite() && self.title.size_px > 0.0)
            || !(self.caption.size_px.is_finite() && self.caption.size_px > 0.0)
        {
            return Err(ReelError::validation(
                "config font sizes must be finite and > 0",
            ));
        }
        if self.title.max_chars_per_line == 0 || self.caption.fallback_max_chars == 0 {
            return Err(ReelError::validation(
                "config character budgets must be > 0",
            ));
        }
        if !self.audio.sfx_secs.is_finite() || self.audio.sfx_secs < 0.0 {
            return Err(ReelError::validation(
                "config audio.sfx_secs must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;

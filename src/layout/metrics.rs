use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};

/// Font metrics capability: shaped advance width of `text` in `font` at `size_px`.
///
/// `font` is the key a font was registered under (usually its path). Returns `None` when the font
/// is unknown to the backend.
pub trait TextMeasurer {
    /// Measure the advance width of a single line of text in pixels.
    fn measure(&mut self, text: &str, font: &str, size_px: f32) -> Option<f64>;
}

/// Parley-backed [`TextMeasurer`] that shapes text with registered font bytes.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<String, String>,
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyMeasurer {
    /// Construct a measurer with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Register font bytes under `key`.
    pub fn register_font(&mut self, key: impl Into<String>, font_bytes: Vec<u8>) -> ReelResult<()> {
        let key = key.into();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::layout(format!("no font families in '{key}'")))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::layout(format!("font family in '{key}' has no name")))?
            .to_string();
        self.families.insert(key, family_name);
        Ok(())
    }

    /// Read a font file and register it under its path.
    pub fn load_font_file(&mut self, path: &Path) -> ReelResult<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))
            .map_err(ReelError::from)?;
        self.register_font(path.to_string_lossy(), bytes)
    }

    /// Return `true` when a font was registered under `key`.
    pub fn has_font(&self, key: &str) -> bool {
        self.families.contains_key(key)
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font: &str, size_px: f32) -> Option<f64> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return None;
        }
        let family = self.families.get(font)?.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut w = 0.0f64;
        for line in layout.lines() {
            w = w.max(f64::from(line.metrics().advance));
        }
        Some(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MeasureKey {
    font: String,
    size_bits: u32,
    text: String,
}

/// Caller-owned measurement context shared by title and caption layout.
///
/// Holds the optional font backend, memoizes measurements for the lifetime of the context, and
/// supplies the average-character-width fallback when no backend can measure.
pub struct LayoutContext {
    measurer: Option<Box<dyn TextMeasurer>>,
    memo: HashMap<MeasureKey, f64>,
    fallback_char_width_ratio: f64,
    fallback_hits: usize,
}

impl LayoutContext {
    /// Context backed by a real font metrics implementation.
    pub fn with_measurer(
        measurer: Box<dyn TextMeasurer>,
        fallback_char_width_ratio: f64,
    ) -> Self {
        Self {
            measurer: Some(measurer),
            memo: HashMap::new(),
            fallback_char_width_ratio,
            fallback_hits: 0,
        }
    }

    /// Context without font metrics; every width comes from the fallback estimate.
    pub fn without_metrics(fallback_char_width_ratio: f64) -> Self {
        Self {
            measurer: None,
            memo: HashMap::new(),
            fallback_char_width_ratio,
            fallback_hits: 0,
        }
    }

    /// Load every distinct font path with Parley.
    ///
    /// Fonts that cannot be read are skipped with a warning; if none load the context falls back to
    /// character-count metrics.
    pub fn from_font_files<P: AsRef<Path>>(
        paths: &[P],
        fallback_char_width_ratio: f64,
    ) -> Self {
        let mut backend = ParleyMeasurer::new();
        let mut seen = Vec::<PathBuf>::new();
        for p in paths {
            let p = p.as_ref().to_path_buf();
            if seen.contains(&p) {
                continue;
            }
            if let Err(e) = backend.load_font_file(&p) {
                tracing::warn!(font = %p.display(), error = %e, "font metrics unavailable");
            }
            seen.push(p);
        }
        if backend.families.is_empty() {
            return Self::without_metrics(fallback_char_width_ratio);
        }
        Self::with_measurer(Box::new(backend), fallback_char_width_ratio)
    }

    /// Return `true` when a font backend is attached.
    pub fn has_metrics(&self) -> bool {
        self.measurer.is_some()
    }

    /// Number of measurements answered by the fallback estimate.
    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits
    }

    /// Measure with the backend if it can, otherwise with the fallback estimate.
    pub fn measure(&mut self, text: &str, font: &str, size_px: f32) -> f64 {
        match self.measure_exact(text, font, size_px) {
            Some(w) => w,
            None => {
                self.fallback_hits += 1;
                self.fallback_width(text, size_px)
            }
        }
    }

    /// Measure with the backend only.
    pub fn measure_exact(&mut self, text: &str, font: &str, size_px: f32) -> Option<f64> {
        if text.is_empty() {
            return Some(0.0);
        }
        let key = MeasureKey {
            font: font.to_string(),
            size_bits: size_px.to_bits(),
            text: text.to_string(),
        };
        if let Some(w) = self.memo.get(&key) {
            return Some(*w);
        }
        let w = self.measurer.as_mut()?.measure(text, font, size_px)?;
        self.memo.insert(key, w);
        Some(w)
    }

    /// `chars * size_px * ratio`.
    pub fn fallback_width(&self, text: &str, size_px: f32) -> f64 {
        (text.chars().count() as f64) * f64::from(size_px) * self.fallback_char_width_ratio
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;

use crate::{config::MotionConfig, foundation::math::lerp, script::Vfx};

/// Linear pan/zoom parameters of an image element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KenBurns {
    /// Scale at the first frame.
    pub from_scale: f64,
    /// Scale at the last frame.
    pub to_scale: f64,
    /// Horizontal offset at the first frame, in output pixels.
    pub from_x: f64,
    /// Horizontal offset at the last frame, in output pixels.
    pub to_x: f64,
    /// Vertical offset at the first frame, in output pixels.
    pub from_y: f64,
    /// Vertical offset at the last frame, in output pixels.
    pub to_y: f64,
}

impl KenBurns {
    /// No motion.
    pub const STATIC: Self = Self {
        from_scale: 1.0,
        to_scale: 1.0,
        from_x: 0.0,
        to_x: 0.0,
        from_y: 0.0,
        to_y: 0.0,
    };

    /// Map an effect tag to its motion tuple.
    pub fn for_vfx(vfx: Vfx, cfg: &MotionConfig) -> Self {
        let (start, end, pan) = (cfg.start_scale, cfg.end_scale, cfg.pan_offset);
        match vfx {
            Vfx::ZoomIn => Self {
                from_scale: start,
                to_scale: end,
                ..Self::STATIC
            },
            Vfx::ZoomOut => Self {
                from_scale: end,
                to_scale: start,
                ..Self::STATIC
            },
            Vfx::PanLeft => Self {
                from_scale: end,
                to_scale: end,
                from_x: pan,
                to_x: -pan,
                ..Self::STATIC
            },
            Vfx::PanRight => Self {
                from_scale: end,
                to_scale: end,
                from_x: -pan,
                to_x: pan,
                ..Self::STATIC
            },
            Vfx::Shake | Vfx::Static => Self::STATIC,
        }
    }

    /// Interpolated state at `local` frames into an element lasting `len` frames.
    pub fn sample(&self, local: u64, len: u64) -> MotionSample {
        let t = progress(local, len);
        MotionSample {
            scale: lerp(self.from_scale, self.to_scale, t),
            x: lerp(self.from_x, self.to_x, t),
            y: lerp(self.from_y, self.to_y, t),
        }
    }
}

/// Evaluated Ken-Burns state for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MotionSample {
    /// Zoom factor relative to a cover-fit image.
    pub scale: f64,
    /// Horizontal offset in output pixels.
    pub x: f64,
    /// Vertical offset in output pixels.
    pub y: f64,
}

/// Normalized progress `min(local / max(len - 1, 1), 1)`.
///
/// The last frame of an element reaches `1.0` exactly.
pub fn progress(local: u64, len: u64) -> f64 {
    let denom = len.saturating_sub(1).max(1) as f64;
    ((local as f64) / denom).min(1.0)
}

#[cfg(test)]
#[path = "../tests/unit/motion/motion.rs"]
mod tests;

//! Storyreel compiles narrated scripts into short vertical videos.
//!
//! The pipeline is deterministic and split into pure stages:
//!
//! - Resolve per-sentence timing into a frame-accurate [`Timeline`]
//! - Lay out the highlighted title and chunk narration into timed captions
//! - Assemble a versioned [`RenderManifest`] (the JSON contract shared with renderers)
//! - Compile the manifest into an `ffmpeg` [`FilterProgram`], or evaluate it per frame with
//!   [`Preview`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Render configuration with defaults for every field.
pub mod config;
/// Script and editor-segment input model.
pub mod script;
/// Sentence timing resolution.
pub mod timing;
/// Ken-Burns motion curves.
pub mod motion;
/// Title and caption layout.
pub mod layout;
/// Render manifest model and builder.
pub mod manifest;
/// Manifest to `ffmpeg` filter-graph compilation.
pub mod compile;
/// In-memory frame evaluation.
pub mod preview;
/// Encoding sinks.
pub mod encode;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Rgba8, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::compile::filtergraph::{CompileOpts, SubtitleMode, compile_manifest};
pub use crate::compile::program::FilterProgram;
pub use crate::config::ReelConfig;
pub use crate::encode::ffmpeg::{FfmpegRenderOpts, render_program};
pub use crate::layout::metrics::{LayoutContext, ParleyMeasurer, TextMeasurer};
pub use crate::manifest::builder::{build_manifest, build_manifest_with};
pub use crate::manifest::model::{Element, RenderManifest};
pub use crate::preview::{Preview, PreviewFrame};
pub use crate::script::{EditorSegment, Script, Sentence, Vfx};
pub use crate::timing::{Timeline, compute_timeline};

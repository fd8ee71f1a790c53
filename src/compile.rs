//! Manifest lowering for the offline compositor.

/// Manifest to filter-program compiler.
pub mod filtergraph;
/// Filter program data model and text rendering.
pub mod program;
/// SRT track for the subtitle-track overlay mode.
pub mod subtitles;

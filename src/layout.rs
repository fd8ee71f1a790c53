//! Text layout: keyword highlighting, title wrapping and caption chunking.
//!
//! All widths go through a caller-owned [`metrics::LayoutContext`], which memoizes measurements and
//! degrades to a character-count estimate when no font backend is available.

/// Timed caption chunks and caption line wrapping.
pub mod caption;
/// Pluggable highlight keyword extraction.
pub mod keywords;
/// Font metrics capability and the shared measurement context.
pub mod metrics;
/// Title highlighting, line splitting and segment positioning.
pub mod title;

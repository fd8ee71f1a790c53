//! Render manifest: the serialized contract between the layout compiler and every renderer.

/// Manifest assembly from a script, its edits and the configuration.
pub mod builder;
/// Manifest data model, JSON I/O and invariant checks.
pub mod model;

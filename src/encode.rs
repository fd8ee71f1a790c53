//! Encoding of compiled filter programs.

/// `ffmpeg` invocation (MP4 output via system `ffmpeg`).
pub mod ffmpeg;

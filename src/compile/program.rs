use std::fmt;

/// Label of the video stream the program hands to the encoder.
pub const FINAL_VIDEO: &str = "final_video";
/// Label of the audio stream the program hands to the encoder.
pub const FINAL_AUDIO: &str = "final_audio";

/// One `-i` input of a filter program.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProgramInput {
    /// Options placed before `-i`, e.g. `-loop 1`.
    pub options: Vec<String>,
    /// Opaque asset path.
    pub path: String,
}

/// A single filter-graph node: `[in]...filter[out]...`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FilterStage {
    /// Input pad labels (`0:v`, `base`, ...), without brackets.
    pub inputs: Vec<String>,
    /// Filter chain text, comma-separated filters.
    pub filter: String,
    /// Output pad labels, without brackets.
    pub outputs: Vec<String>,
}

impl FilterStage {
    /// Stage with one input and one output.
    pub fn chain(
        input: impl Into<String>,
        filter: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            inputs: vec![input.into()],
            filter: filter.into(),
            outputs: vec![output.into()],
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.inputs {
            write!(f, "[{label}]")?;
        }
        f.write_str(&self.filter)?;
        for label in &self.outputs {
            write!(f, "[{label}]")?;
        }
        Ok(())
    }
}

/// Stream labels mapped to the encoder outputs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutputMap {
    /// Final video label.
    pub video: String,
    /// Final audio label.
    pub audio: String,
}

/// Ordered compositing program for an external ffmpeg-compatible backend.
///
/// Fully derived from a manifest; rendering the same manifest twice yields byte-identical text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FilterProgram {
    /// Inputs in `-i` order; stage labels refer to them by index.
    pub inputs: Vec<ProgramInput>,
    /// Video chain, in dependency order.
    pub video: Vec<FilterStage>,
    /// Audio chain, in dependency order.
    pub audio: Vec<FilterStage>,
    /// Encoder output mapping.
    pub outputs: OutputMap,
    /// Output frame rate.
    pub fps: u32,
    /// Output length in seconds.
    pub duration_secs: f64,
}

impl FilterProgram {
    /// All stages, video first.
    pub fn stages(&self) -> impl Iterator<Item = &FilterStage> {
        self.video.iter().chain(self.audio.iter())
    }

    /// `-filter_complex` argument text: every stage joined by `;`.
    pub fn filter_complex(&self) -> String {
        self.stages()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Human-readable listing: inputs, one stage per line, output map.
    pub fn to_script(&self) -> String {
        let mut out = String::new();
        for (idx, input) in self.inputs.iter().enumerate() {
            let opts = input.options.join(" ");
            if opts.is_empty() {
                out.push_str(&format!("# input {idx}: {}\n", input.path));
            } else {
                out.push_str(&format!("# input {idx}: {opts} {}\n", input.path));
            }
        }
        let stages: Vec<String> = self.stages().map(ToString::to_string).collect();
        out.push_str(&stages.join(";\n"));
        out.push('\n');
        out.push_str(&format!(
            "# map [{}] [{}]\n",
            self.outputs.video, self.outputs.audio
        ));
        out
    }
}

/// Format a number for filter expressions: at most six decimals, no trailing zeros, no `-0`.
pub fn num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape a value placed inside single quotes in a filter option (drawtext text, file paths).
///
/// The result is unquoted twice: once by the filtergraph parser and once by the filter's option
/// parser. Backslashes and colons stay literal inside the graph-level quotes, so only the option
/// level sees their escapes. A quote closes the graph-level quote and emits `\'` for the option
/// level before reopening.
pub fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "'\\\\\\''")
        .replace(':', "\\:")
}

#[cfg(test)]
#[path = "../../tests/unit/compile/program.rs"]
mod tests;

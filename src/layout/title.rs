use crate::{
    config::TitleStyle,
    layout::keywords::{KeywordStrategy, MARKER, auto_highlight, strip_markers},
    layout::metrics::LayoutContext,
};

/// Measured, positioned run of title text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSegment {
    /// Text without markers.
    pub text: String,
    /// Drawn in the highlight color.
    pub is_highlight: bool,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Measured advance width in pixels.
    pub width: f64,
}

/// One centered title line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleLine {
    /// Segments in left-to-right order.
    pub segments: Vec<TitleSegment>,
    /// Top of the line in canvas pixels.
    pub y: f64,
    /// Sum of segment widths.
    pub total_width: f64,
}

/// Unmeasured run produced by marker parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    /// Text without markers.
    pub text: String,
    /// Run was enclosed in markers.
    pub is_highlight: bool,
}

/// Result of laying out a title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    /// Title with auto-selected keywords wrapped in markers.
    pub marked: String,
    /// Keywords chosen by the strategy.
    pub keywords: Vec<String>,
    /// One or two positioned lines.
    pub lines: Vec<TitleLine>,
}

/// Highlights, wraps, measures and centers a title on a canvas.
pub struct TitleLayoutEngine<'a> {
    style: &'a TitleStyle,
    canvas_width: f64,
    strategy: &'a dyn KeywordStrategy,
}

impl<'a> TitleLayoutEngine<'a> {
    /// Engine for a canvas `canvas_width` pixels wide.
    pub fn new(style: &'a TitleStyle, canvas_width: u32, strategy: &'a dyn KeywordStrategy) -> Self {
        Self {
            style,
            canvas_width: f64::from(canvas_width),
            strategy,
        }
    }

    /// Run the full title pipeline; measurements go through `ctx`.
    #[tracing::instrument(skip_all, fields(title = %title))]
    pub fn layout(&self, ctx: &mut LayoutContext, title: &str) -> TitleLayout {
        let (marked, keywords) = auto_highlight(title, self.strategy);
        let raw_lines = split_into_lines(&marked, self.style.max_chars_per_line);
        tracing::debug!(?keywords, lines = raw_lines.len(), "title highlighted and split");

        let base_y = if raw_lines.len() == 2 {
            self.style.y - self.style.line_spacing / 2.0
        } else {
            self.style.y
        };

        let lines = raw_lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let y = base_y + (idx as f64) * self.style.line_spacing;
                self.measure_line(ctx, line, y)
            })
            .collect();

        TitleLayout {
            marked,
            keywords,
            lines,
        }
    }

    fn measure_line(&self, ctx: &mut LayoutContext, line: &str, y: f64) -> TitleLine {
        let runs = parse_segments(line);
        let widths: Vec<f64> = runs
            .iter()
            .map(|r| ctx.measure(&r.text, &self.style.font_path, self.style.size_px))
            .collect();
        let total_width: f64 = widths.iter().sum();

        let mut x = (self.canvas_width - total_width) / 2.0;
        let mut segments = Vec::with_capacity(runs.len());
        for (run, width) in runs.into_iter().zip(widths) {
            segments.push(TitleSegment {
                text: run.text,
                is_highlight: run.is_highlight,
                x,
                width,
            });
            x += width;
        }

        TitleLine {
            segments,
            y,
            total_width,
        }
    }
}

/// Split a marked title into one or two lines at a word boundary near the middle.
///
/// Titles whose plain length fits `max_chars` stay on one line. Otherwise the first space at or
/// after the midpoint is used unless it lies past 70% of the length, then the last space before
/// the midpoint, then the midpoint itself. A cut inside a highlight closes the span on the first
/// line and reopens it on the second.
pub fn split_into_lines(marked: &str, max_chars: usize) -> Vec<String> {
    let plain: Vec<char> = strip_markers(marked).chars().collect();
    let n = plain.len();
    if n <= max_chars {
        return vec![marked.to_string()];
    }

    let mid = n / 2;
    let limit = (n as f64) * 0.7;
    let forward = (mid..n)
        .find(|&i| plain[i] == ' ')
        .filter(|&i| (i as f64) <= limit);
    let split = forward
        .or_else(|| (0..mid).rev().find(|&i| plain[i] == ' '))
        .unwrap_or(mid);

    let mut cut = marked.len();
    let mut seen = 0usize;
    for (byte, c) in marked.char_indices() {
        if c == MARKER {
            continue;
        }
        if seen == split {
            cut = byte;
            break;
        }
        seen += 1;
    }

    let mut inside = marked[..cut].matches(MARKER).count() % 2 == 1;
    if inside && marked[..cut].ends_with(MARKER) {
        // Keep a just-opened span whole on the second line.
        cut -= MARKER.len_utf8();
        inside = false;
    }

    let (head, tail) = marked.split_at(cut);
    let mut first = head.trim_end().to_string();
    let mut second = tail.trim_start().to_string();
    if inside {
        first.push(MARKER);
        second.insert(0, MARKER);
    }

    let lines: Vec<String> = [first, second]
        .into_iter()
        .filter(|l| !strip_markers(l).trim().is_empty())
        .collect();
    if lines.is_empty() {
        return vec![marked.to_string()];
    }
    lines
}

/// Parse `*...*` spans of a line into ordered runs.
///
/// Empty runs are dropped; text after an unmatched marker is treated as plain.
pub fn parse_segments(line: &str) -> Vec<TextRun> {
    let mut runs = Vec::<TextRun>::new();
    let mut buf = String::new();
    let mut highlight = false;
    for c in line.chars() {
        if c == MARKER {
            if !buf.is_empty() {
                runs.push(TextRun {
                    text: std::mem::take(&mut buf),
                    is_highlight: highlight,
                });
            }
            highlight = !highlight;
            continue;
        }
        buf.push(c);
    }
    if !buf.is_empty() {
        runs.push(TextRun {
            text: buf,
            is_highlight: false,
        });
    }
    runs
}

#[cfg(test)]
#[path = "../../tests/unit/layout/title.rs"]
mod tests;

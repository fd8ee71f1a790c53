use crate::{
    config::CaptionStyle,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::ReelResult,
    layout::metrics::LayoutContext,
};

/// Sentences with more words than this get two-word chunks instead of three.
pub const LONG_SENTENCE_WORDS: usize = 10;

const TERMINAL_PUNCT: [char; 4] = ['.', '?', '!', ','];

/// One timed caption chunk of a sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionChunk {
    /// Words of the chunk joined by single spaces.
    pub text: String,
    /// Frames the chunk is on screen.
    pub range: FrameRange,
}

/// Group whitespace-separated words into caption chunks.
///
/// A chunk is flushed once it holds two words (sentences over [`LONG_SENTENCE_WORDS`] words) or
/// three words, or as soon as a word ends with `.`, `?`, `!` or `,`.
pub fn chunk_words(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let size = if words.len() > LONG_SENTENCE_WORDS { 2 } else { 3 };

    let mut chunks = Vec::<String>::new();
    let mut current = Vec::<&str>::with_capacity(size);
    for word in words {
        current.push(word);
        if current.len() >= size || word.ends_with(TERMINAL_PUNCT) {
            chunks.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

/// Split `text` into chunks and spread them over `range` by non-whitespace character count.
///
/// Chunk boundaries are placed at `start + round(cumulative_chars / total_chars * len)` so the
/// spans always add up to the sentence length. A sentence without visible characters becomes a
/// single chunk covering the whole range.
pub fn chunk_sentence(text: &str, range: FrameRange) -> ReelResult<Vec<CaptionChunk>> {
    let chunks = chunk_words(text);
    let total_chars: usize = chunks.iter().map(|c| visible_chars(c)).sum();
    if total_chars == 0 {
        return Ok(vec![CaptionChunk {
            text: chunks.join(" "),
            range,
        }]);
    }

    let start = range.start.0;
    let len = range.len_frames() as f64;
    let last = chunks.len() - 1;
    let mut out = Vec::with_capacity(chunks.len());
    let mut cursor = start;
    let mut cumulative = 0usize;
    for (idx, text) in chunks.into_iter().enumerate() {
        cumulative += visible_chars(&text);
        let end = if idx == last {
            range.end.0
        } else {
            let offset = ((cumulative as f64) / (total_chars as f64) * len).round() as u64;
            (start + offset).clamp(cursor, range.end.0)
        };
        out.push(CaptionChunk {
            text,
            range: FrameRange::new(FrameIndex(cursor), FrameIndex(end))?,
        });
        cursor = end;
    }
    Ok(out)
}

fn visible_chars(s: &str) -> usize {
    s.chars().filter(|c| !c.is_whitespace()).count()
}

/// Wraps caption text into on-screen lines.
pub struct CaptionWrapper<'a> {
    style: &'a CaptionStyle,
}

impl<'a> CaptionWrapper<'a> {
    /// Wrapper using the style's font, size and pre-scale width budget.
    pub fn new(style: &'a CaptionStyle) -> Self {
        Self { style }
    }

    /// Wrap `text` by measured pixel width, or by character count when the caption font cannot be
    /// measured.
    pub fn wrap(&self, ctx: &mut LayoutContext, text: &str) -> Vec<String> {
        let font = self.style.font_path.as_str();
        let size = self.style.size_px;
        if ctx.measure_exact(text, font, size).is_none() {
            return wrap_by_chars(text, self.style.fallback_max_chars);
        }
        let max_width = self.style.max_line_width();
        wrap_greedy(text, |candidate| ctx.measure(candidate, font, size) <= max_width)
    }
}

/// Greedy wrap limited to `max_chars` characters per line.
pub fn wrap_by_chars(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    wrap_greedy(text, |candidate| candidate.chars().count() <= max_chars)
}

/// Greedy word wrap driven by a `fits` predicate.
///
/// Words that do not fit on a line of their own are broken character by character.
pub fn wrap_greedy(text: &str, mut fits: impl FnMut(&str) -> bool) -> Vec<String> {
    let mut lines = Vec::<String>::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if fits(&candidate) {
            line = candidate;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if fits(word) {
            line = word.to_string();
            continue;
        }

        let mut piece = String::new();
        for c in word.chars() {
            let mut next = piece.clone();
            next.push(c);
            if !piece.is_empty() && !fits(&next) {
                lines.push(std::mem::take(&mut piece));
                piece.push(c);
            } else {
                piece = next;
            }
        }
        line = piece;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/caption.rs"]
mod tests;

use regex::Regex;

/// Highlight marker wrapped around emphasized title text.
pub const MARKER: char = '*';

/// Upper bound on auto-selected highlight keywords.
pub const MAX_KEYWORDS: usize = 3;

/// Pluggable keyword extraction for title highlighting.
pub trait KeywordStrategy {
    /// Pick highlight keywords from a marker-free title, in priority order.
    fn extract(&self, plain_title: &str) -> Vec<String>;
}

const STOP_WORDS: &[&str] = &[
    // Korean fillers, pronouns and intensifiers.
    "그리고", "하지만", "그러나", "그래서", "그런데", "또한", "이것", "저것", "그것", "이런",
    "그런", "저런", "어떤", "모든", "있는", "없는", "하는", "되는", "했던", "있던", "가장",
    "정말", "진짜", "너무", "매우", "아주", "바로", "다시", "이제", "우리", "당신", "여러분",
    "무엇", "누가", "어디", "언제", "왜", "이유", "사실", "때문", "대한", "위한", "통해",
    // English function words.
    "the", "and", "for", "with", "that", "this", "from", "are", "was", "you", "your", "how",
    "why", "what", "who", "its", "into", "about", "of", "to", "in", "on", "at", "is", "an",
];

/// Korean/Latin keyword heuristics.
///
/// Pattern classes are applied in order: digits followed by Hangul (`100일`), Latin words, Hangul
/// runs of 2-6 syllables. Matches shorter than two characters or listed as stop words are skipped,
/// duplicates keep their first occurrence and at most [`MAX_KEYWORDS`] are returned.
#[derive(Clone, Debug)]
pub struct HangulLatinKeywords {
    patterns: Vec<Regex>,
}

impl Default for HangulLatinKeywords {
    fn default() -> Self {
        Self::new()
    }
}

impl HangulLatinKeywords {
    /// Compile the built-in pattern set.
    pub fn new() -> Self {
        let patterns = [r"[0-9]+[가-힣]+", r"[A-Za-z]+", r"[가-힣]{2,6}"]
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        Self { patterns }
    }
}

impl KeywordStrategy for HangulLatinKeywords {
    fn extract(&self, plain_title: &str) -> Vec<String> {
        let mut out = Vec::<String>::new();
        for re in &self.patterns {
            for m in re.find_iter(plain_title) {
                let word = m.as_str();
                if word.chars().count() < 2 || is_stop_word(word) {
                    continue;
                }
                if out.iter().any(|k| k == word) {
                    continue;
                }
                out.push(word.to_string());
            }
        }
        out.truncate(MAX_KEYWORDS);
        out
    }
}

fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// Remove every highlight marker.
pub fn strip_markers(s: &str) -> String {
    s.chars().filter(|&c| c != MARKER).collect()
}

/// Wrap every occurrence of each keyword in markers.
///
/// An occurrence is left alone when it touches a marker on either side or sits inside an existing
/// `*...*` span.
pub fn mark_keywords(title: &str, keywords: &[String]) -> String {
    let mut marked = title.to_string();
    for kw in keywords {
        if kw.is_empty() || kw.contains(MARKER) {
            continue;
        }
        marked = mark_one(&marked, kw);
    }
    marked
}

fn mark_one(s: &str, kw: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut last = 0usize;
    for (pos, _) in s.match_indices(kw) {
        let end = pos + kw.len();
        let before = s[..pos].chars().next_back();
        let after = s[end..].chars().next();
        let inside_span = s[..pos].matches(MARKER).count() % 2 == 1;
        if before == Some(MARKER) || after == Some(MARKER) || inside_span {
            continue;
        }
        out.push_str(&s[last..pos]);
        out.push(MARKER);
        out.push_str(kw);
        out.push(MARKER);
        last = end;
    }
    out.push_str(&s[last..]);
    out
}

/// Extract keywords with `strategy` and mark them in `title`.
pub fn auto_highlight(title: &str, strategy: &dyn KeywordStrategy) -> (String, Vec<String>) {
    let plain = strip_markers(title);
    let keywords = strategy.extract(&plain);
    (mark_keywords(title, &keywords), keywords)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/keywords.rs"]
mod tests;

use super::*;
use crate::layout::keywords::{HangulLatinKeywords, strip_markers};

const KOREAN_TITLE: &str = "인류 역사상 가장 황당한 전쟁";

fn style() -> TitleStyle {
    TitleStyle::default()
}

#[test]
fn short_titles_stay_on_one_line_unchanged() {
    let lines = split_into_lines("*짧은* 제목", 15);
    assert_eq!(lines, vec!["*짧은* 제목".to_string()]);

    let exact = "a".repeat(15);
    assert_eq!(split_into_lines(&exact, 15), vec![exact.clone()]);
}

#[test]
fn korean_title_splits_at_space_after_midpoint() {
    let marked = "*인류* *역사상* 가장 *황당한* 전쟁";
    let lines = split_into_lines(marked, 15);
    assert_eq!(
        lines,
        vec!["*인류* *역사상* 가장".to_string(), "*황당한* 전쟁".to_string()]
    );
}

#[test]
fn forward_space_past_seventy_percent_searches_backward() {
    let lines = split_into_lines("ab cdefghijk lm", 10);
    assert_eq!(lines, vec!["ab".to_string(), "cdefghijk lm".to_string()]);
}

#[test]
fn no_usable_space_splits_mid_word() {
    let lines = split_into_lines("abcdefghijkl", 5);
    assert_eq!(lines, vec!["abcdef".to_string(), "ghijkl".to_string()]);
}

#[test]
fn split_inside_highlight_reopens_span_on_second_line() {
    let lines = split_into_lines("*abcdefgh ijklmnop*", 10);
    assert_eq!(
        lines,
        vec!["*abcdefgh*".to_string(), "*ijklmnop*".to_string()]
    );
}

#[test]
fn split_right_after_opening_marker_keeps_span_whole() {
    let lines = split_into_lines("abcdef*ghijkl*", 5);
    assert_eq!(lines, vec!["abcdef".to_string(), "*ghijkl*".to_string()]);
}

#[test]
fn segments_follow_marker_spans() {
    let runs = parse_segments("*인류* *역사상* 가장");
    let got: Vec<(&str, bool)> = runs
        .iter()
        .map(|r| (r.text.as_str(), r.is_highlight))
        .collect();
    assert_eq!(
        got,
        vec![("인류", true), (" ", false), ("역사상", true), (" 가장", false)]
    );
}

#[test]
fn empty_spans_vanish_and_unmatched_marker_is_plain() {
    let runs = parse_segments("**a*b");
    let got: Vec<(&str, bool)> = runs
        .iter()
        .map(|r| (r.text.as_str(), r.is_highlight))
        .collect();
    assert_eq!(got, vec![("a", false), ("b", false)]);
}

#[test]
fn korean_layout_highlights_and_centers_with_fallback_metrics() {
    let style = style();
    let strategy = HangulLatinKeywords::new();
    let engine = TitleLayoutEngine::new(&style, 1080, &strategy);
    let mut ctx = LayoutContext::without_metrics(0.6);

    let out = engine.layout(&mut ctx, KOREAN_TITLE);
    assert!(out.keywords.iter().any(|k| k == "역사상" || k == "전쟁"));
    assert_eq!(out.lines.len(), 2);

    // 9 chars * 80px * 0.6
    let first = &out.lines[0];
    assert!((first.total_width - 432.0).abs() < 1e-9);
    assert!((first.segments[0].x - 324.0).abs() < 1e-9);
    assert_eq!(first.y, 210.0);
    assert_eq!(out.lines[1].y, 310.0);

    for line in &out.lines {
        let mut x = line.segments[0].x;
        for seg in &line.segments {
            assert!((seg.x - x).abs() < 1e-9);
            x += seg.width;
        }
        let sum: f64 = line.segments.iter().map(|s| s.width).sum();
        assert!((line.total_width - sum).abs() < 1e-9);
    }
}

#[test]
fn segment_text_reconstructs_plain_title() {
    let style = style();
    let strategy = HangulLatinKeywords::new();
    let engine = TitleLayoutEngine::new(&style, 1080, &strategy);
    let mut ctx = LayoutContext::without_metrics(0.6);

    for title in [KOREAN_TITLE, "AI 도구 100일 체험기", "The History of Rome and Carthage"] {
        let out = engine.layout(&mut ctx, title);
        let rebuilt: Vec<String> = out
            .lines
            .iter()
            .map(|l| l.segments.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(rebuilt.join(" "), strip_markers(title), "{title}");
    }
}

#[test]
fn single_line_title_uses_configured_y() {
    let style = style();
    let strategy = HangulLatinKeywords::new();
    let engine = TitleLayoutEngine::new(&style, 1080, &strategy);
    let mut ctx = LayoutContext::without_metrics(0.6);

    let out = engine.layout(&mut ctx, "짧은 제목");
    assert_eq!(out.lines.len(), 1);
    assert_eq!(out.lines[0].y, style.y);
}

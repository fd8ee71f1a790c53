use super::*;

fn kws(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn hangul_runs_skip_stop_words_and_keep_first_three() {
    let k = HangulLatinKeywords::new().extract("인류 역사상 가장 황당한 전쟁");
    assert_eq!(k, kws(&["인류", "역사상", "황당한"]));
    assert!(k.iter().any(|w| w == "역사상" || w == "전쟁"));
}

#[test]
fn pattern_classes_apply_in_order() {
    let k = HangulLatinKeywords::new().extract("AI 도구 100일 체험기");
    assert_eq!(k, kws(&["100일", "AI", "도구"]));
}

#[test]
fn latin_stop_words_are_case_insensitive() {
    let k = HangulLatinKeywords::new().extract("The History of Rome");
    assert_eq!(k, kws(&["History", "Rome"]));
}

#[test]
fn duplicates_keep_first_occurrence() {
    let k = HangulLatinKeywords::new().extract("전쟁 그리고 전쟁 그리고 평화");
    assert_eq!(k, kws(&["전쟁", "평화"]));
}

#[test]
fn marking_wraps_every_free_occurrence() {
    let marked = mark_keywords("전쟁과 전쟁", &kws(&["전쟁"]));
    assert_eq!(marked, "*전쟁*과 *전쟁*");
}

#[test]
fn marking_skips_occurrences_touching_or_inside_markers() {
    let marked = mark_keywords("*인류* 인류", &kws(&["인류"]));
    assert_eq!(marked, "*인류* *인류*");

    let marked = mark_keywords("*세계 인류사* 인류", &kws(&["인류"]));
    assert_eq!(marked, "*세계 인류사* *인류*");
}

#[test]
fn auto_highlight_scans_plain_text() {
    let strategy = HangulLatinKeywords::new();
    let (marked, keywords) = auto_highlight("인류 역사상 가장 황당한 전쟁", &strategy);
    assert_eq!(keywords.len(), 3);
    assert_eq!(marked, "*인류* *역사상* 가장 *황당한* 전쟁");
    assert_eq!(strip_markers(&marked), "인류 역사상 가장 황당한 전쟁");
}

struct Fixed(Vec<String>);

impl KeywordStrategy for Fixed {
    fn extract(&self, _plain_title: &str) -> Vec<String> {
        self.0.clone()
    }
}

#[test]
fn custom_strategies_plug_into_marking() {
    let (marked, _) = auto_highlight("hello world", &Fixed(kws(&["world"])));
    assert_eq!(marked, "hello *world*");
}

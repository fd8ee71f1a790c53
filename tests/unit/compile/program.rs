use super::*;

#[test]
fn numbers_drop_trailing_zeros_and_negative_zero() {
    assert_eq!(num(50.0), "50");
    assert_eq!(num(-50.0), "-50");
    assert_eq!(num(1.2), "1.2");
    assert_eq!(num(0.0), "0");
    assert_eq!(num(-0.0000001), "0");
    assert_eq!(num(1.0 / 3.0), "0.333333");
}

#[test]
fn quoted_values_escape_quotes_colons_and_backslashes() {
    assert_eq!(escape_quoted("plain text"), "plain text");
    // Graph level yields `it\'s`; option level yields `it's`.
    assert_eq!(escape_quoted("it's"), "it'\\\\\\''s");
    assert_eq!(escape_quoted("10:30"), "10\\:30");
    assert_eq!(escape_quoted("C:\\fonts"), "C\\:\\\\fonts");
}

#[test]
fn stages_render_with_bracketed_labels() {
    let stage = FilterStage {
        inputs: vec!["a0".to_string(), "a1".to_string()],
        filter: "amix=inputs=2".to_string(),
        outputs: vec![FINAL_AUDIO.to_string()],
    };
    assert_eq!(stage.to_string(), "[a0][a1]amix=inputs=2[final_audio]");

    let source = FilterStage {
        inputs: vec![],
        filter: "anullsrc".to_string(),
        outputs: vec!["bed".to_string()],
    };
    assert_eq!(source.to_string(), "anullsrc[bed]");
}

#[test]
fn filter_complex_joins_video_then_audio() {
    let program = FilterProgram {
        inputs: vec![ProgramInput {
            options: vec!["-loop".to_string(), "1".to_string()],
            path: "a.jpg".to_string(),
        }],
        video: vec![FilterStage::chain("0:v", "null", FINAL_VIDEO)],
        audio: vec![FilterStage {
            inputs: vec![],
            filter: "anullsrc".to_string(),
            outputs: vec![FINAL_AUDIO.to_string()],
        }],
        outputs: OutputMap {
            video: FINAL_VIDEO.to_string(),
            audio: FINAL_AUDIO.to_string(),
        },
        fps: 30,
        duration_secs: 1.0,
    };
    assert_eq!(
        program.filter_complex(),
        "[0:v]null[final_video];anullsrc[final_audio]"
    );
    let script = program.to_script();
    assert!(script.starts_with("# input 0: -loop 1 a.jpg\n"));
    assert!(script.ends_with("# map [final_video] [final_audio]\n"));
}

use super::*;

fn sentence(text: &str, duration: Option<f64>) -> Sentence {
    Sentence {
        text: text.to_string(),
        keyword: "k".to_string(),
        image_path: "img.jpg".to_string(),
        audio_path: "tts.mp3".to_string(),
        duration,
    }
}

#[test]
fn unknown_vfx_degrades_to_static() {
    let seg: EditorSegment =
        serde_json::from_str(r#"{ "delay": 0.5, "vfx": "spin-around" }"#).unwrap();
    assert_eq!(seg.vfx, Vfx::Static);
    assert_eq!(seg.delay, 0.5);
    assert_eq!(seg.sfx, None);

    let seg: EditorSegment = serde_json::from_str(r#"{ "vfx": "pan-left", "sfx": "whoosh" }"#).unwrap();
    assert_eq!(seg.vfx, Vfx::PanLeft);
    assert_eq!(seg.sfx.as_deref(), Some("whoosh"));
}

#[test]
fn vfx_serializes_as_kebab_tag() {
    assert_eq!(serde_json::to_string(&Vfx::ZoomOut).unwrap(), "\"zoom-out\"");
}

#[test]
fn sentence_uses_camel_case_fields() {
    let s: Sentence = serde_json::from_str(
        r#"{ "text": "hi", "keyword": "k", "imagePath": "a.jpg", "audioPath": "a.mp3" }"#,
    )
    .unwrap();
    assert_eq!(s.duration, None);
    assert_eq!(s.image_path, "a.jpg");
}

#[test]
fn validate_rejects_missing_title_and_empty_sentences() {
    let script = Script {
        title: "  ".to_string(),
        sentences: vec![sentence("a", Some(1.0))],
    };
    assert!(matches!(script.validate(), Err(ReelError::Validation(_))));

    let script = Script {
        title: "title".to_string(),
        sentences: vec![],
    };
    assert!(matches!(script.validate(), Err(ReelError::Validation(_))));
}

#[test]
fn validate_rejects_negative_duration() {
    let script = Script {
        title: "title".to_string(),
        sentences: vec![sentence("a", Some(-1.0))],
    };
    assert!(matches!(script.validate(), Err(ReelError::Invariant(_))));
}

#[test]
fn resolve_edits_defaults_and_length_check() {
    let script = Script {
        title: "title".to_string(),
        sentences: vec![sentence("a", None), sentence("b", None)],
    };
    let edits = resolve_edits(&script, &[]).unwrap();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0], EditorSegment::default());

    assert!(resolve_edits(&script, &[EditorSegment::default()]).is_err());

    let bad = vec![
        EditorSegment::default(),
        EditorSegment {
            delay: -0.5,
            ..EditorSegment::default()
        },
    ];
    assert!(matches!(
        resolve_edits(&script, &bad),
        Err(ReelError::Invariant(_))
    ));
}

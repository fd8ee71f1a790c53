use super::*;

#[test]
fn partial_json_keeps_defaults() {
    let cfg = ReelConfig::from_reader(
        r#"{ "fps": 30, "title": { "max_chars_per_line": 12 } }"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.title.max_chars_per_line, 12);
    assert_eq!(cfg.title.size_px, 80.0);
    assert_eq!(cfg.canvas.width, 1080);
    assert_eq!(cfg.audio.bgm_path, None);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(ReelConfig::from_reader(r#"{ "fps": 0 }"#.as_bytes()).is_err());
    assert!(ReelConfig::from_reader(r#"{ "caption": { "size_px": -4.0 } }"#.as_bytes()).is_err());
    assert!(ReelConfig::from_reader("not json".as_bytes()).is_err());
}

#[test]
fn caption_wrap_budget_is_pre_scale() {
    let style = CaptionStyle::default();
    // (1080 - 60 - 60 - 40) / 1.2
    assert!((style.max_line_width() - 920.0 / 1.2).abs() < 1e-9);

    let unscaled = CaptionStyle {
        max_scale: 0.0,
        ..CaptionStyle::default()
    };
    assert_eq!(unscaled.max_line_width(), 920.0);
}

#[test]
fn sfx_tags_resolve_inside_sfx_dir() {
    let mix = AudioMix::default();
    assert_eq!(mix.sfx_path("whoosh"), "assets/sfx/whoosh.mp3");
    let flat = AudioMix {
        sfx_dir: String::new(),
        sfx_ext: "wav".to_string(),
        ..AudioMix::default()
    };
    assert_eq!(flat.sfx_path("pop"), "pop.wav");
}

use super::*;
use crate::{
    config::ReelConfig,
    layout::metrics::LayoutContext,
    manifest::builder::build_manifest,
    script::{EditorSegment, Script, Sentence, Vfx},
};

fn manifest() -> RenderManifest {
    let mut cfg = ReelConfig::default();
    cfg.fps = 30;
    cfg.audio.bgm_path = Some("bed.mp3".to_string());
    let script = Script {
        title: "The History of Rome".to_string(),
        sentences: vec![
            Sentence {
                text: "Rome was not built in a day.".to_string(),
                keyword: "rome".to_string(),
                image_path: "rome.jpg".to_string(),
                audio_path: "tts0.mp3".to_string(),
                duration: Some(2.0),
            },
            Sentence {
                text: "It took centuries.".to_string(),
                keyword: "ruins".to_string(),
                image_path: "ruins.jpg".to_string(),
                audio_path: "tts1.mp3".to_string(),
                duration: Some(1.0),
            },
        ],
    };
    let edits = vec![
        EditorSegment {
            vfx: Vfx::ZoomIn,
            ..EditorSegment::default()
        },
        EditorSegment {
            delay: 1.0,
            vfx: Vfx::PanRight,
            sfx: None,
        },
    ];
    build_manifest(&script, &edits, &cfg, &mut LayoutContext::without_metrics(0.6)).unwrap()
}

#[test]
fn first_and_last_image_frames_hit_motion_endpoints() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();

    let first = preview.frame(FrameIndex(0)).unwrap();
    let img = first.image.unwrap();
    assert_eq!(img.element_id, "img-0");
    assert_eq!(img.motion.scale, 1.0);
    assert_eq!(img.transform, Affine::IDENTITY);

    let last = preview.frame(FrameIndex(59)).unwrap().image.unwrap();
    assert_eq!(last.local_frame, 59);
    assert!((last.motion.scale - 1.2).abs() < 1e-12);
}

#[test]
fn transform_scales_about_the_canvas_center_then_pans() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();
    // Second slot: 60 frames of pan-right starting at 60.
    let img = preview.frame(FrameIndex(60)).unwrap().image.unwrap();
    assert_eq!(img.element_id, "img-1");
    assert_eq!(img.motion.x, -50.0);

    let center = kurbo::Point::new(540.0, 960.0);
    let mapped = img.transform * center;
    assert!((mapped.x - 490.0).abs() < 1e-9);
    assert!((mapped.y - 960.0).abs() < 1e-9);
}

#[test]
fn captions_and_narration_wait_for_the_lead_in() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();

    let during_delay = preview.frame(FrameIndex(70)).unwrap();
    assert!(during_delay.captions.is_empty());
    assert!(during_delay.audio.iter().all(|a| a.role == AudioRole::Music));

    let speaking = preview.frame(FrameIndex(95)).unwrap();
    assert_eq!(speaking.captions.len(), 1);
    assert!(speaking.captions[0].element_id.starts_with("sub-1-"));
    let tts = speaking
        .audio
        .iter()
        .find(|a| a.element_id == "tts-1")
        .unwrap();
    assert!((tts.offset_secs - 5.0 / 30.0).abs() < 1e-12);

    let bgm = speaking
        .audio
        .iter()
        .find(|a| a.role == AudioRole::Music)
        .unwrap();
    assert!((bgm.offset_secs - 95.0 / 30.0).abs() < 1e-12);
}

#[test]
fn title_is_drawn_on_every_frame() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();
    for f in [0, 45, 119] {
        let frame = preview.frame(FrameIndex(f)).unwrap();
        assert!(!frame.title.is_empty());
        assert!(frame.title.iter().any(|t| t.highlight));
    }
}

#[test]
fn frames_past_the_end_are_rejected() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();
    assert_eq!(m.metadata.total_frames, 120);
    assert!(matches!(
        preview.frame(FrameIndex(120)),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn captions_report_their_baked_color() {
    let m = manifest();
    let preview = Preview::new(&m).unwrap();
    let frame = preview.frame(FrameIndex(10)).unwrap();
    assert_eq!(frame.captions.len(), 1);
    assert_eq!(frame.captions[0].color.as_deref(), Some("#ffffffff"));
}

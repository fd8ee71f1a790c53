use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    let err = FrameRange::from_frames(5, 2).unwrap_err();
    assert!(err.to_string().contains("invariant violation"));
}

#[test]
fn empty_range_contains_nothing() {
    let r = FrameRange::from_frames(7, 7).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.len_frames(), 0);
    assert!(!r.contains(FrameIndex(7)));
}

#[test]
fn fps_conversions_use_floor_and_rounding() {
    let fps = Fps::new(60).unwrap();
    assert_eq!(fps.secs_to_frames_floor(3.5), 210);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
    assert_eq!(fps.frames_to_millis(90), 1500);
    assert_eq!(fps.frames_to_secs(30), 0.5);
    assert!(Fps::new(0).is_err());
}

#[test]
fn colors_format_for_ffmpeg_and_css() {
    let c = Rgba8::rgb(255, 214, 0);
    assert_eq!(c.to_ffmpeg(), "0xFFD600@1.000");
    assert_eq!(c.to_hex(), "#ffd600ff");
}

use super::*;

fn sentence(duration: Option<f64>) -> Sentence {
    Sentence {
        text: "text".to_string(),
        keyword: String::new(),
        image_path: "i.jpg".to_string(),
        audio_path: "a.mp3".to_string(),
        duration,
    }
}

#[test]
fn third_sentence_starts_after_two_equal_predecessors() {
    let sentences = vec![sentence(Some(3.5)); 3];
    let tl = compute_timeline(&sentences, &[0.0; 3], Fps::new(60).unwrap(), 3.0).unwrap();
    assert_eq!(tl.sentences[0].range.len_frames(), 210);
    assert_eq!(tl.sentences[2].range.start, FrameIndex(420));
    assert_eq!(tl.total_frames, 630);
}

#[test]
fn ranges_are_contiguous_from_zero() {
    let sentences = vec![
        sentence(Some(1.234)),
        sentence(None),
        sentence(Some(0.0)),
        sentence(Some(2.71)),
    ];
    let delays = [0.0, 0.25, 0.0, 1.5];
    let tl = compute_timeline(&sentences, &delays, Fps::new(30).unwrap(), 3.0).unwrap();

    assert_eq!(tl.sentences[0].range.start, FrameIndex(0));
    for pair in tl.sentences.windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start);
    }
    assert_eq!(tl.sentences.last().unwrap().range.end.0, tl.total_frames);
}

#[test]
fn missing_duration_defaults_and_delay_becomes_lead_in() {
    let tl = compute_timeline(&[sentence(None)], &[0.5], Fps::new(60).unwrap(), 3.0).unwrap();
    let t = tl.sentences[0];
    assert_eq!(t.range, FrameRange::from_frames(0, 210).unwrap());
    assert_eq!(t.narration, FrameRange::from_frames(30, 210).unwrap());
}

#[test]
fn zero_length_sentence_is_legal() {
    let tl = compute_timeline(
        &[sentence(Some(0.0)), sentence(Some(1.0))],
        &[0.0, 0.0],
        Fps::new(24).unwrap(),
        3.0,
    )
    .unwrap();
    assert!(tl.sentences[0].range.is_empty());
    assert_eq!(tl.sentences[1].range, FrameRange::from_frames(0, 24).unwrap());
}

#[test]
fn negative_inputs_are_invariant_violations() {
    let fps = Fps::new(30).unwrap();
    assert!(matches!(
        compute_timeline(&[sentence(Some(-1.0))], &[0.0], fps, 3.0),
        Err(ReelError::Invariant(_))
    ));
    assert!(matches!(
        compute_timeline(&[sentence(Some(1.0))], &[-0.1], fps, 3.0),
        Err(ReelError::Invariant(_))
    ));
    assert!(compute_timeline(&[sentence(Some(1.0))], &[], fps, 3.0).is_err());
}

#[test]
fn timing_is_deterministic() {
    let sentences = vec![sentence(Some(2.2)), sentence(Some(3.3))];
    let fps = Fps::new(60).unwrap();
    let a = compute_timeline(&sentences, &[0.1, 0.2], fps, 3.0).unwrap();
    let b = compute_timeline(&sentences, &[0.1, 0.2], fps, 3.0).unwrap();
    assert_eq!(a, b);
}

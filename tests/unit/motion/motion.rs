use super::*;

fn cfg() -> MotionConfig {
    MotionConfig {
        start_scale: 1.0,
        end_scale: 1.2,
        pan_offset: 50.0,
    }
}

#[test]
fn vfx_tags_map_to_expected_tuples() {
    let c = cfg();
    let zi = KenBurns::for_vfx(Vfx::ZoomIn, &c);
    assert_eq!((zi.from_scale, zi.to_scale, zi.from_x, zi.to_x), (1.0, 1.2, 0.0, 0.0));

    let zo = KenBurns::for_vfx(Vfx::ZoomOut, &c);
    assert_eq!((zo.from_scale, zo.to_scale), (1.2, 1.0));

    let pl = KenBurns::for_vfx(Vfx::PanLeft, &c);
    assert_eq!((pl.from_scale, pl.to_scale, pl.from_x, pl.to_x), (1.2, 1.2, 50.0, -50.0));

    let pr = KenBurns::for_vfx(Vfx::PanRight, &c);
    assert_eq!((pr.from_x, pr.to_x), (-50.0, 50.0));

    assert_eq!(KenBurns::for_vfx(Vfx::Shake, &c), KenBurns::STATIC);
    assert_eq!(KenBurns::for_vfx(Vfx::parse("wobble"), &c), KenBurns::STATIC);
}

#[test]
fn sample_interpolates_and_clamps() {
    let kb = KenBurns::for_vfx(Vfx::PanRight, &cfg());
    assert_eq!(kb.sample(0, 11).x, -50.0);
    assert_eq!(kb.sample(5, 11).x, 0.0);
    assert_eq!(kb.sample(10, 11).x, 50.0);
    assert_eq!(kb.sample(400, 11).x, 50.0);
    assert_eq!(kb.sample(3, 11).scale, 1.2);
}

#[test]
fn progress_handles_degenerate_lengths() {
    assert_eq!(progress(0, 0), 0.0);
    assert_eq!(progress(0, 1), 0.0);
    assert_eq!(progress(1, 1), 1.0);
    assert_eq!(progress(1, 3), 0.5);
}

#[test]
fn tuple_serializes_with_camel_case_keys() {
    let v = serde_json::to_value(KenBurns::STATIC).unwrap();
    for key in ["fromScale", "toScale", "fromX", "toX", "fromY", "toY"] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
}

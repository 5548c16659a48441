use superres_core::frame::Displacement;
use superres_core::superres::{quantize, quantize_all, CoarseShift, Phase};

#[test]
fn test_zero_displacement_lands_on_first_phase() {
    let q = quantize(&Displacement::default(), 4);
    assert_eq!(q.phase, Phase { x: 4, y: 4 });
    assert_eq!(q.coarse_shift, CoarseShift { x: 0, y: 0 });
}

#[test]
fn test_fractional_displacement() {
    // 0.3 * 4 = 1.2 -> 1; -0.3 * 4 = -1.2 -> -1
    let q = quantize(&Displacement::new(0.3, -0.3), 4);
    assert_eq!(q.phase, Phase { x: 5, y: 7 });
    assert_eq!(q.coarse_shift, CoarseShift { x: 0, y: -1 });
}

#[test]
fn test_negative_displacement_uses_floor_mod() {
    // 1.6 * 2 = 3.2 -> 3; -2.5 * 2 = -5
    let q = quantize(&Displacement::new(1.6, -2.5), 2);
    assert_eq!(q.coarse_shift, CoarseShift { x: 1, y: -3 });
    assert_eq!(q.phase, Phase { x: 3, y: 3 });
}

#[test]
fn test_half_rounds_away_from_zero() {
    let q = quantize(&Displacement::new(0.125, -0.125), 4);
    assert_eq!(q.phase, Phase { x: 5, y: 7 });
    assert_eq!(q.coarse_shift, CoarseShift { x: 0, y: -1 });
}

#[test]
fn test_round_trip_identity() {
    for scale in 1..=5usize {
        let s = scale as i64;
        for step in -40..=40 {
            let d = step as f64 * 0.13;
            let q = quantize(&Displacement::new(d, -d * 0.7), scale);
            for (value, phase, coarse) in [
                (d, q.phase.x, q.coarse_shift.x),
                (-d * 0.7, q.phase.y, q.coarse_shift.y),
            ] {
                let rounded = (value * scale as f64).round() as i64;
                let rem = rounded.rem_euclid(s);
                assert!((scale..2 * scale).contains(&phase), "phase {phase} for s={scale}");
                assert_eq!(phase as i64 - s, rem);
                assert_eq!(coarse * s + rem, rounded);
            }
        }
    }
}

#[test]
fn test_scale_one_collapses_phase() {
    let displacements = [
        Displacement::new(0.0, 0.0),
        Displacement::new(2.4, -1.6),
        Displacement::new(-0.5, 0.49),
    ];
    let quantized = quantize_all(&displacements, 1);
    assert_eq!(quantized.len(), 3);
    for q in &quantized {
        assert_eq!(q.phase, Phase { x: 1, y: 1 });
    }
    assert_eq!(quantized[1].coarse_shift, CoarseShift { x: 2, y: -2 });
    assert_eq!(quantized[2].coarse_shift, CoarseShift { x: -1, y: 0 });
}

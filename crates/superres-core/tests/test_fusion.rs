mod common;

use approx::assert_abs_diff_eq;
use superres_core::error::SuperResError;
use superres_core::frame::Frame;
use superres_core::superres::{fuse, lattice_dims, Phase};

use common::{make_frame, ramp_frame};

const P22: Phase = Phase { x: 2, y: 2 };
const P32: Phase = Phase { x: 3, y: 2 };
const P23: Phase = Phase { x: 2, y: 3 };
const P33: Phase = Phase { x: 3, y: 3 };

#[test]
fn test_lattice_dims_formula() {
    assert_eq!(lattice_dims(8, 8, 2), (17, 17));
    assert_eq!(lattice_dims(3, 5, 4), (15, 23));
    assert_eq!(lattice_dims(6, 9, 1), (6, 9));
}

#[test]
fn test_scale_one_is_plain_median() {
    let frames = vec![
        ramp_frame(5, 4, 0.0),
        ramp_frame(5, 4, 20.0),
        ramp_frame(5, 4, 10.0),
    ];
    let phases = vec![Phase { x: 1, y: 1 }; 3];
    let lattice = fuse(&frames, &phases, 1).unwrap();

    assert_eq!(lattice.z.dim(), (5, 4));
    assert!(lattice.empty_phases.is_empty());
    for ((r, c), &v) in lattice.z.indexed_iter() {
        assert_eq!(v, frames[2].data[[r, c]]);
        assert_abs_diff_eq!(lattice.confidence[[r, c]], 3.0f32.sqrt(), epsilon = 1e-6);
    }
}

#[test]
fn test_zero_motion_fills_first_phase() {
    let frames: Vec<Frame> = (0..4).map(|_| make_frame(8, 8, 100.0)).collect();
    let lattice = fuse(&frames, &[P22; 4], 2).unwrap();

    assert_eq!(lattice.z.dim(), (17, 17));
    assert_eq!(lattice.active_phases, vec![P22]);
    assert_eq!(lattice.empty_phases.len(), 3);

    for r in 0..17 {
        for c in 0..17 {
            let populated = r % 2 == 1 && c % 2 == 1 && r < 16 && c < 16;
            if populated {
                assert_eq!(lattice.z[[r, c]], 100.0);
                assert_abs_diff_eq!(lattice.confidence[[r, c]], 2.0, epsilon = 1e-6);
            } else {
                assert_eq!(lattice.confidence[[r, c]], 1.0);
            }
            // Row 0 and column 0 lie before the first phase offset.
            let expected = if r == 0 || c == 0 { 0.0 } else { 100.0 };
            assert_eq!(lattice.z[[r, c]], expected, "at ({r}, {c})");
        }
    }
}

#[test]
fn test_zero_phase_matches_plain_median() {
    let frames = vec![
        ramp_frame(4, 4, 3.0),
        ramp_frame(4, 4, -1.0),
        ramp_frame(4, 4, 7.0),
    ];
    let lattice = fuse(&frames, &[P22; 3], 2).unwrap();
    for r in 0..4 {
        for c in 0..4 {
            assert_eq!(lattice.z[[2 * r + 1, 2 * c + 1]], frames[0].data[[r, c]]);
        }
    }
}

#[test]
fn test_phase_offsets_scatter_median_by_integer_division() {
    let a = ramp_frame(4, 4, 0.0);
    let b = ramp_frame(4, 4, 100.0);
    let lattice = fuse(&[a.clone(), b.clone()], &[P22, P33], 2).unwrap();

    // Phase (2, 2) starts at lattice (1, 1), phase (3, 3) at (2, 2).
    assert_eq!(lattice.z[[1, 1]], a.data[[0, 0]]);
    assert_eq!(lattice.z[[3, 5]], a.data[[1, 2]]);
    assert_eq!(lattice.z[[7, 7]], a.data[[3, 3]]);
    assert_eq!(lattice.z[[2, 2]], b.data[[1, 1]]);
    assert_eq!(lattice.z[[6, 4]], b.data[[3, 2]]);
    assert_eq!(lattice.empty_phases, vec![P23, P32]);
}

#[test]
fn test_hole_fill_uses_neighbourhood_median() {
    let frames: Vec<Frame> = (0..3).map(|_| make_frame(8, 8, 50.0)).collect();
    let lattice = fuse(&frames, &[P22, P32, P23], 2).unwrap();

    assert_eq!(lattice.empty_phases, vec![P33]);
    // Every interior hole has eight populated neighbours.
    for r in (2..=14).step_by(2) {
        for c in (2..=14).step_by(2) {
            assert_eq!(lattice.z[[r, c]], 50.0, "hole at ({r}, {c})");
            assert_eq!(lattice.confidence[[r, c]], 1.0);
        }
    }
}

#[test]
fn test_confidence_grows_with_sample_count() {
    let mut frames = vec![make_frame(6, 6, 1.0)];
    frames.extend((0..4).map(|_| make_frame(6, 6, 1.0)));
    let phases = vec![P22, P33, P33, P33, P33];
    let lattice = fuse(&frames, &phases, 2).unwrap();

    let single = lattice.confidence[[1, 1]];
    let four = lattice.confidence[[2, 2]];
    assert_abs_diff_eq!(single, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(four, 2.0, epsilon = 1e-6);
    assert!(single < four);
    assert!(lattice.confidence.iter().all(|&a| a >= 0.0));
}

#[test]
fn test_fusion_is_deterministic() {
    let frames: Vec<Frame> = (0..7).map(|i| ramp_frame(9, 7, i as f32 * 3.5)).collect();
    let phases = vec![P22, P33, P33, P32, P22, P22, P33];
    let first = fuse(&frames, &phases, 2).unwrap();
    let second = fuse(&frames, &phases, 2).unwrap();
    assert_eq!(first.z, second.z);
    assert_eq!(first.confidence, second.confidence);
}

#[test]
fn test_single_frame_is_valid() {
    let frames = vec![ramp_frame(5, 5, 1.0)];
    let lattice = fuse(&frames, &[Phase { x: 3, y: 3 }], 3).unwrap();
    assert_eq!(lattice.active_phases.len(), 1);
    assert_eq!(lattice.empty_phases.len(), 8);

    // Phase (3, 3) populates lattice rows/cols 2, 5, 8, 11 and 14 with
    // ramp(r / 3, c / 3); holes take the nearest populated cells.
    let ramp = |r: usize, c: usize| (r * 5 + c) as f32 + 1.0;
    assert_eq!(lattice.z[[2, 2]], ramp(0, 0));
    assert_eq!(lattice.z[[3, 3]], ramp(0, 0));
    assert_eq!(lattice.z[[3, 4]], ramp(0, 1));
    assert_eq!(lattice.z[[16, 16]], ramp(4, 4));
    assert_eq!(lattice.z[[15, 9]], ramp(4, 2));
    for r in 2..17 {
        for c in 2..17 {
            assert!(lattice.z[[r, c]] >= 1.0, "hole at ({r}, {c}) left unset");
        }
    }
}

#[test]
fn test_single_active_phase_averages_equidistant_neighbours() {
    let frames = vec![ramp_frame(4, 4, 0.0)];
    let lattice = fuse(&frames, &[P22], 2).unwrap();
    let z = &lattice.z;
    // (2, 1) sits between populated (1, 1) and (3, 1).
    assert_eq!(z[[2, 1]], (z[[1, 1]] + z[[3, 1]]) / 2.0);
    // (2, 2) sees four populated diagonals.
    let corners = [z[[1, 1]], z[[1, 3]], z[[3, 1]], z[[3, 3]]];
    assert_eq!(z[[2, 2]], (corners[1] + corners[2]) / 2.0);
}

#[test]
fn test_multi_phase_hole_fill_keeps_plain_median() {
    // Two diagonal phases: a hole sees at most four populated cells in its
    // 3x3 window, so the median over the whole lattice stays 0.
    let frames: Vec<Frame> = (0..2).map(|_| make_frame(6, 6, 9.0)).collect();
    let lattice = fuse(&frames, &[P22, P33], 2).unwrap();
    assert_eq!(lattice.empty_phases, vec![P23, P32]);
    assert_eq!(lattice.z[[1, 2]], 0.0);
    assert_eq!(lattice.z[[2, 1]], 0.0);
}

#[test]
fn test_empty_input_error() {
    let frames: Vec<Frame> = vec![];
    assert!(matches!(
        fuse(&frames, &[], 2),
        Err(SuperResError::EmptySequence)
    ));
}

#[test]
fn test_dimension_mismatch_error() {
    let frames = vec![make_frame(4, 4, 1.0), make_frame(4, 5, 1.0)];
    assert!(matches!(
        fuse(&frames, &[P22, P33], 2),
        Err(SuperResError::DimensionMismatch { index: 1, .. })
    ));
}

#[test]
fn test_no_active_phase_error() {
    let frames = vec![make_frame(4, 4, 1.0)];
    assert!(matches!(
        fuse(&frames, &[Phase { x: 0, y: 0 }], 2),
        Err(SuperResError::NoActivePhase)
    ));
}

#[test]
fn test_phase_count_mismatch_error() {
    let frames = vec![make_frame(4, 4, 1.0), make_frame(4, 4, 1.0)];
    assert!(matches!(
        fuse(&frames, &[P22], 2),
        Err(SuperResError::CountMismatch { .. })
    ));
}

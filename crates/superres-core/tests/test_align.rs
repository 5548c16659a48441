mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use superres_core::align::subpixel::refine_peak_paraboloid;
use superres_core::align::{registration_for, Centroid, PhaseCorrelation, Registration};
use superres_core::error::SuperResError;
use superres_core::frame::{Displacement, Frame};
use superres_core::pipeline::config::{CentroidConfig, RegistrationMethod};

use common::{blob_frame, make_frame};

#[test]
fn test_phase_correlation_integer_shift() {
    let reference = blob_frame(32, 32, 16.0, 16.0, 3.0);
    let target = blob_frame(32, 32, 14.0, 19.0, 3.0);
    let d = PhaseCorrelation.displacement(&reference, &target).unwrap();
    assert!((d.dx - 3.0).abs() < 0.5, "dx = {}", d.dx);
    assert!((d.dy + 2.0).abs() < 0.5, "dy = {}", d.dy);
}

#[test]
fn test_phase_correlation_identical_frames() {
    let frame = blob_frame(24, 20, 11.0, 9.0, 2.5);
    let d = PhaseCorrelation.displacement(&frame, &frame).unwrap();
    assert_eq!(d, Displacement::default());
}

#[test]
fn test_phase_correlation_rejects_size_mismatch() {
    let a = make_frame(16, 16, 0.5);
    let b = make_frame(16, 12, 0.5).with_index(4);
    let result = PhaseCorrelation.displacement(&a, &b);
    assert!(matches!(
        result,
        Err(SuperResError::DimensionMismatch { index: 4, .. })
    ));
}

#[test]
fn test_centroid_displacement() {
    let reference = blob_frame(32, 32, 10.0, 10.0, 2.0);
    let target = blob_frame(32, 32, 12.0, 13.0, 2.0);
    let d = Centroid::new(0.1).displacement(&reference, &target).unwrap();
    assert_abs_diff_eq!(d.dx, 3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(d.dy, 2.0, epsilon = 1e-3);
}

#[test]
fn test_centroid_black_frames_do_not_move() {
    let a = make_frame(8, 8, 0.0);
    let d = Centroid::new(0.1).displacement(&a, &a).unwrap();
    assert_eq!(d, Displacement::default());
}

#[test]
fn test_register_pins_reference_to_origin() {
    let frames = vec![
        blob_frame(32, 32, 16.0, 16.0, 2.0),
        blob_frame(32, 32, 17.0, 16.0, 2.0),
        blob_frame(32, 32, 16.0, 14.0, 2.0),
    ];
    let method = RegistrationMethod::Centroid(CentroidConfig::default());
    let displacements = registration_for(&method).register(&frames).unwrap();

    assert_eq!(displacements.len(), 3);
    assert_eq!(displacements[0], Displacement::default());
    assert_abs_diff_eq!(displacements[1].dy, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(displacements[1].dx, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(displacements[2].dx, -2.0, epsilon = 1e-3);
}

#[test]
fn test_register_empty_sequence() {
    let frames: Vec<Frame> = vec![];
    assert!(matches!(
        PhaseCorrelation.register(&frames),
        Err(SuperResError::EmptySequence)
    ));
}

#[test]
fn test_paraboloid_leans_toward_larger_neighbour() {
    let mut corr = Array2::<f64>::zeros((5, 5));
    corr[[2, 2]] = 1.0;
    corr[[2, 1]] = 0.5;
    corr[[2, 3]] = 0.75;
    corr[[1, 2]] = 0.6;
    corr[[3, 2]] = 0.6;
    let (dr, dc) = refine_peak_paraboloid(&corr, 2, 2);
    assert_abs_diff_eq!(dr, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dc, 1.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_paraboloid_skips_border_peaks() {
    let corr = Array2::<f64>::ones((4, 4));
    assert_eq!(refine_peak_paraboloid(&corr, 0, 2), (0.0, 0.0));
    assert_eq!(refine_peak_paraboloid(&corr, 2, 3), (0.0, 0.0));
}

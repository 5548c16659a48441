use ndarray::{Array2, Axis};
use num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

use super::subpixel::refine_peak_paraboloid;
use super::{check_same_size, Registration};
use crate::error::Result;
use crate::frame::{Displacement, Frame};

/// Translation estimate from the normalized cross-power spectrum.
///
/// Both frames are Hann-windowed before the transform; the integer peak of
/// the correlation surface is refined with a 3x3 paraboloid fit.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseCorrelation;

impl Registration for PhaseCorrelation {
    fn displacement(&self, reference: &Frame, target: &Frame) -> Result<Displacement> {
        check_same_size(reference, target)?;
        Ok(correlate_displacement(&reference.data, &target.data))
    }
}

fn correlate_displacement(reference: &Array2<f32>, target: &Array2<f32>) -> Displacement {
    let (h, w) = reference.dim();

    let mut ref_spec = to_complex_windowed(reference);
    let mut tgt_spec = to_complex_windowed(target);
    fft2d(&mut ref_spec, FftDirection::Forward);
    fft2d(&mut tgt_spec, FftDirection::Forward);

    // T * conj(R) peaks at the content motion itself.
    let mut cross = ndarray::Zip::from(&tgt_spec)
        .and(&ref_spec)
        .map_collect(|&t, &r| {
            let c = t * r.conj();
            let mag = c.norm();
            if mag > 1e-12 {
                c / mag
            } else {
                Complex::new(0.0, 0.0)
            }
        });
    fft2d(&mut cross, FftDirection::Inverse);
    let correlation = cross.mapv(|c| c.re / (h * w) as f64);

    let (peak_row, peak_col) = find_peak(&correlation);
    let dy = wrap_signed(peak_row, h);
    let dx = wrap_signed(peak_col, w);
    let (sub_dy, sub_dx) = refine_peak_paraboloid(&correlation, peak_row, peak_col);

    Displacement {
        dx: dx + sub_dx,
        dy: dy + sub_dy,
    }
}

fn wrap_signed(index: usize, len: usize) -> f64 {
    if index > len / 2 {
        index as f64 - len as f64
    } else {
        index as f64
    }
}

fn to_complex_windowed(data: &Array2<f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let hann = |i: usize, n: usize| 0.5 * (1.0 - (std::f64::consts::TAU * i as f64 / n as f64).cos());
    Array2::from_shape_fn((h, w), |(row, col)| {
        let weight = hann(row, h) * hann(col, w);
        Complex::new(data[[row, col]] as f64 * weight, 0.0)
    })
}

/// Separable 2D FFT in place: every row, then every column. Unnormalized.
fn fft2d(data: &mut Array2<Complex<f64>>, direction: FftDirection) {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let row_fft = planner.plan_fft(w, direction);
    let col_fft = planner.plan_fft(h, direction);

    let mut buffer = Vec::with_capacity(h.max(w));
    for (axis, fft) in [(Axis(1), &row_fft), (Axis(0), &col_fft)] {
        for mut lane in data.lanes_mut(axis) {
            buffer.clear();
            buffer.extend(lane.iter().copied());
            fft.process(&mut buffer);
            lane.iter_mut().zip(&buffer).for_each(|(dst, src)| *dst = *src);
        }
    }
}

fn find_peak(data: &Array2<f64>) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_val = f64::NEG_INFINITY;
    for ((row, col), &val) in data.indexed_iter() {
        if val > best_val {
            best_val = val;
            best = (row, col);
        }
    }
    best
}

use std::borrow::Borrow;

use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{PARALLEL_FRAME_THRESHOLD, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, SuperResError};
use crate::frame::Frame;

/// Pixelwise median across a set of equally sized frames.
///
/// Accepts owned frames or references so callers can median a selected
/// subset without cloning. Even sample counts average the two middle values.
/// Parallelizes at the row level for images >= 256x256.
pub fn median_stack<F>(frames: &[F]) -> Result<Array2<f32>>
where
    F: Borrow<Frame> + Sync,
{
    let Some(first) = frames.first() else {
        return Err(SuperResError::EmptySequence);
    };
    let (h, w) = first.borrow().data.dim();
    for (index, frame) in frames.iter().enumerate() {
        let frame = frame.borrow();
        if frame.data.dim() != (h, w) {
            return Err(SuperResError::DimensionMismatch {
                index,
                width: w,
                height: h,
                found_width: frame.width(),
                found_height: frame.height(),
            });
        }
    }

    let n = frames.len();
    let median_row = |row: usize| -> Vec<f32> {
        let mut pixel_values = vec![0.0f32; n];
        (0..w)
            .map(|col| {
                for (i, frame) in frames.iter().enumerate() {
                    pixel_values[i] = frame.borrow().data[[row, col]];
                }
                compute_median(&mut pixel_values)
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD && n >= PARALLEL_FRAME_THRESHOLD
    {
        (0..h).into_par_iter().map(median_row).collect()
    } else {
        (0..h).map(median_row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    Ok(result)
}

/// Median of a non-empty sample set, reordering `pixel_values` in place.
///
/// Uses `select_nth_unstable` for O(n) median without full sort.
pub(crate) fn compute_median(pixel_values: &mut [f32]) -> f32 {
    let n = pixel_values.len();
    debug_assert!(n > 0, "median of an empty sample set");
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        pixel_values[0]
    } else if n % 2 == 1 {
        let mid = n / 2;
        *pixel_values
            .select_nth_unstable_by(mid, |a, b| a.total_cmp(b))
            .1
    } else {
        let mid = n / 2;
        pixel_values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        pixel_values[..mid].select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b));
        (pixel_values[mid - 1] + pixel_values[mid]) / 2.0
    }
}

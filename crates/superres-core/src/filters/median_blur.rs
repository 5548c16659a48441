use ndarray::Array2;

use super::border::Border;
use super::fill_indexed;
use crate::stack::median::compute_median;

/// Square median filter with replicated borders.
///
/// `window` is the side length and is expected to be odd.
pub fn median_blur(data: &Array2<f32>, window: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = (window / 2) as isize;
    let mut out = Array2::<f32>::zeros((h, w));

    fill_indexed(&mut out, |row, col| {
        let mut samples = Vec::with_capacity(window * window);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let r = Border::Replicate.resolve(row as isize + dy, h).unwrap_or(row);
                let c = Border::Replicate.resolve(col as isize + dx, w).unwrap_or(col);
                samples.push(data[[r, c]]);
            }
        }
        compute_median(&mut samples)
    });

    out
}

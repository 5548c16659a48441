pub mod border;
pub mod convolve;
pub mod kernel;
pub mod median_blur;
pub mod sign;

use ndarray::{Array2, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Fill `out` with `f(row, col)`, in parallel for large grids.
pub(crate) fn fill_indexed<F>(out: &mut Array2<f32>, f: F)
where
    F: Fn(usize, usize) -> f32 + Sync + Send,
{
    let (h, w) = out.dim();
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        Zip::indexed(out).par_for_each(|(row, col), v| *v = f(row, col));
    } else {
        Zip::indexed(out).for_each(|(row, col), v| *v = f(row, col));
    }
}

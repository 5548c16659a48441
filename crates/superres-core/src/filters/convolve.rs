use ndarray::Array2;

use super::border::Border;
use super::fill_indexed;

/// 2D correlation of `data` with `kernel`, anchored at the kernel centre.
///
/// `out[r, c] = sum k[a, b] * data[r + a - ay, c + b - ax]` with
/// `(ay, ax) = (kh / 2, kw / 2)`. Correlation and convolution coincide for
/// symmetric kernels; use [`super::kernel::flip_kernel`] for the adjoint.
pub fn correlate2d(data: &Array2<f32>, kernel: &Array2<f32>, border: Border) -> Array2<f32> {
    let (h, w) = data.dim();
    let (kh, kw) = kernel.dim();
    let (ay, ax) = ((kh / 2) as isize, (kw / 2) as isize);
    let mut out = Array2::<f32>::zeros((h, w));

    fill_indexed(&mut out, |row, col| {
        let mut sum = 0.0f32;
        for ki in 0..kh {
            let Some(src_row) = border.resolve(row as isize + ki as isize - ay, h) else {
                continue;
            };
            for kj in 0..kw {
                let Some(src_col) = border.resolve(col as isize + kj as isize - ax, w) else {
                    continue;
                };
                sum += data[[src_row, src_col]] * kernel[[ki, kj]];
            }
        }
        sum
    });

    out
}

/// Sample `data` displaced by `(dx, dy)`: `out[r, c] = data[r - dy, c - dx]`.
///
/// Out-of-range samples follow `border` (zero for [`Border::Zero`]).
pub fn shifted(data: &Array2<f32>, dx: isize, dy: isize, border: Border) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut out = Array2::<f32>::zeros((h, w));
    fill_indexed(&mut out, |row, col| {
        match (
            border.resolve(row as isize - dy, h),
            border.resolve(col as isize - dx, w),
        ) {
            (Some(r), Some(c)) => data[[r, c]],
            _ => 0.0,
        }
    });
    out
}

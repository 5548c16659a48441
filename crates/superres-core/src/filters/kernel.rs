use ndarray::Array2;

use crate::error::{Result, SuperResError};

/// Build a normalized `size x size` Gaussian point-spread kernel.
///
/// The kernel is the outer product of two sampled 1D Gaussians centred on
/// `(size - 1) / 2`, so even sizes are supported as well. Sums to 1.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Result<Array2<f32>> {
    if size == 0 {
        return Err(SuperResError::InvalidKernel(
            "kernel size must be positive".into(),
        ));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SuperResError::InvalidKernel(format!(
            "sigma must be positive and finite, got {sigma}"
        )));
    }

    let taps = gaussian_taps(size, sigma);
    let mut kernel = Array2::<f64>::zeros((size, size));
    for (row, &ky) in taps.iter().enumerate() {
        for (col, &kx) in taps.iter().enumerate() {
            kernel[[row, col]] = ky * kx;
        }
    }

    let sum = kernel.sum();
    Ok(kernel.mapv(|v| (v / sum) as f32))
}

fn gaussian_taps(size: usize, sigma: f64) -> Vec<f64> {
    let center = (size as f64 - 1.0) / 2.0;
    let s2 = 2.0 * sigma * sigma;
    let mut taps: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    for v in &mut taps {
        *v /= sum;
    }
    taps
}

/// Rotate a kernel by 180 degrees.
pub fn flip_kernel(kernel: &Array2<f32>) -> Array2<f32> {
    let (h, w) = kernel.dim();
    Array2::from_shape_fn((h, w), |(row, col)| kernel[[h - 1 - row, w - 1 - col]])
}

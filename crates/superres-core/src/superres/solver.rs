use ndarray::{Array2, Zip};
use tracing::debug;

use super::fusion::Lattice;
use crate::error::{Result, SuperResError};
use crate::filters::border::Border;
use crate::filters::convolve::{correlate2d, shifted};
use crate::filters::kernel::flip_kernel;
use crate::filters::sign::sign;
use crate::pipeline::config::{BtvForm, ReconstructionParams};

/// Result of the gradient-descent refinement.
#[derive(Clone, Debug)]
pub struct SolverOutput {
    pub image: Array2<f32>,
    /// Number of gradient updates applied (`max_iterations - 1`).
    pub iterations: usize,
}

/// Refine a fused lattice into the final high-resolution estimate.
pub fn reconstruct(
    lattice: Lattice,
    psf: &Array2<f32>,
    params: &ReconstructionParams,
) -> Result<SolverOutput> {
    reconstruct_with_progress(lattice, psf, params, |_| {})
}

/// Like [`reconstruct`], calling `on_step` after every gradient update.
///
/// The fused lattice counts as the first iteration, so exactly
/// `max_iterations - 1` updates run. There is no convergence test.
pub fn reconstruct_with_progress<F>(
    lattice: Lattice,
    psf: &Array2<f32>,
    params: &ReconstructionParams,
    mut on_step: F,
) -> Result<SolverOutput>
where
    F: FnMut(usize),
{
    if params.max_iterations == 0 {
        return Err(SuperResError::InvalidIterationCount(params.max_iterations));
    }
    if psf.is_empty() {
        return Err(SuperResError::InvalidKernel("kernel is empty".into()));
    }

    let Lattice { z, confidence, .. } = lattice;
    let flipped = flip_kernel(psf);
    let beta = params.beta as f32;
    let lambda = params.lambda as f32;

    let mut hr = z.clone();
    let mut iterations = 0;

    for step in 1..params.max_iterations {
        let mut gradient = data_gradient(&hr, &z, &confidence, psf, &flipped);
        if lambda != 0.0 {
            let reg = regularization_gradient(&hr, params.radius, params.alpha, params.regularizer);
            gradient.scaled_add(lambda, &reg);
        }
        hr.scaled_add(-beta, &gradient);

        iterations += 1;
        on_step(step);
    }

    debug!(iterations, "Reconstruction finished");
    Ok(SolverOutput {
        image: hr,
        iterations,
    })
}

/// Robust back-projection gradient of the L1 data term.
///
/// `flip(psf) ⋆ (A · sign(A · (psf ⋆ hr - z)))`, reflect borders throughout.
/// Only the sign of the weighted residual propagates, so outliers cannot
/// dominate the update.
pub fn data_gradient(
    hr: &Array2<f32>,
    z: &Array2<f32>,
    confidence: &Array2<f32>,
    psf: &Array2<f32>,
    flipped_psf: &Array2<f32>,
) -> Array2<f32> {
    let blurred = correlate2d(hr, psf, Border::Reflect);
    let weighted = Zip::from(&blurred)
        .and(z)
        .and(confidence)
        .map_collect(|&b, &zv, &a| a * sign(a * (b - zv)));
    correlate2d(&weighted, flipped_psf, Border::Reflect)
}

/// Bilateral total-variation gradient over a `(2P+1)^2` neighbourhood.
///
/// For each offset `(i, j)` (columns, rows) the sign of `hr` minus its
/// reflected shift is differenced against its own zero-padded back-shift,
/// weighted by `alpha^(|i|+|j|)`. Offsets accumulate in a fixed order.
pub fn regularization_gradient(
    hr: &Array2<f32>,
    radius: usize,
    alpha: f64,
    form: BtvForm,
) -> Array2<f32> {
    let p = radius as isize;
    let mut gradient = Array2::<f32>::zeros(hr.dim());

    for i in -p..=p {
        for j in -p..=p {
            if i == 0 && j == 0 {
                continue;
            }
            let neighbour = shifted(hr, i, j, Border::Reflect);
            let signs = Zip::from(hr)
                .and(&neighbour)
                .map_collect(|&a, &b| sign(a - b));
            let back = shifted(&signs, -i, -j, Border::Zero);
            let weight = alpha.powi((i.abs() + j.abs()) as i32) as f32;

            Zip::from(&mut gradient)
                .and(&signs)
                .and(&back)
                .for_each(|g, &s, &t| {
                    let term = match form {
                        BtvForm::Sign => sign(s - t),
                        BtvForm::Difference => s - t,
                    };
                    *g += weight * term;
                });
        }
    }

    gradient
}

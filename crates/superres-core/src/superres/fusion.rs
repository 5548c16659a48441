use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use super::quantize::Phase;
use crate::consts::HOLE_FILL_WINDOW;
use crate::error::{Result, SuperResError};
use crate::filters::fill_indexed;
use crate::filters::median_blur::median_blur;
use crate::frame::Frame;
use crate::stack::median::{compute_median, median_stack};

/// Fused high-resolution lattice handed from fusion to the solver.
#[derive(Clone, Debug)]
pub struct Lattice {
    /// Fused intensity, shape `((H+1)s-1, (W+1)s-1)`.
    pub z: Array2<f32>,
    /// Confidence weight: square root of the contributing frame count, 1 where unset.
    pub confidence: Array2<f32>,
    pub scale: usize,
    /// Phases that received at least one frame, in scan order.
    pub active_phases: Vec<Phase>,
    /// Phases that received no frame and were hole-filled.
    pub empty_phases: Vec<Phase>,
}

impl Lattice {
    pub fn height(&self) -> usize {
        self.z.nrows()
    }

    pub fn width(&self) -> usize {
        self.z.ncols()
    }
}

/// Lattice shape `(rows, cols)` for a `height x width` reference frame.
pub fn lattice_dims(height: usize, width: usize, scale: usize) -> (usize, usize) {
    ((height + 1) * scale - 1, (width + 1) * scale - 1)
}

/// Fuse realigned frames onto the upsampled lattice.
///
/// Frames sharing a phase are reduced to their pixelwise median and written
/// at every `s`-th lattice row/column starting at `phase - 1`; lattice cell
/// `(r, c)` takes the median at `(r / s, c / s)`.
///
/// Phases with no frame are hole-filled. With two or more active phases the
/// holes take a 3x3 median (replicate border) of the whole lattice. With a
/// single active phase, which is what a static or single-frame sequence
/// produces, a 3x3 window holds mostly unset zeros, so each hole instead takes
/// the median of the populated cells in the smallest square window around it
/// that contains any. Rows and columns below `s - 1` belong to no phase and
/// stay 0.
pub fn fuse(frames: &[Frame], phases: &[Phase], scale: usize) -> Result<Lattice> {
    let Some(reference) = frames.first() else {
        return Err(SuperResError::EmptySequence);
    };
    if frames.len() != phases.len() {
        return Err(SuperResError::CountMismatch {
            frames: frames.len(),
            displacements: phases.len(),
        });
    }
    if scale == 0 {
        return Err(SuperResError::InvalidScale(scale));
    }

    let (lr_h, lr_w) = reference.data.dim();
    for (index, frame) in frames.iter().enumerate() {
        if frame.data.dim() != (lr_h, lr_w) {
            return Err(SuperResError::DimensionMismatch {
                index,
                width: lr_w,
                height: lr_h,
                found_width: frame.width(),
                found_height: frame.height(),
            });
        }
    }

    let dims = lattice_dims(lr_h, lr_w, scale);
    let mut z = Array2::<f32>::zeros(dims);
    let mut confidence = Array2::<f32>::ones(dims);
    let mut populated = Array2::<bool>::from_elem(dims, false);

    let all_phases: Vec<Phase> = (scale..2 * scale)
        .flat_map(|x| (scale..2 * scale).map(move |y| Phase { x, y }))
        .collect();

    // Phases are independent; medians run in parallel and scatter in scan order.
    let medians: Vec<Option<(Array2<f32>, usize)>> = all_phases
        .par_iter()
        .map(|phase| {
            let selected: Vec<&Frame> = frames
                .iter()
                .zip(phases)
                .filter(|(_, p)| *p == phase)
                .map(|(f, _)| f)
                .collect();
            if selected.is_empty() {
                return Ok(None);
            }
            median_stack(&selected).map(|m| Some((m, selected.len())))
        })
        .collect::<Result<_>>()?;

    let mut active_phases = Vec::new();
    let mut empty_phases = Vec::new();

    for (phase, fused) in all_phases.iter().zip(medians) {
        let Some((median, len)) = fused else {
            empty_phases.push(*phase);
            continue;
        };
        active_phases.push(*phase);

        for row in (phase.y - 1..lr_h * scale).step_by(scale) {
            for col in (phase.x - 1..lr_w * scale).step_by(scale) {
                z[[row, col]] = median[[row / scale, col / scale]];
                confidence[[row, col]] = len as f32;
                populated[[row, col]] = true;
            }
        }
    }

    if active_phases.is_empty() {
        return Err(SuperResError::NoActivePhase);
    }

    if !empty_phases.is_empty() {
        debug!(
            empty = empty_phases.len(),
            active = active_phases.len(),
            "Hole-filling empty lattice phases"
        );
        let filtered = if active_phases.len() == 1 {
            populated_median(&z, &populated)
        } else {
            median_blur(&z, HOLE_FILL_WINDOW)
        };
        for phase in &empty_phases {
            for row in (phase.y - 1..dims.0).step_by(scale) {
                for col in (phase.x - 1..dims.1).step_by(scale) {
                    z[[row, col]] = filtered[[row, col]];
                }
            }
        }
    }

    confidence.mapv_inplace(f32::sqrt);

    Ok(Lattice {
        z,
        confidence,
        scale,
        active_phases,
        empty_phases,
    })
}

/// Median of the populated cells in the smallest square window around each
/// unpopulated cell that holds at least one. Populated cells keep their value.
fn populated_median(z: &Array2<f32>, populated: &Array2<bool>) -> Array2<f32> {
    let (h, w) = z.dim();
    let mut out = Array2::<f32>::zeros((h, w));

    fill_indexed(&mut out, |row, col| {
        if populated[[row, col]] {
            return z[[row, col]];
        }
        let mut samples = Vec::new();
        for radius in 1..=h.max(w) {
            let rows = row.saturating_sub(radius)..=(row + radius).min(h - 1);
            let cols = col.saturating_sub(radius)..=(col + radius).min(w - 1);
            for r in rows {
                for c in cols.clone() {
                    if populated[[r, c]] {
                        samples.push(z[[r, c]]);
                    }
                }
            }
            if !samples.is_empty() {
                return compute_median(&mut samples);
            }
        }
        // Unreachable while at least one phase is active.
        0.0
    });

    out
}

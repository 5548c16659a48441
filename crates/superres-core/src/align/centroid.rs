//! Intensity-centroid registration.
//!
//! The displacement is the difference between the brightness-weighted centres
//! of the two frames. Cheap and sub-pixel by nature; suited to one bright
//! object on a dark field.

use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;

use super::{check_same_size, Registration};
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::frame::{Displacement, Frame};

#[derive(Clone, Copy, Debug)]
pub struct Centroid {
    /// Fraction of the peak brightness below which pixels carry no weight.
    pub threshold: f32,
}

impl Centroid {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Registration for Centroid {
    fn displacement(&self, reference: &Frame, target: &Frame) -> Result<Displacement> {
        check_same_size(reference, target)?;
        let from = weighted_center(&reference.data, self.threshold);
        let to = weighted_center(&target.data, self.threshold);

        Ok(Displacement::new(to.col - from.col, to.row - from.row))
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Moments {
    row: f64,
    col: f64,
    mass: f64,
}

impl Moments {
    fn merge(self, other: Self) -> Self {
        Self {
            row: self.row + other.row,
            col: self.col + other.col,
            mass: self.mass + other.mass,
        }
    }
}

struct Center {
    row: f64,
    col: f64,
}

fn weighted_center(data: &Array2<f32>, threshold: f32) -> Center {
    let (h, w) = data.dim();
    let geometric = Center {
        row: h as f64 / 2.0,
        col: w as f64 / 2.0,
    };

    let peak = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if peak.is_nan() || peak <= 0.0 {
        return geometric;
    }
    let cutoff = threshold * peak;

    let row_moments = |(r, line): (usize, ArrayView1<f32>)| {
        line.iter()
            .enumerate()
            .filter(|(_, &v)| v > cutoff)
            .fold(Moments::default(), |m, (c, &v)| {
                let v = v as f64;
                m.merge(Moments {
                    row: r as f64 * v,
                    col: c as f64 * v,
                    mass: v,
                })
            })
    };

    let total = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        data.axis_iter(Axis(0))
            .into_par_iter()
            .enumerate()
            .map(row_moments)
            .reduce(Moments::default, Moments::merge)
    } else {
        data.axis_iter(Axis(0))
            .enumerate()
            .map(row_moments)
            .fold(Moments::default(), Moments::merge)
    };

    if total.mass > 0.0 {
        Center {
            row: total.row / total.mass,
            col: total.col / total.mass,
        }
    } else {
        geometric
    }
}

#![allow(dead_code)]

use ndarray::Array2;
use superres_core::frame::Frame;

pub fn make_frame(h: usize, w: usize, fill: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), fill), 8)
}

/// Frame whose pixels are all distinct: `row * w + col + offset`.
pub fn ramp_frame(h: usize, w: usize, offset: f32) -> Frame {
    Frame::new(
        Array2::from_shape_fn((h, w), |(r, c)| (r * w + c) as f32 + offset),
        8,
    )
}

/// Gaussian blob centred at `(cy, cx)` on a black background.
pub fn blob_frame(h: usize, w: usize, cy: f64, cx: f64, sigma: f64) -> Frame {
    let s2 = 2.0 * sigma * sigma;
    Frame::new(
        Array2::from_shape_fn((h, w), |(r, c)| {
            let dy = r as f64 - cy;
            let dx = c as f64 - cx;
            (-(dx * dx + dy * dy) / s2).exp() as f32
        }),
        8,
    )
}

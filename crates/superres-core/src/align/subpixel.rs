use ndarray::Array2;

/// Refine a correlation peak with 1D parabola fits through its 3x3 neighbourhood.
///
/// Returns `(delta_row, delta_col)` clamped to half a pixel. Peaks on the
/// border are not refined.
pub fn refine_peak_paraboloid(
    correlation: &Array2<f64>,
    peak_row: usize,
    peak_col: usize,
) -> (f64, f64) {
    let (h, w) = correlation.dim();
    if peak_row == 0 || peak_row + 1 >= h || peak_col == 0 || peak_col + 1 >= w {
        return (0.0, 0.0);
    }

    let center = correlation[[peak_row, peak_col]];
    let delta_row = parabola_vertex(
        correlation[[peak_row - 1, peak_col]],
        center,
        correlation[[peak_row + 1, peak_col]],
    );
    let delta_col = parabola_vertex(
        correlation[[peak_row, peak_col - 1]],
        center,
        correlation[[peak_row, peak_col + 1]],
    );

    (delta_row.clamp(-0.5, 0.5), delta_col.clamp(-0.5, 0.5))
}

fn parabola_vertex(prev: f64, curr: f64, next: f64) -> f64 {
    let curvature = prev - 2.0 * curr + next;
    if curvature.abs() > 1e-12 {
        (prev - next) / (2.0 * curvature)
    } else {
        0.0
    }
}

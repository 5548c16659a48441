use ndarray::Array2;
use num_traits::Float;

/// Three-valued sign: -1, 0 or 1.
///
/// Unlike `f32::signum`, zero (of either sign) maps to zero.
pub fn sign<T: Float>(v: T) -> T {
    if v > T::zero() {
        T::one()
    } else if v < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Elementwise [`sign`] of a grid.
pub fn sign_array(data: &Array2<f32>) -> Array2<f32> {
    data.mapv(sign)
}

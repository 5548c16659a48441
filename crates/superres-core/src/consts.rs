/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum number of frames to median in parallel across rows.
pub const PARALLEL_FRAME_THRESHOLD: usize = 2;

/// Window size of the hole-filling median filter.
pub const HOLE_FILL_WINDOW: usize = 3;

/// Default upsampling factor.
pub const DEFAULT_SCALE: usize = 4;

/// Default side length of the Gaussian point-spread kernel.
pub const DEFAULT_PSF_SIZE: usize = 3;

/// Default Gaussian point-spread sigma in high-resolution pixels.
pub const DEFAULT_PSF_SIGMA: f64 = 1.0;

/// Default spatial decay base of the bilateral-TV regularizer.
pub const DEFAULT_ALPHA: f64 = 0.7;

/// Default gradient-descent step size.
pub const DEFAULT_BETA: f64 = 1.0;

/// Default regularization weight.
pub const DEFAULT_LAMBDA: f64 = 0.04;

/// Default regularizer neighbourhood radius.
pub const DEFAULT_RADIUS: usize = 2;

/// Default total iteration count (the fused lattice counts as the first).
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Default number of frames held by the rolling frame buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 16;

/// Default intensity threshold for centroid registration (fraction of max brightness).
pub const DEFAULT_CENTROID_THRESHOLD: f32 = 0.1;

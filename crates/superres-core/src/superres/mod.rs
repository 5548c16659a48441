//! Fast and robust multi-frame super-resolution.
//!
//! The reconstruction runs in four stages, each in its own module:
//!
//! 1. [`quantize`] splits every displacement into an integer coarse shift and
//!    a sub-pixel lattice phase.
//! 2. [`resample`] realigns each frame onto the reference grid by its coarse
//!    shift (nearest neighbour).
//! 3. [`fusion`] medians the frames that share a phase, scatters them onto the
//!    upsampled lattice and hole-fills phases nobody landed on.
//! 4. [`solver`] refines the fused lattice by fixed-count gradient descent on
//!    a robust L1 data term plus bilateral total variation.

pub mod fusion;
pub mod quantize;
pub mod resample;
pub mod solver;

pub use fusion::{fuse, lattice_dims, Lattice};
pub use quantize::{quantize, quantize_all, CoarseShift, Phase, QuantizedDistance};
pub use resample::{resample_frame, resample_frames, ShiftAxes};
pub use solver::{reconstruct, reconstruct_with_progress, SolverOutput};

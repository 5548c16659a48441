//! Frame registration: estimating each frame's displacement from the reference.

pub mod centroid;
pub mod phase_correlation;
pub mod subpixel;

use crate::error::{Result, SuperResError};
use crate::frame::{Displacement, Frame};
use crate::pipeline::config::RegistrationMethod;

pub use centroid::Centroid;
pub use phase_correlation::PhaseCorrelation;

/// Estimates the content motion of a frame relative to a reference.
pub trait Registration: Send + Sync {
    /// Displacement `d` such that `target(x, y) ≈ reference(x - dx, y - dy)`.
    fn displacement(&self, reference: &Frame, target: &Frame) -> Result<Displacement>;

    /// Register every frame against the first; frame 0 is always `(0, 0)`.
    fn register(&self, frames: &[Frame]) -> Result<Vec<Displacement>> {
        let Some(reference) = frames.first() else {
            return Err(SuperResError::EmptySequence);
        };
        let mut displacements = Vec::with_capacity(frames.len());
        displacements.push(Displacement::default());
        for frame in &frames[1..] {
            displacements.push(self.displacement(reference, frame)?);
        }
        Ok(displacements)
    }
}

/// Build the registration collaborator selected by `method`.
pub fn registration_for(method: &RegistrationMethod) -> Box<dyn Registration> {
    match method {
        RegistrationMethod::PhaseCorrelation => Box::new(PhaseCorrelation),
        RegistrationMethod::Centroid(config) => Box::new(Centroid::new(config.threshold)),
    }
}

pub(crate) fn check_same_size(reference: &Frame, target: &Frame) -> Result<()> {
    if reference.data.dim() != target.data.dim() {
        return Err(SuperResError::DimensionMismatch {
            index: target.metadata.frame_index,
            width: reference.width(),
            height: reference.height(),
            found_width: target.width(),
            found_height: target.height(),
        });
    }
    Ok(())
}

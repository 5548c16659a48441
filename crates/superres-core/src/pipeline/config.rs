use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_BUFFER_SIZE, DEFAULT_CENTROID_THRESHOLD, DEFAULT_LAMBDA,
    DEFAULT_MAX_ITERATIONS, DEFAULT_PSF_SIGMA, DEFAULT_PSF_SIZE, DEFAULT_RADIUS, DEFAULT_SCALE,
};
use crate::error::{Result, SuperResError};
use crate::superres::ShiftAxes;

/// End-to-end run: read a frame sequence, register it, reconstruct, write.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory of input frames, read in file-name order.
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of frames to buffer; the first buffered frame is the reference.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default)]
    pub registration: RegistrationMethod,
    #[serde(default)]
    pub super_resolution: SuperResConfig,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("frames"),
            output: PathBuf::from("result.tiff"),
            buffer_size: DEFAULT_BUFFER_SIZE,
            registration: RegistrationMethod::default(),
            super_resolution: SuperResConfig::default(),
        }
    }
}

/// Everything the reconstruction itself needs besides frames and displacements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuperResConfig {
    /// Integer upsampling factor `s`.
    pub scale: usize,
    #[serde(default)]
    pub shift_axes: ShiftAxes,
    #[serde(default)]
    pub psf: PsfConfig,
    #[serde(default)]
    pub reconstruction: ReconstructionParams,
}

impl Default for SuperResConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            shift_axes: ShiftAxes::default(),
            psf: PsfConfig::default(),
            reconstruction: ReconstructionParams::default(),
        }
    }
}

impl SuperResConfig {
    /// Check every numeric precondition of a run.
    pub fn validate(&self) -> Result<()> {
        if self.scale < 1 {
            return Err(SuperResError::InvalidScale(self.scale));
        }
        if self.psf.size == 0 {
            return Err(SuperResError::InvalidKernel(
                "kernel size must be positive".into(),
            ));
        }
        if !self.psf.sigma.is_finite() || self.psf.sigma <= 0.0 {
            return Err(SuperResError::InvalidKernel(format!(
                "sigma must be positive and finite, got {}",
                self.psf.sigma
            )));
        }
        self.reconstruction.validate()
    }
}

/// Gaussian point-spread kernel shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PsfConfig {
    /// Side length in lattice pixels.
    pub size: usize,
    pub sigma: f64,
}

impl Default for PsfConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_PSF_SIZE,
            sigma: DEFAULT_PSF_SIGMA,
        }
    }
}

/// Form of each bilateral-TV term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BtvForm {
    /// `sign(S - shift(S))`: every term is -1, 0 or 1.
    #[default]
    Sign,
    /// `S - shift(S)`: the classic bilateral-TV gradient.
    Difference,
}

impl std::fmt::Display for BtvForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BtvForm::Sign => write!(f, "Sign"),
            BtvForm::Difference => write!(f, "Difference"),
        }
    }
}

/// Gradient-descent parameters, fixed for one reconstruction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReconstructionParams {
    /// Spatial decay base of the regularizer, in (0, 1).
    pub alpha: f64,
    /// Step size.
    pub beta: f64,
    /// Regularization weight; 0 disables the regularizer.
    pub lambda: f64,
    /// Regularizer neighbourhood radius `P`.
    pub radius: usize,
    /// Total iterations including the fused initial estimate.
    pub max_iterations: usize,
    #[serde(default)]
    pub regularizer: BtvForm,
}

impl Default for ReconstructionParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            lambda: DEFAULT_LAMBDA,
            radius: DEFAULT_RADIUS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            regularizer: BtvForm::default(),
        }
    }
}

impl ReconstructionParams {
    /// Iterations must be at least one, `alpha` must lie in (0, 1) and
    /// `beta`/`lambda` must be finite.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations < 1 {
            return Err(SuperResError::InvalidIterationCount(self.max_iterations));
        }
        if self.alpha.is_nan() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(SuperResError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        for (name, value) in [
            ("beta", self.beta),
            ("lambda", self.lambda),
        ] {
            if !value.is_finite() {
                return Err(SuperResError::InvalidParameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// How per-frame displacements are estimated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum RegistrationMethod {
    /// FFT phase correlation with paraboloid sub-pixel refinement.
    #[default]
    PhaseCorrelation,
    /// Intensity-weighted centroid difference.
    Centroid(CentroidConfig),
}

impl std::fmt::Display for RegistrationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationMethod::PhaseCorrelation => write!(f, "Phase Correlation"),
            RegistrationMethod::Centroid(c) => write!(f, "Centroid (threshold {})", c.threshold),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentroidConfig {
    /// Pixels below `threshold * max` are ignored.
    pub threshold: f32,
}

impl Default for CentroidConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CENTROID_THRESHOLD,
        }
    }
}

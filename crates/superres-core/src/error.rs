use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuperResError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Frame {index} is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        index: usize,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("Got {frames} frames but {displacements} displacements")]
    CountMismatch { frames: usize, displacements: usize },

    #[error("Invalid upsampling factor: {0} (must be >= 1)")]
    InvalidScale(usize),

    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterationCount(usize),

    #[error("Invalid point-spread kernel: {0}")]
    InvalidKernel(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No lattice phase received any frame")]
    NoActivePhase,

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, SuperResError>;

use crate::frame::Frame;
use crate::superres::Phase;

/// Stages reported while a reconstruction runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Registration,
    Quantization,
    Resampling,
    Fusion,
    Reconstruction,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Registration => write!(f, "Registering frames"),
            Self::Quantization => write!(f, "Quantizing motion"),
            Self::Resampling => write!(f, "Resampling"),
            Self::Fusion => write!(f, "Fusing lattice"),
            Self::Reconstruction => write!(f, "Reconstructing"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Output of one super-resolution run.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// High-resolution estimate, `((H+1)s-1) x ((W+1)s-1)`, unclamped.
    pub image: Frame,
    /// Gradient updates applied by the solver.
    pub iterations: usize,
    pub active_phases: Vec<Phase>,
    pub empty_phases: Vec<Phase>,
}

/// Observer of pipeline progress, shared across worker threads.
///
/// Every hook defaults to doing nothing.
pub trait ProgressReporter: Send + Sync {
    /// `stage` starts with `total_items` units of work, when that is known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` units of the current stage are complete.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

/// Reporter for callers that do not watch progress.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

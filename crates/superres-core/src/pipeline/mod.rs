pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_pipeline, run_pipeline_reported, super_resolve, super_resolve_reported};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter, Reconstruction};

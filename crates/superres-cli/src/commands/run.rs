use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use superres_core::pipeline::config::{
    BtvForm, CentroidConfig, PipelineConfig, PsfConfig, ReconstructionParams, RegistrationMethod,
    SuperResConfig,
};
use superres_core::pipeline::run_pipeline_reported;
use superres_core::superres::ShiftAxes;

use crate::reporter::BarReporter;
use crate::summary::{print_pipeline_summary, print_result_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum RegistrationArg {
    Phase,
    Centroid,
}

#[derive(Args)]
pub struct RegistrationOpts {
    /// Registration method
    #[arg(long, value_enum, default_value = "phase")]
    pub registration: RegistrationArg,

    /// Brightness threshold for centroid registration (fraction of max)
    #[arg(long, default_value = "0.1")]
    pub centroid_threshold: f32,
}

impl RegistrationOpts {
    pub fn method(&self) -> RegistrationMethod {
        match self.registration {
            RegistrationArg::Phase => RegistrationMethod::PhaseCorrelation,
            RegistrationArg::Centroid => RegistrationMethod::Centroid(CentroidConfig {
                threshold: self.centroid_threshold,
            }),
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory of input frames (read in file-name order)
    pub input: PathBuf,

    /// Pipeline config file (TOML); overrides all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to use, starting from the first (the reference)
    #[arg(long, default_value = "16")]
    pub frames: usize,

    #[command(flatten)]
    pub registration: RegistrationOpts,

    /// Upsampling factor
    #[arg(short, long, default_value = "4")]
    pub scale: usize,

    /// Point-spread kernel side length
    #[arg(long, default_value = "3")]
    pub psf_size: usize,

    /// Point-spread kernel sigma
    #[arg(long, default_value = "1.0")]
    pub psf_sigma: f64,

    /// Regularizer spatial decay base
    #[arg(long, default_value = "0.7")]
    pub alpha: f64,

    /// Gradient step size
    #[arg(long, default_value = "1.0")]
    pub beta: f64,

    /// Regularization weight
    #[arg(long, default_value = "0.04")]
    pub lambda: f64,

    /// Regularizer neighbourhood radius
    #[arg(long, default_value = "2")]
    pub radius: usize,

    /// Total iterations (the fused lattice counts as the first)
    #[arg(long, default_value = "20")]
    pub iterations: usize,

    /// Use the classic bilateral-TV difference instead of its sign
    #[arg(long)]
    pub btv_difference: bool,

    /// Apply the horizontal coarse shift on both axes (older behaviour)
    #[arg(long)]
    pub horizontal_only_shift: bool,

    /// Output file path (.tiff or .png)
    #[arg(short, long, default_value = "result.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)
    };

    print_pipeline_summary(&config);

    let reporter = Arc::new(BarReporter::new());
    let result = run_pipeline_reported(&config, reporter.clone())
        .with_context(|| format!("Reconstruction of {} failed", config.input.display()))?;
    reporter.finish();

    print_result_summary(&result, &config);
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> PipelineConfig {
    PipelineConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        buffer_size: args.frames,
        registration: args.registration.method(),
        super_resolution: SuperResConfig {
            scale: args.scale,
            shift_axes: if args.horizontal_only_shift {
                ShiftAxes::HorizontalOnly
            } else {
                ShiftAxes::PerAxis
            },
            psf: PsfConfig {
                size: args.psf_size,
                sigma: args.psf_sigma,
            },
            reconstruction: ReconstructionParams {
                alpha: args.alpha,
                beta: args.beta,
                lambda: args.lambda,
                radius: args.radius,
                max_iterations: args.iterations,
                regularizer: if args.btv_difference {
                    BtvForm::Difference
                } else {
                    BtvForm::Sign
                },
            },
        },
    }
}

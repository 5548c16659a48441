use std::sync::Arc;

use tracing::{debug, info};

use crate::align::registration_for;
use crate::error::{Result, SuperResError};
use crate::filters::kernel::gaussian_kernel;
use crate::frame::{Displacement, Frame};
use crate::io::frame_buffer::FrameBuffer;
use crate::io::image_io::save_image;
use crate::io::source::ImageSequenceSource;
use crate::superres::{fuse, quantize_all, reconstruct_with_progress, resample_frames};

use super::config::{PipelineConfig, SuperResConfig};
use super::types::{NoOpReporter, PipelineStage, ProgressReporter, Reconstruction};

/// Reconstruct one high-resolution image from registered frames.
///
/// `displacements[i]` is the motion of `frames[i]` relative to `frames[0]`.
pub fn super_resolve(
    frames: &[Frame],
    displacements: &[Displacement],
    config: &SuperResConfig,
) -> Result<Reconstruction> {
    super_resolve_reported(frames, displacements, config, Arc::new(NoOpReporter))
}

/// [`super_resolve`] with stage-by-stage progress reporting.
///
/// Every precondition is checked before any lattice is allocated; a failed
/// run returns no partial result.
pub fn super_resolve_reported(
    frames: &[Frame],
    displacements: &[Displacement],
    config: &SuperResConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Reconstruction> {
    validate_inputs(frames, displacements, config)?;
    let scale = config.scale;
    let frame_count = frames.len();

    reporter.begin_stage(PipelineStage::Quantization, Some(frame_count));
    let quantized = quantize_all(displacements, scale);
    for (i, q) in quantized.iter().enumerate() {
        debug!(
            frame = i,
            phase_x = q.phase.x,
            phase_y = q.phase.y,
            shift_x = q.coarse_shift.x,
            shift_y = q.coarse_shift.y,
            "Quantized displacement"
        );
    }
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Resampling, Some(frame_count));
    let shifts: Vec<_> = quantized.iter().map(|q| q.coarse_shift).collect();
    let resampled = resample_frames(frames, &shifts, config.shift_axes);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Fusion, None);
    let phases: Vec<_> = quantized.iter().map(|q| q.phase).collect();
    let lattice = fuse(&resampled, &phases, scale)?;
    drop(resampled);
    info!(
        active = lattice.active_phases.len(),
        empty = lattice.empty_phases.len(),
        width = lattice.width(),
        height = lattice.height(),
        "Fused lattice"
    );
    let active_phases = lattice.active_phases.clone();
    let empty_phases = lattice.empty_phases.clone();
    reporter.finish_stage();

    let psf = gaussian_kernel(config.psf.size, config.psf.sigma)?;
    let params = &config.reconstruction;
    reporter.begin_stage(
        PipelineStage::Reconstruction,
        Some(params.max_iterations - 1),
    );
    let r = reporter.clone();
    let solved = reconstruct_with_progress(lattice, &psf, params, move |done| r.advance(done))?;
    info!(iterations = solved.iterations, "Reconstruction complete");
    reporter.finish_stage();

    Ok(Reconstruction {
        image: Frame::new(solved.image, frames[0].original_bit_depth),
        iterations: solved.iterations,
        active_phases,
        empty_phases,
    })
}

fn validate_inputs(
    frames: &[Frame],
    displacements: &[Displacement],
    config: &SuperResConfig,
) -> Result<()> {
    let Some(reference) = frames.first() else {
        return Err(SuperResError::EmptySequence);
    };
    if frames.len() != displacements.len() {
        return Err(SuperResError::CountMismatch {
            frames: frames.len(),
            displacements: displacements.len(),
        });
    }
    config.validate()?;

    let (h, w) = reference.data.dim();
    if h == 0 || w == 0 {
        return Err(SuperResError::Pipeline(format!(
            "reference frame is {w}x{h}"
        )));
    }
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.data.dim() != (h, w) {
            return Err(SuperResError::DimensionMismatch {
                index,
                width: w,
                height: h,
                found_width: frame.width(),
                found_height: frame.height(),
            });
        }
    }
    for (index, d) in displacements.iter().enumerate() {
        if !d.dx.is_finite() || !d.dy.is_finite() {
            return Err(SuperResError::InvalidParameter(format!(
                "displacement of frame {index} is not finite: ({}, {})",
                d.dx, d.dy
            )));
        }
    }
    Ok(())
}

/// Run the full processing pipeline with a thread-safe progress reporter.
///
/// Reads up to `buffer_size` frames from the input directory, registers
/// them against the first, reconstructs and writes the result.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Reconstruction> {
    config.super_resolution.validate()?;

    let mut source = ImageSequenceSource::open(&config.input)?;
    let mut buffer = FrameBuffer::new(config.buffer_size);
    reporter.begin_stage(
        PipelineStage::Reading,
        Some(buffer.capacity().min(source.len())),
    );
    buffer.fill_from(&mut source)?;
    let frames = buffer.frames();
    info!(
        frames = frames.len(),
        available = source.len(),
        "Buffered frames"
    );
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Registration, Some(frames.len()));
    let registration = registration_for(&config.registration);
    let displacements = registration.register(&frames)?;
    info!(method = %config.registration, "Registration complete");
    reporter.finish_stage();

    let result = super_resolve_reported(
        &frames,
        &displacements,
        &config.super_resolution,
        reporter.clone(),
    )?;

    reporter.begin_stage(PipelineStage::Writing, None);
    save_image(&result.image, &config.output)?;
    info!(path = %config.output.display(), "Saved reconstruction");
    reporter.finish_stage();

    Ok(result)
}

/// Run the full processing pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<Reconstruction> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

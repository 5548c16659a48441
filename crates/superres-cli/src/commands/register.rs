use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use superres_core::align::registration_for;
use superres_core::io::frame_buffer::FrameBuffer;
use superres_core::io::source::ImageSequenceSource;
use superres_core::superres::quantize;

use super::run::RegistrationOpts;

#[derive(Args)]
pub struct RegisterArgs {
    /// Directory of input frames (read in file-name order)
    pub input: PathBuf,

    /// Number of frames to register, starting from the first (the reference)
    #[arg(long, default_value = "16")]
    pub frames: usize,

    #[command(flatten)]
    pub registration: RegistrationOpts,

    /// Upsampling factor used to derive phases and coarse shifts
    #[arg(short, long, default_value = "4")]
    pub scale: usize,
}

pub fn run(args: &RegisterArgs) -> Result<()> {
    if args.scale == 0 {
        anyhow::bail!("Upsampling factor must be at least 1");
    }

    let mut source = ImageSequenceSource::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let mut buffer = FrameBuffer::new(args.frames);
    buffer.fill_from(&mut source)?;
    let frames = buffer.frames();

    let method = args.registration.method();
    println!("Registering {} frames ({})", frames.len(), method);
    let displacements = registration_for(&method).register(&frames)?;

    println!(
        "{:>6} {:>10} {:>10} {:>8} {:>8} {:>8} {:>8}",
        "frame", "dx", "dy", "phase_x", "phase_y", "shift_x", "shift_y"
    );
    for (i, d) in displacements.iter().enumerate() {
        let q = quantize(d, args.scale);
        println!(
            "{:>6} {:>10.3} {:>10.3} {:>8} {:>8} {:>8} {:>8}",
            i, d.dx, d.dy, q.phase.x, q.phase.y, q.coarse_shift.x, q.coarse_shift.y
        );
    }

    Ok(())
}

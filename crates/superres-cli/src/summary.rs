use console::Style;
use superres_core::pipeline::config::PipelineConfig;
use superres_core::pipeline::Reconstruction;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();
    let sr = &config.super_resolution;
    let params = &sr.reconstruction;

    println!();
    println!("  {}", s.title.apply_to("Super-Resolution"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(format!("up to {}", config.buffer_size))
    );
    println!();

    println!("  {}", s.header.apply_to("Registration"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(&config.registration)
    );
    println!();

    println!("  {}", s.header.apply_to("Lattice"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{}x", sr.scale))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Shift axes"),
        s.method.apply_to(sr.shift_axes)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("PSF"),
        s.value.apply_to(format!(
            "Gaussian {}x{} (sigma {})",
            sr.psf.size, sr.psf.size, sr.psf.sigma
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Solver"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Iterations"),
        s.value.apply_to(params.max_iterations)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Step"),
        s.value.apply_to(params.beta)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Regularizer"),
        s.value.apply_to(format!(
            "{} (lambda {}, alpha {}, P {})",
            params.regularizer, params.lambda, params.alpha, params.radius
        ))
    );
    println!();
}

pub fn print_result_summary(result: &Reconstruction, config: &PipelineConfig) {
    let s = Styles::new();
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!(
            "{}x{}",
            result.image.width(),
            result.image.height()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Phases"),
        s.value.apply_to(format!(
            "{} filled, {} hole-filled",
            result.active_phases.len(),
            result.empty_phases.len()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Updates"),
        s.value.apply_to(result.iterations)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(config.output.display())
    );
}

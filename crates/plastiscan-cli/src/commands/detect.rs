use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use plastiscan_core::detector::detect_particles;
use plastiscan_core::particle::Particle;
use plastiscan_core::quantify::quantify;
use plastiscan_core::sources::load_frame;

use crate::summary::{print_particles, print_report};

#[derive(Args)]
pub struct DetectArgs {
    /// Input image file(s)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Detector configuration (TOML); defaults used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List every particle, not just the aggregate report
    #[arg(long)]
    pub particles: bool,

    /// Write the quantification report as TOML to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Detecting");

    let mut all_particles: Vec<Particle> = Vec::new();
    for path in &args.files {
        let frame =
            load_frame(path).with_context(|| format!("Failed to load {}", path.display()))?;
        all_particles.extend(detect_particles(&frame, &config));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.particles {
        print_particles(&all_particles);
    }

    let report = quantify(&all_particles, &config.quantify);
    print_report(&report, args.files.len());

    if let Some(ref path) = args.output {
        let toml_str = toml::to_string_pretty(&report)?;
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

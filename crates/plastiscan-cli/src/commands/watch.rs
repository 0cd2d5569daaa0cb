use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use plastiscan_core::capture::{ParticleScanner, ScanState};
use plastiscan_core::sources::ImageFolderSource;

use crate::summary::print_report;

#[derive(Args)]
pub struct WatchArgs {
    /// Directory of frames to scan, in filename order
    pub dir: PathBuf,

    /// Detector configuration (TOML); defaults used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop after this many frames (0 = run until the stream ends)
    #[arg(long, default_value = "0")]
    pub max_frames: u64,

    /// Seconds between status lines
    #[arg(long, default_value = "1")]
    pub interval: u64,

    /// Replay the folder endlessly instead of stopping at the last frame
    #[arg(long)]
    pub replay: bool,
}

pub fn run(args: &WatchArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let mut source = ImageFolderSource::new(&args.dir);
    source.loop_frames = args.replay;

    let scanner = ParticleScanner::new(Box::new(source), config);
    scanner.start()?;

    loop {
        std::thread::sleep(Duration::from_secs(args.interval.max(1)));

        let stats = scanner.statistics();
        println!(
            "frames: {:>6}  fps: {:>6.1}  particles: {:>4}",
            stats.frame_count, stats.fps, stats.particle_count
        );

        if args.max_frames > 0 && stats.frame_count >= args.max_frames {
            scanner.stop();
            break;
        }
        if scanner.state() == ScanState::Stopped {
            break;
        }
    }
    scanner.join();

    let stats = scanner.statistics();
    println!("\nSession complete: {} frames processed", stats.frame_count);
    print_report(&stats.quantification, stats.frame_count as usize);
    Ok(())
}

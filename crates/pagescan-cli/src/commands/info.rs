use anyhow::Result;
use clap::Args;
use pagescan_core::config::SamplingConfig;
use pagescan_core::sampling::{SampleSchedule, VideoSource};

use super::SourceArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = args.source.open()?;
    let (width, height) = source.frame_size()?;
    let duration = source.duration_ms();
    let schedule = SampleSchedule::new(0, duration, &SamplingConfig::default())?;

    println!("Directory:   {}", args.source.frames.display());
    println!("Frames:      {}", source.frame_count());
    println!("Frame rate:  {:.2} fps", source.fps());
    println!("Duration:    {:.2} s", duration as f64 / 1000.0);
    println!("Dimensions:  {}x{}", width, height);
    println!(
        "Samples:     {} (every {:.0} ms at default density)",
        schedule.len(),
        schedule.interval_ms()
    );

    Ok(())
}

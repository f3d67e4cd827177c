use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pagescan_core::io::image_io::save_thumbnail;
use pagescan_core::sampling::{capture_now, CancellationToken, SamplingOutcome};
use pagescan_core::scoring::ThresholdScorer;
use pagescan_core::session::scan;
use tracing::info;

use super::{ScanArgs, SourceArgs};
use crate::progress::BarReporter;
use crate::summary::{print_pass, print_scan_summary};

#[derive(Args)]
pub struct SampleArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Save candidate thumbnails into this directory
    #[arg(long)]
    pub thumbnails: Option<PathBuf>,

    /// Also score the frame at this timestamp (ms), outside the schedule
    #[arg(long = "capture", value_name = "MS")]
    pub capture: Vec<u64>,
}

pub fn run(args: &SampleArgs) -> Result<()> {
    let config = args.scan.resolve()?;
    let source = args.source.open()?;
    print_scan_summary(&config, &args.source.frames);

    let reporter = BarReporter::new();
    let outcome = scan(&source, &config, &CancellationToken::new(), &reporter)?;
    let pass = match outcome {
        SamplingOutcome::Completed(pass) => pass,
        SamplingOutcome::Cancelled { samples_attempted } => {
            anyhow::bail!("Sampling cancelled after {samples_attempted} samples")
        }
    };
    print_pass(&pass);

    if let Some(ref dir) = args.thumbnails {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for candidate in pass.candidates() {
            let path = dir.join(format!("candidate_{:08}.png", candidate.timestamp_ms));
            save_thumbnail(candidate, &path)?;
        }
        info!(count = pass.candidates().len(), dir = %dir.display(), "Saved thumbnails");
        println!("Thumbnails saved to {}", dir.display());
    }

    if !args.capture.is_empty() {
        let scorer = ThresholdScorer::new(config.scoring.clone(), config.metrics.clone());
        for &timestamp_ms in &args.capture {
            let candidate = capture_now(&source, timestamp_ms, &scorer)?;
            let verdict = candidate
                .rejection_reason
                .map_or_else(|| "accepted".to_string(), |r| r.to_string());
            println!(
                "Capture at {} ms: score {:.3}, {}",
                candidate.timestamp_ms, candidate.quality_score, verdict
            );
        }
    }

    Ok(())
}

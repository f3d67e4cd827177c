use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pagescan_core::enhance::{PageFilter, QualityTier};
use pagescan_core::io::image_io::save_page;
use pagescan_core::sampling::{CancellationToken, SamplingOutcome};
use pagescan_core::session::{enhance_selected, scan, ProgressReporter, SessionStage};
use tracing::info;

use super::{ScanArgs, SourceArgs};
use crate::progress::BarReporter;
use crate::summary::{print_pass, print_scan_summary, print_written_pages};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output directory for the finished pages
    #[arg(short, long, default_value = "pages")]
    pub output: PathBuf,

    /// Filter for every page: document, original, black-white
    #[arg(long)]
    pub filter: Option<String>,

    /// Quality tier: email, balanced, print
    #[arg(long)]
    pub tier: Option<String>,

    /// Write JPEG instead of PNG
    #[arg(long)]
    pub jpeg: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = args.scan.resolve()?;
    if let Some(ref name) = args.filter {
        config.enhancement.default_filter = name.parse::<PageFilter>()?;
    }
    if let Some(ref name) = args.tier {
        config.enhancement.quality_tier = name.parse::<QualityTier>()?;
    }

    let source = args.source.open()?;
    print_scan_summary(&config, &args.source.frames);

    let reporter = BarReporter::new();
    let pass = match scan(&source, &config, &CancellationToken::new(), &reporter)? {
        SamplingOutcome::Completed(pass) => pass,
        SamplingOutcome::Cancelled { samples_attempted } => {
            anyhow::bail!("Sampling cancelled after {samples_attempted} samples")
        }
    };
    print_pass(&pass);

    if pass.selected_count() == 0 {
        println!("No pages selected, nothing to write.");
        return Ok(());
    }

    let pages = enhance_selected(
        &source,
        &pass,
        &HashMap::new(),
        &config.enhancement,
        &reporter,
    )?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let extension = if args.jpeg { "jpg" } else { "png" };

    reporter.begin_stage(SessionStage::Writing, Some(pages.len()));
    let mut written = Vec::with_capacity(pages.len());
    for (i, (_, page)) in pages.into_iter().enumerate() {
        let path = args.output.join(format!("page_{:03}.{extension}", i + 1));
        save_page(&page, &path)?;
        written.push((page, path));
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    info!(pages = written.len(), dir = %args.output.display(), "Wrote pages");
    print_written_pages(&written);
    Ok(())
}

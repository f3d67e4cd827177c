use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::config::{EnhancementConfig, ScanConfig};
use crate::enhance::{enhance_page, EnhancedPage, PageEdit};
use crate::error::Result;
use crate::frame::FrameSample;
use crate::sampling::{sample_source, CancellationToken, SamplingOutcome, SamplingPass, VideoSource};
use crate::scoring::{CandidateId, ThresholdScorer};

use super::types::{ProgressReporter, SessionStage};

/// Validate `config` and run a sampling pass with the threshold scorer.
pub fn scan<S: VideoSource + ?Sized>(
    source: &S,
    config: &ScanConfig,
    cancel: &CancellationToken,
    reporter: &dyn ProgressReporter,
) -> Result<SamplingOutcome> {
    config.validate()?;
    let mut scorer = ThresholdScorer::new(config.scoring.clone(), config.metrics.clone());
    sample_source(source, &config.sampling, &mut scorer, cancel, reporter)
}

/// Render every selected candidate of `pass`, in timestamp order.
///
/// Each page is decoded again from `source`, then enhanced with the edit
/// bound to its id, or a default edit carrying the configured filter.
/// Decoding is sequential; enhancement runs across the rayon pool.
pub fn enhance_selected<S: VideoSource + ?Sized>(
    source: &S,
    pass: &SamplingPass,
    edits: &HashMap<CandidateId, PageEdit>,
    config: &EnhancementConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<(CandidateId, EnhancedPage)>> {
    let selected: Vec<_> = pass.selected().collect();
    info!(
        pages = selected.len(),
        tier = %config.quality_tier,
        "Rendering selected pages"
    );

    reporter.begin_stage(SessionStage::Decoding, Some(selected.len()));
    let mut jobs: Vec<(CandidateId, FrameSample, PageEdit)> = Vec::with_capacity(selected.len());
    for (i, candidate) in selected.iter().enumerate() {
        let sample = source.frame_at(candidate.timestamp_ms)?;
        let edit = edits
            .get(&candidate.id)
            .copied()
            .unwrap_or_else(|| PageEdit::with_filter(config.default_filter));
        jobs.push((candidate.id, sample, edit));
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    reporter.begin_stage(SessionStage::Enhancement, Some(jobs.len()));
    let done = AtomicUsize::new(0);
    let pages: Vec<Result<(CandidateId, EnhancedPage)>> = jobs
        .par_iter()
        .map(|(id, sample, edit)| {
            let page = enhance_page(sample, edit, config.quality_tier)?;
            reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
            Ok((*id, page))
        })
        .collect();
    reporter.finish_stage();

    let pages = pages.into_iter().collect::<Result<Vec<_>>>()?;
    info!(
        pages = pages.len(),
        bytes = pages.iter().map(|(_, p)| p.byte_size).sum::<usize>(),
        "Pages rendered"
    );
    Ok(pages)
}

#[allow(dead_code)]
mod common;

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use pagescan_core::config::{EnhancementConfig, ScanConfig};
use pagescan_core::enhance::{enhance_page, PageEdit, PageFilter, QualityTier, Rotation};
use pagescan_core::error::{PagescanError, ReadError};
use pagescan_core::frame::FrameSample;
use pagescan_core::io::MemorySource;
use pagescan_core::sampling::{CancellationToken, SamplingPass, VideoSource};
use pagescan_core::session::{enhance_selected, scan, NoOpReporter, SessionStage};

use common::{near_duplicate, page, smooth_ramp, RecordingReporter};

fn source() -> MemorySource {
    let frames = vec![
        FrameSample::new(0, smooth_ramp()),
        FrameSample::new(2000, page(1)),
        FrameSample::new(2100, near_duplicate(1)),
        FrameSample::new(5000, page(2)),
        FrameSample::new(8000, page(3)),
    ];
    MemorySource::new(frames, 10_000).unwrap()
}

fn pass_over(source: &MemorySource) -> SamplingPass {
    scan(
        source,
        &ScanConfig::default(),
        &CancellationToken::new(),
        &NoOpReporter,
    )
    .unwrap()
    .into_pass()
    .unwrap()
}

#[test]
fn test_enhance_selected_renders_selected_in_order() {
    let source = source();
    let pass = pass_over(&source);
    let reporter = RecordingReporter::default();

    let pages = enhance_selected(
        &source,
        &pass,
        &HashMap::new(),
        &EnhancementConfig::default(),
        &reporter,
    )
    .unwrap();

    let expected: Vec<_> = pass.selected().map(|c| c.id).collect();
    let got: Vec<_> = pages.iter().map(|(id, _)| *id).collect();
    assert_eq!(got, expected);

    let stamps: Vec<u64> = pages.iter().map(|(_, p)| p.source_timestamp_ms).collect();
    assert_eq!(stamps, vec![2000, 5000, 8000]);
    assert!(pages
        .iter()
        .all(|(_, p)| p.edit.filter == PageFilter::Document && p.quality_tier == QualityTier::Balanced));

    let stages: Vec<SessionStage> = reporter.stages.lock().unwrap().iter().map(|s| s.0).collect();
    assert_eq!(stages, vec![SessionStage::Decoding, SessionStage::Enhancement]);
    assert_eq!(reporter.finished.load(Ordering::SeqCst), 2);
}

#[test]
fn test_bound_edits_override_default_filter() {
    let source = source();
    let mut pass = pass_over(&source);

    // The user rescues the duplicate and gives it a custom edit.
    let dup = pass.candidates()[2].id;
    pass.set_selected(dup, true);
    let edit = PageEdit {
        rotation: Rotation::Cw90,
        filter: PageFilter::Original,
        ..Default::default()
    };
    let edits = HashMap::from([(dup, edit)]);

    let config = EnhancementConfig {
        quality_tier: QualityTier::PrintQuality,
        default_filter: PageFilter::BlackWhite,
    };
    let pages = enhance_selected(&source, &pass, &edits, &config, &NoOpReporter).unwrap();
    assert_eq!(pages.len(), 4);

    let (_, rendered) = pages.iter().find(|(id, _)| *id == dup).unwrap();
    let sample = source.frame_at(2100).unwrap();
    let expected = enhance_page(&sample, &edit, QualityTier::PrintQuality).unwrap();
    assert_eq!(rendered, &expected);
    assert_eq!((rendered.width(), rendered.height()), (48, 64));

    assert!(pages
        .iter()
        .filter(|(id, _)| *id != dup)
        .all(|(_, p)| p.edit.filter == PageFilter::BlackWhite));
}

#[test]
fn test_nothing_selected_renders_nothing() {
    let source = source();
    let mut pass = pass_over(&source);
    let ids: Vec<_> = pass.candidates().iter().map(|c| c.id).collect();
    for id in ids {
        pass.set_selected(id, false);
    }
    let pages = enhance_selected(
        &source,
        &pass,
        &HashMap::new(),
        &EnhancementConfig::default(),
        &NoOpReporter,
    )
    .unwrap();
    assert!(pages.is_empty());
}

#[test]
fn test_decode_failure_surfaces_as_read_error() {
    let source = source();
    let pass = pass_over(&source);
    // A shorter source than the one the pass ran over.
    let truncated = MemorySource::new(vec![FrameSample::new(0, page(0))], 3000).unwrap();
    let err = enhance_selected(
        &truncated,
        &pass,
        &HashMap::new(),
        &EnhancementConfig::default(),
        &NoOpReporter,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PagescanError::Read(ReadError::OutOfRange { timestamp_ms: 5000, .. })
    ));
}

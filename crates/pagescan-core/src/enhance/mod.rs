//! Page enhancement: a pure transform from one decoded frame plus a
//! [`PageEdit`] to the final page bitmap.
//!
//! Stages run in a fixed order: geometry, then the page filter, then
//! scaling for the quality tier. The input frame is only ever borrowed.

mod edit;
mod filter;
mod geometry;
mod scale;
mod tier;

use image::RgbImage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::frame::FrameSample;

pub use edit::{CropRect, PageEdit, PageFilter, PerspectiveQuad, Point, Rotation};
pub use filter::apply_page_filter;
pub use geometry::{apply_geometry, crop, rotate, unwarp};
pub use scale::{scale_for_tier, tier_scale};
pub use tier::QualityTier;

/// Final rendered page, handed to whoever assembles the document.
#[derive(Clone, Debug, PartialEq)]
pub struct EnhancedPage {
    pub image: RgbImage,
    pub edit: PageEdit,
    pub quality_tier: QualityTier,
    /// Size of the raw RGB pixel buffer.
    pub byte_size: usize,
    /// Timestamp of the frame the page was rendered from.
    pub source_timestamp_ms: u64,
}

impl EnhancedPage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Render one page. Identical inputs give byte-identical output.
pub fn enhance_page(
    sample: &FrameSample,
    edit: &PageEdit,
    tier: QualityTier,
) -> Result<EnhancedPage> {
    let corrected = apply_geometry(&sample.image, edit)?;
    debug!(
        timestamp_ms = sample.timestamp_ms,
        width = corrected.width(),
        height = corrected.height(),
        rotation = edit.rotation.degrees(),
        "geometry applied"
    );

    let filtered = apply_page_filter(corrected, edit.filter);
    let image = scale_for_tier(&filtered, tier);
    let byte_size = image.as_raw().len();

    Ok(EnhancedPage {
        image,
        edit: *edit,
        quality_tier: tier,
        byte_size,
        source_timestamp_ms: sample.timestamp_ms,
    })
}

/// Render independent pages across the rayon pool. Results keep input order.
pub fn enhance_batch(
    jobs: &[(FrameSample, PageEdit)],
    tier: QualityTier,
) -> Vec<Result<EnhancedPage>> {
    info!(pages = jobs.len(), tier = %tier, "enhancing pages");
    jobs.par_iter()
        .map(|(sample, edit)| enhance_page(sample, edit, tier))
        .collect()
}

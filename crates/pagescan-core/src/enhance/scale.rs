use image::{imageops, RgbImage};
use tracing::debug;

use crate::color::color_frame_to_rgb;
use crate::consts::PRINT_BASELINE_LONG_EDGE_PX;
use crate::frame::ColorFrame;

use super::tier::QualityTier;

/// Combined scale applied to an image whose longest edge is `long_edge`.
///
/// The tier factor is taken relative to the print baseline, so a source
/// smaller than the baseline is never upscaled.
pub fn tier_scale(long_edge: usize, tier: QualityTier) -> f32 {
    if long_edge == 0 {
        return tier.scale_factor();
    }
    let baseline = (PRINT_BASELINE_LONG_EDGE_PX / long_edge as f32).min(1.0);
    tier.scale_factor() * baseline
}

/// Stage 3 of enhancement: quantize and resample to the tier's resolution.
///
/// A scale of exactly 1.0 skips resampling so the pixels stay bit-exact.
pub fn scale_for_tier(image: &ColorFrame, tier: QualityTier) -> RgbImage {
    let rgb = color_frame_to_rgb(image);
    let (w, h) = rgb.dimensions();
    let scale = tier_scale(w.max(h) as usize, tier);
    if scale >= 1.0 {
        return rgb;
    }

    let tw = ((w as f32 * scale).round() as u32).max(1);
    let th = ((h as f32 * scale).round() as u32).max(1);
    debug!(tier = %tier, scale, from = ?(w, h), to = ?(tw, th), "resampling page");
    imageops::resize(&rgb, tw, th, imageops::FilterType::Triangle)
}

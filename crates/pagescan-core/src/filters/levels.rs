use crate::consts::LUMA_SCALE;
use crate::frame::{ColorFrame, Frame};

/// Midpoint contrast pivots around: level 128 of 255.
const CONTRAST_PIVOT: f32 = 128.0 / LUMA_SCALE;

/// Adjust brightness and contrast.
///
/// Both arguments use the 8-bit scale: `out = (in - 128) * contrast + 128 + brightness`,
/// clamped to the valid range.
pub fn brightness_contrast(frame: &Frame, brightness: f32, contrast: f32) -> Frame {
    let offset = brightness / LUMA_SCALE;
    let data = frame.data.mapv(|v| {
        let adjusted = (v - CONTRAST_PIVOT) * contrast + CONTRAST_PIVOT + offset;
        adjusted.clamp(0.0, 1.0)
    });
    Frame::new(data)
}

/// [`brightness_contrast`] applied to each channel.
pub fn brightness_contrast_color(color: &ColorFrame, brightness: f32, contrast: f32) -> ColorFrame {
    color.map_planes(|plane| brightness_contrast(plane, brightness, contrast))
}

use crate::color::luminance;
use crate::consts::EPSILON;
use crate::frame::{ColorFrame, Frame};
use crate::metrics::exposure::luminance_range;

/// Linear histogram stretch: maps [black_point, white_point] → [0.0, 1.0].
pub fn histogram_stretch(frame: &Frame, black_point: f32, white_point: f32) -> Frame {
    let range = white_point - black_point;
    let range = if range.abs() < EPSILON { 1.0 } else { range };

    let data = frame.data.mapv(|v| ((v - black_point) / range).clamp(0.0, 1.0));
    Frame::new(data)
}

/// Auto-contrast driven by luminance: every channel is stretched with the
/// frame's observed luminance minimum and maximum,
/// `out = (in - min) / (max - min)`.
///
/// A flat frame (max == min) is returned unchanged.
pub fn luminance_stretch(color: &ColorFrame) -> ColorFrame {
    let luma = luminance(color);
    match luminance_range(&luma.data) {
        Some((lo, hi)) if hi - lo > EPSILON => {
            color.map_planes(|plane| histogram_stretch(plane, lo, hi))
        }
        _ => color.clone(),
    }
}

use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::{ColorFrame, Frame};

/// Apply unsharp mask sharpening.
///
/// `radius`: Gaussian blur sigma for the blurred copy.
/// `amount`: strength of sharpening (e.g. 0.3 = 30% of the difference added back).
pub fn unsharp_mask(frame: &Frame, radius: f32, amount: f32) -> Frame {
    let blurred = gaussian_blur_array(&frame.data, radius);

    let data = ndarray::Zip::from(&frame.data)
        .and(&blurred)
        .map_collect(|&orig, &blur| (orig + (orig - blur) * amount).clamp(0.0, 1.0));

    Frame::new(data)
}

/// Unsharp mask applied to each channel independently.
pub fn unsharp_mask_color(color: &ColorFrame, radius: f32, amount: f32) -> ColorFrame {
    color.map_planes(|plane| unsharp_mask(plane, radius, amount))
}

use image::{imageops, RgbImage};
use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::{ColorFrame, Frame};

/// Convert a ColorFrame to luminance using ITU-R BT.601 weights.
///
/// L = 0.299*R + 0.587*G + 0.114*B
pub fn luminance(color: &ColorFrame) -> Frame {
    let (h, w) = color.red.data.dim();
    let mut data = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            data[[row, col]] = LUMINANCE_R * color.red.data[[row, col]]
                + LUMINANCE_G * color.green.data[[row, col]]
                + LUMINANCE_B * color.blue.data[[row, col]];
        }
    }

    Frame::new(data)
}

/// Expand a single plane into a color frame with identical channels.
pub fn gray_to_color(gray: &Frame) -> ColorFrame {
    ColorFrame {
        red: gray.clone(),
        green: gray.clone(),
        blue: gray.clone(),
    }
}

/// Decode an 8-bit RGB image into normalized planes.
pub fn color_frame_from_rgb(img: &RgbImage) -> ColorFrame {
    let (w, h) = img.dimensions();
    let (w, h) = (w as usize, h as usize);
    let mut red = Array2::<f32>::zeros((h, w));
    let mut green = Array2::<f32>::zeros((h, w));
    let mut blue = Array2::<f32>::zeros((h, w));

    for (x, y, pixel) in img.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        red[[row, col]] = pixel.0[0] as f32 / 255.0;
        green[[row, col]] = pixel.0[1] as f32 / 255.0;
        blue[[row, col]] = pixel.0[2] as f32 / 255.0;
    }

    ColorFrame::from_planes(red, green, blue)
}

/// Quantize normalized planes to an 8-bit RGB image.
///
/// Values are clamped to [0, 1] and rounded to the nearest level, so a frame
/// decoded with [`color_frame_from_rgb`] converts back to identical bytes.
pub fn color_frame_to_rgb(color: &ColorFrame) -> RgbImage {
    let h = color.height();
    let w = color.width();
    let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let (row, col) = (y as usize, x as usize);
        image::Rgb([
            quantize(color.red.data[[row, col]]),
            quantize(color.green.data[[row, col]]),
            quantize(color.blue.data[[row, col]]),
        ])
    })
}

/// Downscale a color frame so its longest edge is at most `max_edge` pixels.
pub fn thumbnail(color: &ColorFrame, max_edge: u32) -> RgbImage {
    let rgb = color_frame_to_rgb(color);
    let (w, h) = rgb.dimensions();
    let long_edge = w.max(h);
    if long_edge <= max_edge || long_edge == 0 {
        return rgb;
    }

    let scale = max_edge as f32 / long_edge as f32;
    let tw = ((w as f32 * scale).round() as u32).max(1);
    let th = ((h as f32 * scale).round() as u32).max(1);
    imageops::thumbnail(&rgb, tw, th)
}

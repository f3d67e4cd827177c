use image::{Rgb, Rgb32FImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use ndarray::{s, Array2};

use crate::error::{PagescanError, Result};
use crate::frame::{ColorFrame, Frame};

use super::edit::{CropRect, PageEdit, PerspectiveQuad, Rotation};

/// Stage 1 of enhancement: rotation, then perspective unwarp or straight crop.
pub fn apply_geometry(image: &ColorFrame, edit: &PageEdit) -> Result<ColorFrame> {
    if image.is_empty() {
        return Err(PagescanError::InvalidGeometry(
            "cannot transform an empty frame".into(),
        ));
    }

    let rotated = rotate(image, edit.rotation);
    match (&edit.perspective, edit.crop.is_full()) {
        (Some(quad), _) => unwarp(&rotated, quad),
        (None, true) => Ok(rotated),
        (None, false) => crop(&rotated, &edit.crop),
    }
}

/// Lossless clockwise rotation by quarter turns.
pub fn rotate(image: &ColorFrame, rotation: Rotation) -> ColorFrame {
    if rotation == Rotation::None {
        return image.clone();
    }
    image.map_planes(|plane| Frame::new(rotate_plane(&plane.data, rotation)))
}

fn rotate_plane(data: &Array2<f32>, rotation: Rotation) -> Array2<f32> {
    match rotation {
        Rotation::None => data.clone(),
        Rotation::Cw90 => data.t().slice(s![.., ..;-1]).to_owned(),
        Rotation::Cw180 => data.slice(s![..;-1, ..;-1]).to_owned(),
        Rotation::Cw270 => data.t().slice(s![..;-1, ..]).to_owned(),
    }
}

/// Straight rectangular crop from normalized bounds.
pub fn crop(image: &ColorFrame, rect: &CropRect) -> Result<ColorFrame> {
    let (h, w) = (image.height(), image.width());
    let to_px = |v: f32, extent: usize| ((v * extent as f32).round() as usize).min(extent);
    let (x0, x1) = (to_px(rect.left(), w), to_px(rect.right(), w));
    let (y0, y1) = (to_px(rect.top(), h), to_px(rect.bottom(), h));

    if x1 <= x0 || y1 <= y0 {
        return Err(PagescanError::InvalidGeometry(format!(
            "crop {rect:?} covers no pixels of a {w}x{h} frame"
        )));
    }

    Ok(image.map_planes(|plane| Frame::new(plane.data.slice(s![y0..y1, x0..x1]).to_owned())))
}

/// Perspective-unwarp the quad to an upright rectangle with bilinear resampling.
///
/// The output size is the longer of each pair of opposite quad edges, so a
/// quad on the frame's own corners reproduces the frame.
pub fn unwarp(image: &ColorFrame, quad: &PerspectiveQuad) -> Result<ColorFrame> {
    let (h, w) = (image.height(), image.width());
    let src = (*quad.corners()).map(|p| (p.x * (w - 1) as f32, p.y * (h - 1) as f32));

    let dist = |a: (f32, f32), b: (f32, f32)| (a.0 - b.0).hypot(a.1 - b.1);
    let out_w = dist(src[0], src[1]).max(dist(src[3], src[2])).round() as usize + 1;
    let out_h = dist(src[0], src[3]).max(dist(src[1], src[2])).round() as usize + 1;
    if out_w < 2 || out_h < 2 {
        return Err(PagescanError::InvalidGeometry(format!(
            "quad maps to a {out_w}x{out_h} page on a {w}x{h} frame"
        )));
    }

    // Source points live in the padded image, one pixel in from its edge.
    let padded_src = src.map(|(x, y)| (x + 1.0, y + 1.0));
    let (mw, mh) = ((out_w - 1) as f32, (out_h - 1) as f32);
    let dst = [(0.0, 0.0), (mw, 0.0), (mw, mh), (0.0, mh)];
    let projection = Projection::from_control_points(padded_src, dst).ok_or_else(|| {
        PagescanError::InvalidGeometry("perspective quad is degenerate".into())
    })?;

    let padded = padded_rgb32f(image);
    let mut output = Rgb32FImage::new(out_w as u32, out_h as u32);
    warp_into(
        &padded,
        &projection,
        Interpolation::Bilinear,
        Rgb([0.0; 3]),
        &mut output,
    );

    let plane = |channel: usize| {
        Array2::from_shape_fn((out_h, out_w), |(row, col)| {
            output.get_pixel(col as u32, row as u32)[channel]
        })
    };
    Ok(ColorFrame::from_planes(plane(0), plane(1), plane(2)))
}

/// Interleave the planes with a one-pixel replicated border, so bilinear
/// taps at the outermost row and column stay inside the image.
fn padded_rgb32f(image: &ColorFrame) -> Rgb32FImage {
    let (h, w) = (image.height(), image.width());
    Rgb32FImage::from_fn(w as u32 + 2, h as u32 + 2, |x, y| {
        let col = (x as usize).saturating_sub(1).min(w - 1);
        let row = (y as usize).saturating_sub(1).min(h - 1);
        Rgb([
            image.red.data[[row, col]],
            image.green.data[[row, col]],
            image.blue.data[[row, col]],
        ])
    })
}

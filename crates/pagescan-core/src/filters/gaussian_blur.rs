use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Frame;

/// Apply Gaussian blur to a plane using separable 1D convolution.
pub fn gaussian_blur(frame: &Frame, sigma: f32) -> Frame {
    Frame::new(gaussian_blur_array(&frame.data, sigma))
}

/// Apply Gaussian blur to a raw array. Edges are clamped.
///
/// A non-positive sigma returns an unchanged copy.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 || data.is_empty() {
        return data.clone();
    }
    let kernel = make_gaussian_kernel(sigma);
    let horizontal = convolve_1d(data, &kernel, true);
    convolve_1d(&horizontal, &kernel, false)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as isize;
    let s2 = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (-radius..=radius)
        .map(|x| (-(x * x) as f32 / s2).exp())
        .collect();
    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|k| k / sum).collect()
}

/// One separable pass, along rows when `horizontal` is set, else along columns.
fn convolve_1d(data: &Array2<f32>, kernel: &[f32], horizontal: bool) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = (kernel.len() / 2) as isize;

    let row_fn = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                kernel
                    .iter()
                    .enumerate()
                    .map(|(ki, &kv)| {
                        let offset = ki as isize - radius;
                        let sample = if horizontal {
                            let c = (col as isize + offset).clamp(0, w as isize - 1) as usize;
                            data[[row, c]]
                        } else {
                            let r = (row as isize + offset).clamp(0, h as isize - 1) as usize;
                            data[[r, col]]
                        };
                        sample * kv
                    })
                    .sum()
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(row_fn).collect()
    } else {
        (0..h).map(row_fn).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (mut dst, src) in result.rows_mut().into_iter().zip(rows) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s;
        }
    }
    result
}

use ndarray::{Array2, ArrayView2};

use crate::config::SharpnessMetric;

/// Score a luminance plane with the selected sharpness metric.
pub fn sharpness(luma: &Array2<f32>, metric: SharpnessMetric) -> f32 {
    let score = match metric {
        SharpnessMetric::Laplacian => laplacian_variance(luma),
        SharpnessMetric::Gradient => sobel_mean_magnitude(luma),
    };
    if score.is_finite() {
        score as f32
    } else {
        0.0
    }
}

/// Variance of the 4-neighbour Laplacian response. Higher means sharper.
///
///   0  1  0
///   1 -4  1
///   0  1  0
///
/// Border pixels are skipped. Sums are divided by the number of interior
/// pixels so the score does not grow with resolution.
pub fn laplacian_variance(data: &Array2<f32>) -> f64 {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return 0.0;
    }

    let (sum, sum_sq, count) = fold_windows(data, |win| {
        -4.0 * win[[1, 1]] as f64
            + win[[0, 1]] as f64
            + win[[2, 1]] as f64
            + win[[1, 0]] as f64
            + win[[1, 2]] as f64
    });

    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0)
}

/// Mean Sobel gradient magnitude.
///
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///   Gy = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
///
/// Less sensitive to sensor noise than the Laplacian on low-light footage.
pub fn sobel_mean_magnitude(data: &Array2<f32>) -> f64 {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return 0.0;
    }

    let (sum, _, count) = fold_windows(data, |win| {
        let p = |r: usize, c: usize| win[[r, c]] as f64;
        let gx = (p(0, 2) + 2.0 * p(1, 2) + p(2, 2)) - (p(0, 0) + 2.0 * p(1, 0) + p(2, 0));
        let gy = (p(2, 0) + 2.0 * p(2, 1) + p(2, 2)) - (p(0, 0) + 2.0 * p(0, 1) + p(0, 2));
        (gx * gx + gy * gy).sqrt()
    });

    sum / count
}

/// Apply `response` to every 3x3 window, returning (sum, sum of squares, count).
fn fold_windows(data: &Array2<f32>, response: impl Fn(ArrayView2<f32>) -> f64) -> (f64, f64, f64) {
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0usize;

    for win in data.windows((3, 3)) {
        let v = response(win);
        sum += v;
        sum_sq += v * v;
        count += 1;
    }

    (sum, sum_sq, count.max(1) as f64)
}

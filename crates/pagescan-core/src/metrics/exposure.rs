use ndarray::Array2;

/// 256-bin histogram of an 8-bit-scaled luminance plane.
pub fn luminance_histogram(luma: &Array2<f32>) -> [u32; 256] {
    let mut bins = [0u32; 256];
    for &v in luma.iter() {
        let idx = v.round().clamp(0.0, 255.0) as usize;
        bins[idx] += 1;
    }
    bins
}

/// Mean and variance of an 8-bit-scaled luminance plane, taken from its
/// histogram.
///
/// Returns `(0.0, 0.0)` for an empty plane.
pub fn luminance_stats(luma: &Array2<f32>) -> (f32, f32) {
    let bins = luminance_histogram(luma);
    let n: u64 = bins.iter().map(|&c| c as u64).sum();
    if n == 0 {
        return (0.0, 0.0);
    }

    let (sum, sum_sq) = bins
        .iter()
        .enumerate()
        .fold((0.0f64, 0.0f64), |(s, sq), (level, &count)| {
            let l = level as f64;
            let c = count as f64;
            (s + l * c, sq + l * l * c)
        });

    let mean = sum / n as f64;
    let variance = (sum_sq / n as f64 - mean * mean).max(0.0);
    (mean as f32, variance as f32)
}

/// Minimum and maximum of a plane. `None` when the plane is empty.
pub fn luminance_range(luma: &Array2<f32>) -> Option<(f32, f32)> {
    let mut iter = luma.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

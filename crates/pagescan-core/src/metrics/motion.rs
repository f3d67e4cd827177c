use ndarray::Array2;

use crate::consts::MOTION_GRID_SIZE;

/// Fixed-size luminance thumbnail used for motion and duplicate comparison.
///
/// Always [`MOTION_GRID_SIZE`] square regardless of the source resolution, so
/// comparing two signatures costs the same for every input and frames of
/// different sizes remain comparable.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSignature {
    grid: Array2<f32>,
}

impl MotionSignature {
    /// Area-average a luminance plane into the comparison grid.
    ///
    /// Returns `None` for an empty plane.
    pub fn from_luma(luma: &Array2<f32>) -> Option<Self> {
        let (h, w) = luma.dim();
        if h == 0 || w == 0 {
            return None;
        }

        let g = MOTION_GRID_SIZE;
        let grid = Array2::from_shape_fn((g, g), |(gr, gc)| {
            let (r0, r1) = cell_bounds(gr, g, h);
            let (c0, c1) = cell_bounds(gc, g, w);
            let mut sum = 0.0f64;
            for row in r0..r1 {
                for col in c0..c1 {
                    sum += luma[[row, col]] as f64;
                }
            }
            (sum / ((r1 - r0) * (c1 - c0)) as f64) as f32
        });

        Some(Self { grid })
    }

    /// Mean absolute difference between two signatures (0 = identical).
    pub fn delta(&self, other: &MotionSignature) -> f32 {
        let total: f64 = self
            .grid
            .iter()
            .zip(other.grid.iter())
            .map(|(a, b)| (a - b).abs() as f64)
            .sum();
        (total / self.grid.len() as f64) as f32
    }
}

/// Source pixel span `[start, end)` covered by grid cell `index`.
/// Every cell covers at least one pixel, even when the source is smaller
/// than the grid.
fn cell_bounds(index: usize, cells: usize, extent: usize) -> (usize, usize) {
    let start = (index * extent / cells).min(extent - 1);
    let end = ((index + 1) * extent / cells).clamp(start + 1, extent);
    (start, end)
}

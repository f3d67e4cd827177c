//! Per-frame quality metrics.
//!
//! Everything here is a pure function of its inputs. Sharpness and exposure
//! depend only on the frame; the motion delta additionally needs an explicit
//! reference signature, so callers control which earlier frame it compares to.

pub mod exposure;
pub mod motion;
pub mod sharpness;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::luminance;
use crate::config::MetricsConfig;
use crate::consts::LUMA_SCALE;
use crate::frame::ColorFrame;

pub use motion::MotionSignature;

/// Numeric facts about one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Edge energy of the analysis downsample, higher = sharper.
    pub sharpness: f32,
    /// Mean luminance on the 0-255 scale.
    pub mean_luminance: f32,
    /// Luminance variance on the 0-255 scale.
    pub luminance_variance: f32,
    /// Mean absolute luminance difference (0-255) against the reference
    /// frame. `None` when there was no reference.
    pub motion_delta: Option<f32>,
}

/// Metrics plus the signature later frames compare against.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub metrics: QualityMetrics,
    /// `None` for a degenerate (zero-size) frame.
    pub signature: Option<MotionSignature>,
}

impl FrameAnalysis {
    pub fn is_degenerate(&self) -> bool {
        self.signature.is_none()
    }
}

/// Compute all metrics for one frame.
///
/// `reference` is the signature the motion delta is measured against. A
/// zero-size frame yields all-zero metrics and no signature.
pub fn analyze_frame(
    image: &ColorFrame,
    config: &MetricsConfig,
    reference: Option<&MotionSignature>,
) -> FrameAnalysis {
    if image.is_empty() {
        return FrameAnalysis {
            metrics: QualityMetrics::default(),
            signature: None,
        };
    }

    let luma = luminance(image).data.mapv(|v| v * LUMA_SCALE);
    let analysis = downsample_max_edge(&luma, config.analysis_max_edge);

    let (mean_luminance, luminance_variance) = exposure::luminance_stats(&analysis);
    let sharpness = sharpness::sharpness(&analysis, config.sharpness_metric);
    let signature = MotionSignature::from_luma(&analysis);
    let motion_delta = match (&signature, reference) {
        (Some(current), Some(previous)) => Some(current.delta(previous)),
        _ => None,
    };

    FrameAnalysis {
        metrics: QualityMetrics {
            sharpness,
            mean_luminance,
            luminance_variance,
            motion_delta,
        },
        signature,
    }
}

/// Box-average a plane by an integer factor so its longest edge is at most
/// `max_edge`. Planes already small enough are returned unchanged.
pub fn downsample_max_edge(data: &Array2<f32>, max_edge: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    let long_edge = h.max(w);
    if max_edge == 0 || long_edge <= max_edge {
        return data.clone();
    }

    let factor = long_edge.div_ceil(max_edge);
    let out_h = (h / factor).max(1);
    let out_w = (w / factor).max(1);
    let block_h = factor.min(h);
    let block_w = factor.min(w);
    let area = (block_h * block_w) as f32;

    Array2::from_shape_fn((out_h, out_w), |(row, col)| {
        let r0 = row * factor;
        let c0 = col * factor;
        let mut sum = 0.0f32;
        for r in r0..r0 + block_h {
            for c in c0..c0 + block_w {
                sum += data[[r, c]];
            }
        }
        sum / area
    })
}

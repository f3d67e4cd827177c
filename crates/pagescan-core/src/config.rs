use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANALYSIS_MAX_EDGE, DEFAULT_BASE_INTERVAL_MS, DEFAULT_BRIGHT_THRESHOLD,
    DEFAULT_DARK_THRESHOLD, DEFAULT_DENSITY, DEFAULT_DUPLICATE_THRESHOLD, DEFAULT_GLARE_THRESHOLD,
    DEFAULT_MIN_INTERVAL_MS, DEFAULT_SHARPNESS_CEILING, DEFAULT_SHARPNESS_THRESHOLD,
};
use crate::enhance::{PageFilter, QualityTier};
use crate::error::{PagescanError, Result};

/// Every tunable option of a scanning session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub scoring: ScoringThresholds,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub enhancement: EnhancementConfig,
}

impl ScanConfig {
    /// Check every section, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.scoring.validate()?;
        self.metrics.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// 0.0 = sparse (longest interval), 1.0 = dense (shortest interval).
    pub density: f32,
    /// Interval used at density <= 0.5.
    pub base_interval_ms: u64,
    /// Floor on the interval at any density.
    pub min_interval_ms: u64,
    /// Trim start. Defaults to the beginning of the video.
    pub start_ms: Option<u64>,
    /// Trim end (exclusive). Defaults to the video duration.
    pub end_ms: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            start_ms: None,
            end_ms: None,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.density) {
            return Err(PagescanError::InvalidConfig(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        if self.min_interval_ms == 0 {
            return Err(PagescanError::InvalidConfig(
                "min_interval_ms must be > 0".into(),
            ));
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(PagescanError::InvalidConfig(format!(
                "min_interval_ms ({}) exceeds base_interval_ms ({})",
                self.min_interval_ms, self.base_interval_ms
            )));
        }
        Ok(())
    }

    /// Sampling interval for the configured density:
    /// `clamp(base * (1.5 - density), min, base)`.
    pub fn interval_ms(&self) -> f64 {
        let base = self.base_interval_ms as f64;
        let raw = base * (1.5 - self.density.clamp(0.0, 1.0) as f64);
        raw.clamp(self.min_interval_ms as f64, base)
    }
}

/// Thresholds for the candidate scorer. Luminance values use the 0-255 scale.
///
/// The defaults are starting points for calibration rather than derived
/// values; every field can be overridden independently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Luminance variance below which a bright frame is glare.
    pub glare_threshold: f32,
    /// Mean luminance above which a frame is overexposed.
    pub bright_threshold: f32,
    /// Mean luminance below which a frame is too dark.
    pub dark_threshold: f32,
    /// Sharpness below which a frame is blurred.
    pub sharpness_threshold: f32,
    /// Sharpness that maps to a quality score of 1.0.
    pub sharpness_ceiling: f32,
    /// Motion delta below which a frame duplicates the last accepted one.
    pub duplicate_threshold: f32,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            glare_threshold: DEFAULT_GLARE_THRESHOLD,
            bright_threshold: DEFAULT_BRIGHT_THRESHOLD,
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            sharpness_threshold: DEFAULT_SHARPNESS_THRESHOLD,
            sharpness_ceiling: DEFAULT_SHARPNESS_CEILING,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
        }
    }
}

impl ScoringThresholds {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("glare_threshold", self.glare_threshold),
            ("bright_threshold", self.bright_threshold),
            ("dark_threshold", self.dark_threshold),
            ("sharpness_threshold", self.sharpness_threshold),
            ("sharpness_ceiling", self.sharpness_ceiling),
            ("duplicate_threshold", self.duplicate_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PagescanError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.sharpness_ceiling <= self.sharpness_threshold {
            return Err(PagescanError::InvalidConfig(format!(
                "sharpness_ceiling ({}) must exceed sharpness_threshold ({})",
                self.sharpness_ceiling, self.sharpness_threshold
            )));
        }
        Ok(())
    }

    /// Map a sharpness value onto [0, 1] between the threshold and ceiling.
    pub fn normalize_sharpness(&self, sharpness: f32) -> f32 {
        let span = self.sharpness_ceiling - self.sharpness_threshold;
        if span <= 0.0 {
            return if sharpness >= self.sharpness_ceiling { 1.0 } else { 0.0 };
        }
        ((sharpness - self.sharpness_threshold) / span).clamp(0.0, 1.0)
    }
}

/// Which edge-energy measure drives the sharpness metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharpnessMetric {
    #[default]
    Laplacian,
    Gradient,
}

impl fmt::Display for SharpnessMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laplacian => write!(f, "Laplacian"),
            Self::Gradient => write!(f, "Gradient"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub sharpness_metric: SharpnessMetric,
    /// Longest edge of the luminance downsample the metrics run on.
    pub analysis_max_edge: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            sharpness_metric: SharpnessMetric::default(),
            analysis_max_edge: DEFAULT_ANALYSIS_MAX_EDGE,
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.analysis_max_edge < 3 {
            return Err(PagescanError::InvalidConfig(format!(
                "analysis_max_edge must be at least 3, got {}",
                self.analysis_max_edge
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    pub quality_tier: QualityTier,
    /// Filter applied to selected pages that have no explicit edit.
    pub default_filter: PageFilter,
}

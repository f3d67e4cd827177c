pub mod config;
pub mod enhance;
pub mod info;
pub mod run;
pub mod sample;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pagescan_core::config::{ScanConfig, SharpnessMetric};
use pagescan_core::io::ImageSequenceSource;

/// A video given as a directory of extracted frames.
#[derive(Args)]
pub struct SourceArgs {
    /// Directory of video frames (png, jpg, bmp, tiff), sorted by name
    pub frames: PathBuf,

    /// Frame rate the frames were extracted at
    #[arg(long, default_value = "30")]
    pub fps: f64,
}

impl SourceArgs {
    pub fn open(&self) -> Result<ImageSequenceSource> {
        ImageSequenceSource::open(&self.frames, self.fps)
            .with_context(|| format!("Failed to open frames in {}", self.frames.display()))
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Laplacian,
    Gradient,
}

impl From<MetricArg> for SharpnessMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Laplacian => SharpnessMetric::Laplacian,
            MetricArg::Gradient => SharpnessMetric::Gradient,
        }
    }
}

/// Sampling overrides shared by `sample` and `run`.
#[derive(Args)]
pub struct ScanArgs {
    /// TOML config file (see `pagescan config`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sampling density, 0.0 (sparse) to 1.0 (dense)
    #[arg(long)]
    pub density: Option<f32>,

    /// Start of the sampled range in milliseconds
    #[arg(long)]
    pub start: Option<u64>,

    /// End of the sampled range in milliseconds (exclusive)
    #[arg(long)]
    pub end: Option<u64>,

    /// Sharpness metric
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,
}

impl ScanArgs {
    /// Load the config file (or defaults) and apply command-line overrides.
    pub fn resolve(&self) -> Result<ScanConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(density) = self.density {
            config.sampling.density = density;
        }
        if self.start.is_some() {
            config.sampling.start_ms = self.start;
        }
        if self.end.is_some() {
            config.sampling.end_ms = self.end;
        }
        if let Some(metric) = self.metric {
            config.metrics.sharpness_metric = metric.into();
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    let Some(path) = path else {
        return Ok(ScanConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Scale between normalized pixel values and the 8-bit scale used by all
/// luminance thresholds.
pub const LUMA_SCALE: f32 = 255.0;

/// Default longest edge (pixels) of the luminance downsample used for
/// sharpness and exposure analysis.
pub const DEFAULT_ANALYSIS_MAX_EDGE: usize = 320;

/// Side length of the fixed grid used for motion/duplicate comparison.
pub const MOTION_GRID_SIZE: usize = 32;

/// Longest edge (pixels) of candidate thumbnails.
pub const THUMBNAIL_MAX_EDGE: u32 = 160;

/// Long edge of an A4 page at 300 DPI. Output scaling never exceeds this
/// baseline multiplied by the quality tier factor.
pub const PRINT_BASELINE_LONG_EDGE_PX: f32 = 3508.0;

/// Default sampling interval at density <= 0.5, in milliseconds.
pub const DEFAULT_BASE_INTERVAL_MS: u64 = 1000;

/// Lower bound on the sampling interval, in milliseconds.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 200;

/// Default sampling density.
pub const DEFAULT_DENSITY: f32 = 0.5;

/// Luminance variance (0-255 scale) below which a bright frame counts as glare.
pub const DEFAULT_GLARE_THRESHOLD: f32 = 120.0;

/// Mean luminance (0-255) above which a frame is overexposed.
pub const DEFAULT_BRIGHT_THRESHOLD: f32 = 225.0;

/// Mean luminance (0-255) below which a frame is too dark.
pub const DEFAULT_DARK_THRESHOLD: f32 = 40.0;

/// Sharpness below which a frame is rejected as blurred.
pub const DEFAULT_SHARPNESS_THRESHOLD: f32 = 30.0;

/// Sharpness mapped to a quality score of 1.0.
pub const DEFAULT_SHARPNESS_CEILING: f32 = 800.0;

/// Mean absolute luminance difference (0-255) below which a frame duplicates
/// the last accepted one.
pub const DEFAULT_DUPLICATE_THRESHOLD: f32 = 4.0;

/// DOCUMENT filter: global contrast multiplier.
pub const DOCUMENT_CONTRAST: f32 = 1.2;

/// DOCUMENT filter: brightness offset on the 0-255 scale.
pub const DOCUMENT_BRIGHTNESS: f32 = 10.0;

/// DOCUMENT filter: unsharp mask strength.
pub const DOCUMENT_SHARPEN_AMOUNT: f32 = 0.3;

/// DOCUMENT filter: unsharp mask Gaussian sigma.
pub const DOCUMENT_SHARPEN_RADIUS: f32 = 1.0;

/// BLACK_WHITE filter: contrast multiplier.
pub const BLACK_WHITE_CONTRAST: f32 = 1.5;

/// BLACK_WHITE filter: brightness offset on the 0-255 scale.
pub const BLACK_WHITE_BRIGHTNESS: f32 = -40.0;

/// Minimum normalized area of a perspective quad.
pub const MIN_QUAD_AREA: f64 = 1e-4;

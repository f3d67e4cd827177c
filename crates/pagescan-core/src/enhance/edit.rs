use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_QUAD_AREA;
use crate::error::{PagescanError, Result};

/// Lossless rotation in clockwise quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn degrees(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = PagescanError;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Cw90),
            180 => Ok(Self::Cw180),
            270 => Ok(Self::Cw270),
            other => Err(PagescanError::InvalidGeometry(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {other}"
            ))),
        }
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> u32 {
        rotation.degrees()
    }
}

/// Straight crop in normalized frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCropRect", into = "RawCropRect")]
pub struct CropRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawCropRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl CropRect {
    /// The whole frame.
    pub const FULL: CropRect = CropRect {
        left: 0.0,
        top: 0.0,
        right: 1.0,
        bottom: 1.0,
    };

    /// Edges must lie in [0, 1] with `left < right` and `top < bottom`.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        let edges = [left, top, right, bottom];
        if edges.iter().any(|v| !v.is_finite() || !(0.0..=1.0).contains(v)) {
            return Err(PagescanError::InvalidGeometry(format!(
                "crop edges must lie in [0, 1], got {edges:?}"
            )));
        }
        if left >= right || top >= bottom {
            return Err(PagescanError::InvalidGeometry(format!(
                "crop rectangle has zero area: {edges:?}"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<RawCropRect> for CropRect {
    type Error = PagescanError;

    fn try_from(raw: RawCropRect) -> Result<Self> {
        CropRect::new(raw.left, raw.top, raw.right, raw.bottom)
    }
}

impl From<CropRect> for RawCropRect {
    fn from(rect: CropRect) -> Self {
        RawCropRect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        }
    }
}

/// A point in normalized frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Document outline used to unwarp a page to a rectangle.
///
/// Corners are ordered top-left, top-right, bottom-right, bottom-left and
/// must form a convex quadrilateral of non-trivial area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[Point; 4]", into = "[Point; 4]")]
pub struct PerspectiveQuad {
    corners: [Point; 4],
}

impl PerspectiveQuad {
    pub fn new(corners: [Point; 4]) -> Result<Self> {
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if corners.iter().any(|p| !in_unit(p.x) || !in_unit(p.y)) {
            return Err(PagescanError::InvalidGeometry(format!(
                "quad corners must lie in [0, 1], got {corners:?}"
            )));
        }

        // With y pointing down, a clockwise TL, TR, BR, BL walk turns right at
        // every corner: each consecutive edge cross product is positive.
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let c = corners[(i + 2) % 4];
            let cross = (b.x - a.x) as f64 * (c.y - b.y) as f64
                - (b.y - a.y) as f64 * (c.x - b.x) as f64;
            if cross < f64::EPSILON {
                return Err(PagescanError::InvalidGeometry(
                    "quad corners must form a convex quadrilateral ordered \
                     top-left, top-right, bottom-right, bottom-left"
                        .into(),
                ));
            }
        }

        let area = shoelace_area(&corners);
        if area < MIN_QUAD_AREA {
            return Err(PagescanError::InvalidGeometry(format!(
                "quad area {area:.6} is too small"
            )));
        }

        Ok(Self { corners })
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }
}

impl TryFrom<[Point; 4]> for PerspectiveQuad {
    type Error = PagescanError;

    fn try_from(corners: [Point; 4]) -> Result<Self> {
        PerspectiveQuad::new(corners)
    }
}

impl From<PerspectiveQuad> for [Point; 4] {
    fn from(quad: PerspectiveQuad) -> Self {
        quad.corners
    }
}

fn shoelace_area(corners: &[Point; 4]) -> f64 {
    let twice: f64 = (0..4)
        .map(|i| {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
        })
        .sum();
    twice.abs() / 2.0
}

/// Pixel filter applied after geometric correction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageFilter {
    /// Auto-contrast, contrast boost and mild sharpening.
    #[default]
    Document,
    /// Pixels pass through unchanged.
    Original,
    /// Grayscale with a strong contrast push.
    BlackWhite,
}

impl fmt::Display for PageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "Document"),
            Self::Original => write!(f, "Original"),
            Self::BlackWhite => write!(f, "Black & White"),
        }
    }
}

impl FromStr for PageFilter {
    type Err = PagescanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "document" => Ok(Self::Document),
            "original" => Ok(Self::Original),
            "black_white" | "bw" => Ok(Self::BlackWhite),
            _ => Err(PagescanError::UnknownFilter(s.to_string())),
        }
    }
}

/// User-supplied transform parameters for one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEdit {
    pub rotation: Rotation,
    pub crop: CropRect,
    /// When present, replaces the straight crop.
    pub perspective: Option<PerspectiveQuad>,
    pub filter: PageFilter,
}

impl PageEdit {
    pub fn with_filter(filter: PageFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

use ndarray::Array2;

/// A single image plane.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel planes.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    /// Build a color frame from three equally sized planes.
    pub fn from_planes(red: Array2<f32>, green: Array2<f32>, blue: Array2<f32>) -> Self {
        Self {
            red: Frame::new(red),
            green: Frame::new(green),
            blue: Frame::new(blue),
        }
    }

    /// A frame with every pixel set to the given normalized RGB value.
    pub fn filled(height: usize, width: usize, rgb: [f32; 3]) -> Self {
        Self::from_planes(
            Array2::from_elem((height, width), rgb[0]),
            Array2::from_elem((height, width), rgb[1]),
            Array2::from_elem((height, width), rgb[2]),
        )
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Apply the same plane transform to every channel.
    pub fn map_planes(&self, f: impl Fn(&Frame) -> Frame) -> ColorFrame {
        ColorFrame {
            red: f(&self.red),
            green: f(&self.green),
            blue: f(&self.blue),
        }
    }
}

/// A decoded video frame at a timestamp.
///
/// Owned by whichever stage is processing it; the enhancement pipeline only
/// ever borrows it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSample {
    pub timestamp_ms: u64,
    pub image: ColorFrame,
}

impl FrameSample {
    pub fn new(timestamp_ms: u64, image: ColorFrame) -> Self {
        Self {
            timestamp_ms,
            image,
        }
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

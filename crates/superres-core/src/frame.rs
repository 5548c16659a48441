use ndarray::Array2;

/// One single-channel observation.
/// Loaded frames hold intensities in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn with_index(mut self, frame_index: usize) -> Self {
        self.metadata.frame_index = frame_index;
        self
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    pub frame_index: usize,
}

/// Content motion of a frame relative to the reference frame.
///
/// A frame displaced by `(dx, dy)` satisfies
/// `frame(x, y) ≈ reference(x - dx, y - dy)`; `dx` runs along columns and
/// `dy` along rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

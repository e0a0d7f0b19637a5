use ndarray::{ArrayView3, ArrayViewMut3};

/// Bytes per pixel of every decoded frame (B, G, R).
pub const CHANNELS: usize = 3;

/// A single decoded video frame: contiguous BGR bytes in row-major order.
///
/// BGR is the layout the OpenCV collaborators expect, so readers convert
/// once at decode time and adapters can hand the bytes over unchanged.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    /// `index` is the 0-based decode position in the source.
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A frame where every byte is `value`.
    pub fn filled(width: u32, height: u32, value: u8, index: usize) -> Self {
        let len = (width as usize) * (height as usize) * CHANNELS;
        Self::new(vec![value; len], width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Pixel view shaped `(height, width, 3)`.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Paints a solid disc of `value` centered on `(cx, cy)`, clipped to the frame.
    pub fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, value: u8) {
        let mut pixels = self.as_ndarray_mut();
        let (rows, cols, _) = pixels.dim();
        let r2 = radius * radius;
        for row in 0..rows {
            let dy = row as f64 - cy;
            if dy * dy > r2 {
                continue;
            }
            for col in 0..cols {
                let dx = col as f64 - cx;
                if dx * dx + dy * dy <= r2 {
                    pixels.slice_mut(ndarray::s![row, col, ..]).fill(value);
                }
            }
        }
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

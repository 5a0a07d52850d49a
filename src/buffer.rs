//! Pixel buffer: one image's red, green and blue planes.
//!
//! Pixels are stored in an `ndarray::Array3<u8>` of shape `(height, width, 3)`
//! with row 0 at the top, the same channel-last layout the filters consume.
//! A buffer is never mutated once built; operations allocate a new one.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::EditError;

/// Color channel of an RGB buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index of the channel along the last array axis.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
}

impl PixelBuffer {
    /// All-black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: Array3::zeros((height as usize, width as usize, 3)),
        }
    }

    /// Wrap an existing `(height, width, 3)` array.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self, EditError> {
        if pixels.dim().2 != 3 {
            return Err(EditError::InvalidShape(pixels.shape().to_vec()));
        }
        Ok(Self { pixels })
    }

    /// Build from row-major interleaved RGB bytes (`width * height * 3` long).
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, EditError> {
        let shape = (height as usize, width as usize, 3);
        let len = data.len();
        Array3::from_shape_vec(shape, data)
            .map(|pixels| Self { pixels })
            .map_err(|_| EditError::InvalidShape(vec![len]))
    }

    /// Build from three same-sized planes.
    pub fn from_planes<'a>(
        red: ArrayView2<'a, u8>,
        green: ArrayView2<'a, u8>,
        blue: ArrayView2<'a, u8>,
    ) -> Result<Self, EditError> {
        let (height, width) = red.dim();
        for plane in [&green, &blue] {
            if plane.dim() != (height, width) {
                return Err(EditError::DimensionMismatch {
                    expected: (width as u32, height as u32),
                    found: (plane.dim().1 as u32, plane.dim().0 as u32),
                });
            }
        }
        let mut pixels = Array3::<u8>::zeros((height, width, 3));
        pixels.index_axis_mut(Axis(2), 0).assign(&red);
        pixels.index_axis_mut(Axis(2), 1).assign(&green);
        pixels.index_axis_mut(Axis(2), 2).assign(&blue);
        Ok(Self { pixels })
    }

    /// Build by evaluating `f(row, col)` for every position.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut pixels = Array3::<u8>::zeros((height as usize, width as usize, 3));
        for y in 0..height as usize {
            for x in 0..width as usize {
                let [r, g, b] = f(y, x);
                pixels[[y, x, 0]] = r;
                pixels[[y, x, 1]] = g;
                pixels[[y, x, 2]] = b;
            }
        }
        Self { pixels }
    }

    /// Filters always produce `(h, w, 3)` arrays from `(h, w, 3)` input.
    pub(crate) fn from_filter_output(pixels: Array3<u8>) -> Self {
        debug_assert_eq!(pixels.dim().2, 3);
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// RGB triple at `(row, col)`, or `None` outside the image.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        let (height, width, _) = self.pixels.dim();
        if row >= height || col >= width {
            return None;
        }
        Some([
            self.pixels[[row, col, 0]],
            self.pixels[[row, col, 1]],
            self.pixels[[row, col, 2]],
        ])
    }

    /// Single channel value at `(row, col)`, or `None` outside the image.
    pub fn get(&self, row: usize, col: usize, channel: Channel) -> Option<u8> {
        self.pixels.get([row, col, channel.index()]).copied()
    }

    pub fn plane(&self, channel: Channel) -> ArrayView2<'_, u8> {
        self.pixels.index_axis(Axis(2), channel.index())
    }

    pub fn plane_owned(&self, channel: Channel) -> Array2<u8> {
        self.plane(channel).to_owned()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }

    /// Row-major interleaved RGB bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }
}

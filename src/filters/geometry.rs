//! Geometric flips.

use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

/// Mirror axis for [`flip_u8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    /// Mirror columns: `new_col = width - 1 - col`.
    Horizontal,
    /// Mirror rows: `new_row = height - 1 - row`.
    Vertical,
    /// Mirror both axes (180 degree rotation).
    Both,
}

impl FlipDirection {
    /// Any token other than a horizontal or vertical flip mirrors both axes.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "horizontal" | "horizontal-flip" => FlipDirection::Horizontal,
            "vertical" | "vertical-flip" => FlipDirection::Vertical,
            _ => FlipDirection::Both,
        }
    }
}

impl FromStr for FlipDirection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FlipDirection::from_token(s))
    }
}

/// Flip an RGB image.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `direction` - Axis to mirror
///
/// # Returns
/// Flipped image with the same dimensions
pub fn flip_u8(input: ArrayView3<u8>, direction: FlipDirection) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let (ny, nx) = match direction {
                FlipDirection::Horizontal => (y, width - 1 - x),
                FlipDirection::Vertical => (height - 1 - y, x),
                FlipDirection::Both => (height - 1 - y, width - 1 - x),
            };
            for c in 0..channels {
                output[[ny, nx, c]] = input[[y, x, c]];
            }
        }
    }
    output
}

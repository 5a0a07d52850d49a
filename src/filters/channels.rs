//! RGB channel split and combine.

use ndarray::{Array3, ArrayView3, Axis};

use super::grayscale::{greyscale_u8, GreyscaleComponent};
use crate::error::EditError;

/// Split an image into its red, green and blue masked projections.
///
/// Each output keeps one source channel and zeroes the other two, exactly
/// like the `red`/`green`/`blue` greyscale components.
pub fn rgb_split_u8(input: ArrayView3<u8>) -> [Array3<u8>; 3] {
    [
        greyscale_u8(input, GreyscaleComponent::Red),
        greyscale_u8(input, GreyscaleComponent::Green),
        greyscale_u8(input, GreyscaleComponent::Blue),
    ]
}

/// Merge three images channel-wise.
///
/// The red plane comes from `red`, green from `green` and blue from `blue`.
/// All three sources must share dimensions.
///
/// # Returns
/// Combined image, or `DimensionMismatch` naming the first differing source
pub fn rgb_combine_u8<'a>(
    red: ArrayView3<'a, u8>,
    green: ArrayView3<'a, u8>,
    blue: ArrayView3<'a, u8>,
) -> Result<Array3<u8>, EditError> {
    let (height, width, _) = red.dim();
    for other in [&green, &blue] {
        let (h, w, _) = other.dim();
        if (h, w) != (height, width) {
            return Err(EditError::DimensionMismatch {
                expected: (width as u32, height as u32),
                found: (w as u32, h as u32),
            });
        }
    }

    let mut output = Array3::<u8>::zeros((height, width, 3));
    for (c, source) in [red, green, blue].iter().enumerate() {
        output
            .index_axis_mut(Axis(2), c)
            .assign(&source.index_axis(Axis(2), c));
    }
    Ok(output)
}

//! Color adjustment filters: Brighten/Darken, Sepia.
//!
//! Pixel-wise operations that don't require spatial context. Every output
//! value is clamped to 0-255.

use ndarray::{Array3, ArrayView3};

/// Sepia tone matrix, one row per output channel.
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[inline]
pub(crate) fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

// ============================================================================
// Brighten / Darken
// ============================================================================

/// Add a signed increment to every channel of every pixel.
///
/// Positive values brighten, negative values darken. Results are clamped, so
/// brightening then darkening by the same amount only restores pixels that
/// never touched 0 or 255.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `increment` - Signed amount added to each channel
///
/// # Returns
/// Adjusted image with same dimensions
pub fn brighten_u8(input: ArrayView3<u8>, increment: i32) -> Array3<u8> {
    input.mapv(|v| clamp_channel((v as i32).saturating_add(increment)))
}

// ============================================================================
// Sepia
// ============================================================================

/// Apply the sepia tone matrix.
///
/// Each output channel is the matrix row dotted with the source RGB,
/// truncated to an integer, then clamped.
pub fn sepia_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f64;
            let g = input[[y, x, 1]] as f64;
            let b = input[[y, x, 2]] as f64;

            for (c, row) in SEPIA.iter().enumerate() {
                let v = row[0] * r + row[1] * g + row[2] * b;
                output[[y, x, c]] = clamp_channel(v as i32);
            }
        }
    }
    output
}

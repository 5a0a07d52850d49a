//! Lossy compression with a separable 2D Haar wavelet.
//!
//! Pipeline per channel:
//! 1. Pad to the smallest `N x N` square with `N` a power of two, zero fill.
//! 2. Forward transform: at scales `c = N, N/2, ..., 2` transform the first
//!    `c` entries of every row, then of every column.
//! 3. Threshold: zero coefficients below a percentile of the distinct
//!    magnitudes (rounded to 3 decimals).
//! 4. Inverse transform at scales `c = 2, 4, ..., N`, columns then rows.
//! 5. Crop back to the source size, truncate and clamp.
//!
//! The three channels run in parallel; each is computed exactly as the
//! sequential definition.

use std::f64::consts::SQRT_2;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut2, Axis};
use rayon::prelude::*;

use super::color_adjust::clamp_channel;

/// Smallest power of two `>= max(width, height)`.
pub fn padded_size(width: usize, height: usize) -> usize {
    width.max(height).max(1).next_power_of_two()
}

// ============================================================================
// Haar transform
// ============================================================================

/// One forward Haar step on the first `c` entries of every lane.
///
/// Pairs `(x[2k], x[2k+1])` become the average `(a+b)/sqrt2` in the first
/// half of the window and the difference `(a-b)/sqrt2` in the second half.
fn haar_step(mut grid: ArrayViewMut2<f64>, c: usize) {
    let half = c / 2;
    let mut avg = vec![0.0f64; half];
    let mut diff = vec![0.0f64; half];

    for mut lane in grid.rows_mut() {
        for k in 0..half {
            let a = lane[2 * k];
            let b = lane[2 * k + 1];
            avg[k] = (a + b) / SQRT_2;
            diff[k] = (a - b) / SQRT_2;
        }
        for k in 0..half {
            lane[k] = avg[k];
            lane[k + half] = diff[k];
        }
    }
}

/// Inverse of [`haar_step`] on the first `c` entries of every lane.
fn inverse_haar_step(mut grid: ArrayViewMut2<f64>, c: usize) {
    let half = c / 2;
    let mut even = vec![0.0f64; half];
    let mut odd = vec![0.0f64; half];

    for mut lane in grid.rows_mut() {
        for k in 0..half {
            let a = lane[k];
            let d = lane[k + half];
            even[k] = (a + d) / SQRT_2;
            odd[k] = (a - d) / SQRT_2;
        }
        for k in 0..half {
            lane[2 * k] = even[k];
            lane[2 * k + 1] = odd[k];
        }
    }
}

/// Forward 2D Haar transform of a square power-of-two grid.
pub fn haar_forward(grid: &mut Array2<f64>) {
    let size = grid.nrows();
    debug_assert_eq!(size, grid.ncols());

    let mut c = size;
    while c > 1 {
        haar_step(grid.view_mut(), c);
        // Reversed axes turn columns into lanes, i.e. a transpose.
        haar_step(grid.view_mut().reversed_axes(), c);
        c /= 2;
    }
}

/// Inverse 2D Haar transform, undoing [`haar_forward`].
pub fn haar_inverse(grid: &mut Array2<f64>) {
    let size = grid.nrows();
    debug_assert_eq!(size, grid.ncols());

    let mut c = 2;
    while c <= size {
        inverse_haar_step(grid.view_mut().reversed_axes(), c);
        inverse_haar_step(grid.view_mut(), c);
        c *= 2;
    }
}

// ============================================================================
// Thresholding
// ============================================================================

/// Round half up to 3 decimal places.
#[inline]
fn round3(v: f64) -> f64 {
    (v * 1000.0 + 0.5).floor() / 1000.0
}

/// Magnitude below which coefficients are discarded.
///
/// Magnitudes are rounded to 3 decimals, deduplicated and sorted; the value at
/// index `round(distinct * percentage / 100)` is the threshold. An index past
/// the end selects the largest magnitude. `100` discards everything.
pub fn threshold_for(coefficients: ArrayView2<f64>, percentage: u8) -> f64 {
    if percentage >= 100 {
        return f64::INFINITY;
    }

    let mut magnitudes: Vec<f64> = coefficients.iter().map(|&v| round3(v).abs()).collect();
    magnitudes.sort_by(f64::total_cmp);
    magnitudes.dedup();

    if magnitudes.is_empty() {
        return 0.0;
    }

    let index = (magnitudes.len() as f64 * (percentage as f64 / 100.0)).round() as usize;
    magnitudes[index.min(magnitudes.len() - 1)]
}

/// Zero every coefficient whose magnitude is strictly below the threshold.
pub fn apply_threshold(coefficients: &mut Array2<f64>, threshold: f64) {
    coefficients.mapv_inplace(|v| if v.abs() < threshold { 0.0 } else { v });
}

// ============================================================================
// Compression
// ============================================================================

/// Compress a single plane. Returns a plane of the original size.
pub fn compress_plane(plane: ArrayView2<u8>, percentage: u8) -> Array2<u8> {
    let (height, width) = plane.dim();
    let size = padded_size(width, height);

    let mut grid = Array2::<f64>::zeros((size, size));
    for ((y, x), &v) in plane.indexed_iter() {
        grid[[y, x]] = v as f64;
    }

    haar_forward(&mut grid);
    let threshold = threshold_for(grid.view(), percentage);
    apply_threshold(&mut grid, threshold);
    haar_inverse(&mut grid);

    Array2::from_shape_fn((height, width), |(y, x)| clamp_channel(grid[[y, x]] as i32))
}

/// Compress an RGB image.
///
/// # Arguments
/// * `input` - Image (height, width, 3)
/// * `percentage` - Share of distinct coefficient magnitudes to discard
///   (0-100). `0` returns an unchanged copy; `100` yields black.
///
/// # Returns
/// Compressed image with the original dimensions
pub fn compress_u8(input: ArrayView3<u8>, percentage: u8) -> Array3<u8> {
    if percentage < 1 {
        return input.to_owned();
    }

    let (height, width, channels) = input.dim();
    let planes: Vec<Array2<u8>> = (0..channels)
        .into_par_iter()
        .map(|c| compress_plane(input.index_axis(Axis(2), c), percentage))
        .collect();

    let mut output = Array3::<u8>::zeros((height, width, channels));
    for (c, plane) in planes.iter().enumerate() {
        output.index_axis_mut(Axis(2), c).assign(plane);
    }
    output
}

//! Peak-based color correction.
//!
//! Each channel's histogram peak is found inside the interior band
//! `[PEAK_LOW, PEAK_HIGH]`, then every channel is shifted so its peak lands on
//! the average of the three peaks. Tails are ignored so clipped blacks and
//! whites don't dominate.

use ndarray::{Array3, ArrayView3};

use super::color_adjust::clamp_channel;
use super::histogram::channel_histograms;

pub const PEAK_LOW: usize = 10;
pub const PEAK_HIGH: usize = 245;

/// Index of the most frequent value in `[PEAK_LOW, PEAK_HIGH]`.
///
/// The first maximum wins. A channel with no values in the band reports 0.
pub fn find_peak(hist: &[u32; 256]) -> usize {
    let mut peak = 0usize;
    let mut best = 0u32;
    for (i, &count) in hist.iter().enumerate().take(PEAK_HIGH + 1).skip(PEAK_LOW) {
        if best < count {
            best = count;
            peak = i;
        }
    }
    peak
}

/// Per-channel offsets `avg_peak - peak_channel`.
pub fn peak_offsets(input: ArrayView3<u8>) -> [i32; 3] {
    let hist = channel_histograms(input);
    let peaks = hist.each_ref().map(|h| find_peak(h) as i32);
    let average = (peaks[0] + peaks[1] + peaks[2]) / 3;
    peaks.map(|p| average - p)
}

/// Align the histogram peaks of the three channels.
///
/// # Arguments
/// * `input` - Image (height, width, 3)
///
/// # Returns
/// Corrected image with the same dimensions
pub fn color_correct_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let offsets = peak_offsets(input);
    let mut output = input.to_owned();
    for ((_, _, c), v) in output.indexed_iter_mut() {
        *v = clamp_channel(*v as i32 + offsets[c]);
    }
    output
}

//! Histogram rendering.
//!
//! The histogram is itself an image: a fixed 256x256 canvas with a light grey
//! grid every 15 pixels and one polyline per channel, scaled so the most
//! frequent value across all channels reaches the top row.

use ndarray::{Array3, ArrayView3};

pub const CANVAS_SIZE: usize = 256;
pub const GRID_SPACING: usize = 15;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const GRID: [u8; 3] = [200, 200, 200];
const LINE_COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Per-channel frequency counts over 0-255.
pub fn channel_histograms(input: ArrayView3<u8>) -> [[u32; 256]; 3] {
    let (height, width, _) = input.dim();
    let mut hist = [[0u32; 256]; 3];

    for y in 0..height {
        for x in 0..width {
            for (c, channel) in hist.iter_mut().enumerate() {
                channel[input[[y, x, c]] as usize] += 1;
            }
        }
    }
    hist
}

/// Scale all three histograms by the same factor so the global maximum
/// maps to 255. Values are rounded half up.
pub fn normalize_histograms(hist: &[[u32; 256]; 3]) -> [[u8; 256]; 3] {
    let global_max = hist
        .iter()
        .flat_map(|channel| channel.iter().copied())
        .max()
        .unwrap_or(0);

    let mut normalized = [[0u8; 256]; 3];
    if global_max == 0 {
        return normalized;
    }

    for (out, channel) in normalized.iter_mut().zip(hist.iter()) {
        for (o, &count) in out.iter_mut().zip(channel.iter()) {
            *o = (count as f64 * 255.0 / global_max as f64).round() as u8;
        }
    }
    normalized
}

/// Fill rows `from..=to` (either order) of `col` with `color`.
fn draw_vertical(canvas: &mut Array3<u8>, col: usize, from: usize, to: usize, color: [u8; 3]) {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    for row in lo..=hi {
        for (c, &v) in color.iter().enumerate() {
            canvas[[row, col, c]] = v;
        }
    }
}

/// Render the normalized histograms of an RGB image.
///
/// For every column the red, green and blue lines are drawn in that order,
/// each as a vertical run from the previous column's height to this one,
/// so later channels cover earlier ones where they overlap. Every line
/// starts from row 0 at column 0.
///
/// # Returns
/// 256x256 RGB canvas
pub fn histogram_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let normalized = normalize_histograms(&channel_histograms(input));

    let mut canvas = Array3::from_shape_fn((CANVAS_SIZE, CANVAS_SIZE, 3), |(y, x, c)| {
        if y % GRID_SPACING == 0 || x % GRID_SPACING == 0 {
            GRID[c]
        } else {
            BACKGROUND[c]
        }
    });

    let mut previous = [0usize; 3];
    for col in 0..CANVAS_SIZE {
        for c in 0..3 {
            let current = 255 - normalized[c][col] as usize;
            draw_vertical(&mut canvas, col, previous[c], current, LINE_COLORS[c]);
            previous[c] = current;
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_at(canvas: &Array3<u8>, row: usize, col: usize) -> [u8; 3] {
        [canvas[[row, col, 0]], canvas[[row, col, 1]], canvas[[row, col, 2]]]
    }

    #[test]
    fn test_counts_per_channel() {
        let img = Array3::from_shape_fn((2, 2, 3), |(y, _, c)| (y * 10 + c) as u8);
        let hist = channel_histograms(img.view());
        assert_eq!(hist[0][0], 2);
        assert_eq!(hist[0][10], 2);
        assert_eq!(hist[1][1], 2);
        assert_eq!(hist[2][12], 2);
        assert_eq!(hist[2][0], 0);
    }

    #[test]
    fn test_normalization_uses_global_max() {
        let mut hist = [[0u32; 256]; 3];
        hist[0][5] = 10;
        hist[1][7] = 4;
        hist[2][9] = 1;
        let normalized = normalize_histograms(&hist);
        assert_eq!(normalized[0][5], 255);
        assert_eq!(normalized[1][7], 102);
        // 255 / 10 = 25.5 rounds up
        assert_eq!(normalized[2][9], 26);
    }

    #[test]
    fn test_canvas_shape_and_grid() {
        let img = Array3::from_elem((4, 4, 3), 128u8);
        let canvas = histogram_u8(img.view());
        assert_eq!(canvas.dim(), (256, 256, 3));
        // Off-line cells keep the grid / background rule.
        assert_eq!(pixel_at(&canvas, 30, 100), [200, 200, 200]);
        assert_eq!(pixel_at(&canvas, 100, 45), [200, 200, 200]);
        assert_eq!(pixel_at(&canvas, 100, 101), [255, 255, 255]);
    }

    #[test]
    fn test_every_cell_is_grid_background_or_last_line() {
        let img = Array3::from_shape_fn((16, 16, 3), |(y, x, c)| {
            ((y * 16 + x) * (c + 1) % 256) as u8
        });
        let normalized = normalize_histograms(&channel_histograms(img.view()));
        let canvas = histogram_u8(img.view());

        let mut previous = [0usize; 3];
        for col in 0..CANVAS_SIZE {
            let mut expected: Vec<Option<[u8; 3]>> = vec![None; CANVAS_SIZE];
            for c in 0..3 {
                let current = 255 - normalized[c][col] as usize;
                let (lo, hi) = (previous[c].min(current), previous[c].max(current));
                for cell in &mut expected[lo..=hi] {
                    *cell = Some(LINE_COLORS[c]);
                }
                previous[c] = current;
            }
            for (row, line) in expected.into_iter().enumerate() {
                let want = line.unwrap_or(if row % GRID_SPACING == 0 || col % GRID_SPACING == 0 {
                    GRID
                } else {
                    BACKGROUND
                });
                assert_eq!(pixel_at(&canvas, row, col), want, "row {} col {}", row, col);
            }
        }
    }

    #[test]
    fn test_uniform_image_spikes_at_value() {
        let img = Array3::from_elem((4, 4, 3), 128u8);
        let canvas = histogram_u8(img.view());
        // All channels share the same line; blue is drawn last and wins.
        assert_eq!(pixel_at(&canvas, 255, 10), [0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 0, 128), [0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 128, 128), [0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 128, 127), [255, 255, 255]);
    }

    #[test]
    fn test_line_starts_from_top_at_first_column() {
        let img = Array3::from_elem((2, 2, 3), 200u8);
        let canvas = histogram_u8(img.view());
        // Column 0 runs from row 0 down to row 255.
        assert_eq!(pixel_at(&canvas, 0, 0), [0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 200, 0), [0, 0, 255]);
    }

    #[test]
    fn test_red_only_line_visible_where_channels_differ() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 50;
        let canvas = histogram_u8(img.view());
        // Red spike at column 50; green and blue sit at the bottom there.
        assert_eq!(pixel_at(&canvas, 100, 50), [255, 0, 0]);
        assert_eq!(pixel_at(&canvas, 255, 50), [0, 0, 255]);
    }
}

//! Before/after preview compositing.
//!
//! Columns left of the split show the modified image; the split column and
//! everything right of it show the original.

use ndarray::{s, Array3, ArrayView3};

use crate::error::EditError;

/// First column taken from the original: `floor(width * percentage / 100)`,
/// capped at `width`.
pub fn split_column(width: usize, percentage: u8) -> usize {
    let column = (width as f64 * (percentage as f64 / 100.0)) as usize;
    column.min(width)
}

/// Compose `modified` (left) and `original` (right) at `percentage` of the
/// width.
///
/// # Arguments
/// * `original` - Unfiltered image (height, width, 3)
/// * `modified` - Filtered image, same shape as `original`
/// * `percentage` - 0 shows only the original, 100 only the modified image
///
/// # Returns
/// New composite image, or `DimensionMismatch` if the shapes differ
pub fn composite_u8(
    original: ArrayView3<u8>,
    modified: ArrayView3<u8>,
    percentage: u8,
) -> Result<Array3<u8>, EditError> {
    let (height, width, _) = modified.dim();
    let (orig_height, orig_width, _) = original.dim();
    if (orig_height, orig_width) != (height, width) {
        return Err(EditError::DimensionMismatch {
            expected: (orig_width as u32, orig_height as u32),
            found: (width as u32, height as u32),
        });
    }

    let split = split_column(width, percentage);
    let mut output = modified.to_owned();
    output
        .slice_mut(s![.., split.., ..])
        .assign(&original.slice(s![.., split.., ..]));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_column_truncates() {
        assert_eq!(split_column(10, 0), 0);
        assert_eq!(split_column(10, 35), 3);
        assert_eq!(split_column(7, 50), 3);
        assert_eq!(split_column(10, 100), 10);
    }

    #[test]
    fn test_composite_boundaries() {
        let original = Array3::from_elem((2, 4, 3), 10u8);
        let modified = Array3::from_elem((2, 4, 3), 200u8);

        assert_eq!(composite_u8(original.view(), modified.view(), 0).unwrap(), original);
        assert_eq!(composite_u8(original.view(), modified.view(), 100).unwrap(), modified);
    }

    #[test]
    fn test_composite_splits_columns() {
        let original = Array3::from_elem((2, 4, 3), 10u8);
        let modified = Array3::from_elem((2, 4, 3), 200u8);
        let result = composite_u8(original.view(), modified.view(), 50).unwrap();
        for y in 0..2 {
            assert_eq!(result[[y, 0, 0]], 200);
            assert_eq!(result[[y, 1, 1]], 200);
            assert_eq!(result[[y, 2, 2]], 10);
            assert_eq!(result[[y, 3, 0]], 10);
        }
    }

    #[test]
    fn test_composite_rejects_mismatched_shapes() {
        let original = Array3::<u8>::zeros((2, 4, 3));
        let modified = Array3::<u8>::zeros((2, 5, 3));
        assert_eq!(
            composite_u8(original.view(), modified.view(), 50),
            Err(EditError::DimensionMismatch {
                expected: (4, 2),
                found: (5, 2)
            })
        );
    }
}

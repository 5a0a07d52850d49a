//! Engine operations over a named [`ImageStore`].
//!
//! Each operation looks up its sources, validates its parameters, runs one
//! filter and publishes the result under the destination name. On error the
//! store is left untouched.

use crate::buffer::PixelBuffer;
use crate::error::EditError;
use crate::filters::{
    brighten_u8, color_correct_u8, composite_u8, compress_u8, convolve_u8, flip_u8,
    greyscale_u8, histogram_u8, levels_u8, rgb_combine_u8, rgb_split_u8, sepia_u8, FlipDirection,
    GreyscaleComponent, Kernel, LevelCurve, LevelPoints,
};
use crate::store::ImageStore;

/// Validate a 0-100 percentage.
pub fn percentage(value: i32) -> Result<u8, EditError> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(EditError::InvalidParameter(format!(
            "percentage {} must be within 0-100",
            value
        )))
    }
}

fn published(operation: &str, source: &str, destination: &str, store: &ImageStore) {
    if let Some(buffer) = store.get(destination) {
        tracing::debug!(
            operation,
            source = %source,
            destination = %destination,
            width = buffer.width(),
            height = buffer.height(),
            "Image derived"
        );
    }
}

/// Derive `destination` from `source` with a filter that cannot fail.
fn apply(
    store: &mut ImageStore,
    operation: &str,
    source: &str,
    destination: &str,
    filter: impl FnOnce(&PixelBuffer) -> PixelBuffer,
) -> Result<(), EditError> {
    store.derive(source, destination, |buffer| Ok(filter(buffer)))?;
    published(operation, source, destination, store);
    Ok(())
}

pub fn flip(
    store: &mut ImageStore,
    direction: FlipDirection,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    apply(store, "flip", source, destination, |buffer| {
        PixelBuffer::from_filter_output(flip_u8(buffer.view(), direction))
    })
}

/// Brighten (positive) or darken (negative) every channel.
pub fn brighten(
    store: &mut ImageStore,
    increment: i32,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    apply(store, "brighten", source, destination, |buffer| {
        PixelBuffer::from_filter_output(brighten_u8(buffer.view(), increment))
    })
}

pub fn greyscale(
    store: &mut ImageStore,
    component: GreyscaleComponent,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    apply(store, component.name(), source, destination, |buffer| {
        PixelBuffer::from_filter_output(greyscale_u8(buffer.view(), component))
    })
}

pub fn sepia(store: &mut ImageStore, source: &str, destination: &str) -> Result<(), EditError> {
    apply(store, "sepia", source, destination, |buffer| {
        PixelBuffer::from_filter_output(sepia_u8(buffer.view()))
    })
}

/// Blur or sharpen.
pub fn filter(
    store: &mut ImageStore,
    kernel: Kernel,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    apply(store, kernel.name(), source, destination, |buffer| {
        PixelBuffer::from_filter_output(convolve_u8(buffer.view(), kernel))
    })
}

/// Publish the red, green and blue projections of `source`.
pub fn rgb_split(
    store: &mut ImageStore,
    source: &str,
    red_destination: &str,
    green_destination: &str,
    blue_destination: &str,
) -> Result<(), EditError> {
    let [red, green, blue] = rgb_split_u8(store.require(source)?.view());
    store.put(red_destination, PixelBuffer::from_filter_output(red));
    store.put(green_destination, PixelBuffer::from_filter_output(green));
    store.put(blue_destination, PixelBuffer::from_filter_output(blue));

    tracing::debug!(
        source = %source,
        red = %red_destination,
        green = %green_destination,
        blue = %blue_destination,
        "RGB split"
    );
    Ok(())
}

/// Merge the red plane of `red_source`, green of `green_source` and blue of
/// `blue_source`. The three sources must share dimensions.
pub fn rgb_combine(
    store: &mut ImageStore,
    destination: &str,
    red_source: &str,
    green_source: &str,
    blue_source: &str,
) -> Result<(), EditError> {
    let combined = rgb_combine_u8(
        store.require(red_source)?.view(),
        store.require(green_source)?.view(),
        store.require(blue_source)?.view(),
    )?;
    store.put(destination, PixelBuffer::from_filter_output(combined));
    published("rgb-combine", red_source, destination, store);
    Ok(())
}

/// Wavelet compression discarding `percentage` percent of the distinct
/// coefficient magnitudes.
pub fn compress(
    store: &mut ImageStore,
    percentage: i32,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    let percentage = self::percentage(percentage)?;
    apply(store, "compress", source, destination, |buffer| {
        PixelBuffer::from_filter_output(compress_u8(buffer.view(), percentage))
    })
}

/// Render the 256x256 histogram canvas of `source`.
pub fn histogram(store: &mut ImageStore, source: &str, destination: &str) -> Result<(), EditError> {
    apply(store, "histogram", source, destination, |buffer| {
        PixelBuffer::from_filter_output(histogram_u8(buffer.view()))
    })
}

pub fn color_correct(
    store: &mut ImageStore,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    apply(store, "color-correct", source, destination, |buffer| {
        PixelBuffer::from_filter_output(color_correct_u8(buffer.view()))
    })
}

/// Levels adjustment through `black < mid < white`, each in 0-255.
pub fn levels_adjust(
    store: &mut ImageStore,
    black: i32,
    mid: i32,
    white: i32,
    source: &str,
    destination: &str,
) -> Result<(), EditError> {
    let curve = LevelCurve::from(LevelPoints::new(black, mid, white)?);
    apply(store, "levels-adjust", source, destination, |buffer| {
        PixelBuffer::from_filter_output(levels_u8(buffer.view(), &curve))
    })
}

/// Restore the columns of `modified` from `percentage` of the width onward
/// to the pixels of `original`, replacing the `modified` entry.
pub fn operation_preview(
    store: &mut ImageStore,
    percentage: i32,
    original: &str,
    modified: &str,
) -> Result<(), EditError> {
    let percentage = self::percentage(percentage)?;
    let composite = composite_u8(
        store.require(original)?.view(),
        store.require(modified)?.view(),
        percentage,
    )?;
    store.put(modified, PixelBuffer::from_filter_output(composite));
    tracing::debug!(
        original = %original,
        modified = %modified,
        percentage,
        "Operation preview applied"
    );
    Ok(())
}

/// Render `modified` left of the split and `original` right of it without
/// storing the result.
pub fn split_preview(
    store: &ImageStore,
    percentage: i32,
    original: &str,
    modified: &str,
) -> Result<PixelBuffer, EditError> {
    let percentage = self::percentage(percentage)?;
    let composite = composite_u8(
        store.require(original)?.view(),
        store.require(modified)?.view(),
        percentage,
    )?;
    Ok(PixelBuffer::from_filter_output(composite))
}

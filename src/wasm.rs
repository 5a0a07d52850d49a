//! WebAssembly exports for the rasterlab filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat RGB byte arrays (`width * height * 3`, row-major). Invalid sizes or
//! parameters are returned as JavaScript errors instead of panicking.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::error::EditError;
use crate::filters::{
    brighten_u8, color_correct_u8, composite_u8, compress_u8, convolve_u8, flip_u8, greyscale_u8,
    histogram_u8, levels_u8, rgb_combine_u8, sepia_u8, FlipDirection, GreyscaleComponent, Kernel,
    LevelCurve, LevelPoints,
};
use crate::operations::percentage;

fn js_error(error: EditError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn rgb_array(data: &[u8], width: usize, height: usize) -> Result<Array3<u8>, JsValue> {
    Array3::from_shape_vec((height, width, 3), data.to_vec())
        .map_err(|_| js_error(EditError::InvalidShape(vec![data.len()])))
}

fn into_bytes(result: Array3<u8>) -> Vec<u8> {
    result.into_raw_vec_and_offset().0
}

// ============================================================================
// Geometry & tone
// ============================================================================

/// Mirror an image: `horizontal`, `vertical`, or anything else for both axes.
#[wasm_bindgen]
pub fn flip_wasm(data: &[u8], width: usize, height: usize, direction: &str) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    Ok(into_bytes(flip_u8(input.view(), FlipDirection::from_token(direction))))
}

/// Add a signed increment to every channel.
#[wasm_bindgen]
pub fn brighten_wasm(data: &[u8], width: usize, height: usize, increment: i32) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    Ok(into_bytes(brighten_u8(input.view(), increment)))
}

/// Greyscale projection named like the command, e.g. `value-component`.
#[wasm_bindgen]
pub fn greyscale_wasm(data: &[u8], width: usize, height: usize, component: &str) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    let component = component.parse::<GreyscaleComponent>().map_err(js_error)?;
    Ok(into_bytes(greyscale_u8(input.view(), component)))
}

#[wasm_bindgen]
pub fn sepia_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    Ok(into_bytes(sepia_u8(input.view())))
}

// ============================================================================
// Convolution
// ============================================================================

/// `kernel` is `blur` or `sharpen`.
#[wasm_bindgen]
pub fn filter_wasm(data: &[u8], width: usize, height: usize, kernel: &str) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    let kernel = kernel.parse::<Kernel>().map_err(js_error)?;
    Ok(into_bytes(convolve_u8(input.view(), kernel)))
}

// ============================================================================
// Channels
// ============================================================================

/// Merge three same-sized images channel-wise.
#[wasm_bindgen]
pub fn rgb_combine_wasm(
    red: &[u8],
    green: &[u8],
    blue: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    let red = rgb_array(red, width, height)?;
    let green = rgb_array(green, width, height)?;
    let blue = rgb_array(blue, width, height)?;
    let combined = rgb_combine_u8(red.view(), green.view(), blue.view()).map_err(js_error)?;
    Ok(into_bytes(combined))
}

// ============================================================================
// Compression, histogram, levels, color correction, preview
// ============================================================================

#[wasm_bindgen]
pub fn compress_wasm(data: &[u8], width: usize, height: usize, percentage: i32) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    let percentage = self::percentage(percentage).map_err(js_error)?;
    Ok(into_bytes(compress_u8(input.view(), percentage)))
}

/// Returns a 256x256 RGB canvas regardless of the input size.
#[wasm_bindgen]
pub fn histogram_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    Ok(into_bytes(histogram_u8(input.view())))
}

#[wasm_bindgen]
pub fn color_correct_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    Ok(into_bytes(color_correct_u8(input.view())))
}

#[wasm_bindgen]
pub fn levels_adjust_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    black: i32,
    mid: i32,
    white: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = rgb_array(data, width, height)?;
    let points = LevelPoints::new(black, mid, white).map_err(js_error)?;
    Ok(into_bytes(levels_u8(input.view(), &LevelCurve::from(points))))
}

#[wasm_bindgen]
pub fn split_preview_wasm(
    original: &[u8],
    modified: &[u8],
    width: usize,
    height: usize,
    percentage: i32,
) -> Result<Vec<u8>, JsValue> {
    let original = rgb_array(original, width, height)?;
    let modified = rgb_array(modified, width, height)?;
    let percentage = self::percentage(percentage).map_err(js_error)?;
    let composite = composite_u8(original.view(), modified.view(), percentage).map_err(js_error)?;
    Ok(into_bytes(composite))
}

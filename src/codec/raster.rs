//! PNG, JPEG and BMP through the `image` crate.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::buffer::PixelBuffer;
use crate::error::{EditError, SessionError};

/// Decode any supported raster file to RGB8. Alpha is dropped.
pub fn decode(path: &Path, format: ImageFormat) -> Result<PixelBuffer, SessionError> {
    let mut reader = image::ImageReader::open(path)?;
    reader.set_format(format);
    let rgb = reader.decode()?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgb.into_raw())?)
}

/// Encode `buffer` as RGB8 in `format`.
pub fn encode(path: &Path, buffer: &PixelBuffer, format: ImageFormat) -> Result<(), SessionError> {
    let (width, height) = buffer.dimensions();
    let image = RgbImage::from_raw(width, height, buffer.to_raw())
        .ok_or_else(|| EditError::InvalidShape(vec![height as usize, width as usize, 3]))?;
    image.save_with_format(path, format)?;
    Ok(())
}

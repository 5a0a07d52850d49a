//! Reading and writing images on disk.
//!
//! The format is picked from the file extension: `ppm` uses the plain-text
//! P3 codec in [`ppm`], `png`, `jpg`/`jpeg` and `bmp` go through the `image`
//! crate in [`raster`].

pub mod ppm;
pub mod raster;

use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::SessionError;

/// File format selected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ppm,
    Raster(image::ImageFormat),
}

impl Format {
    /// Case-insensitive lookup of the path's extension.
    pub fn from_path(path: &Path) -> Result<Self, SessionError> {
        let unsupported = || SessionError::UnsupportedFormat(path.display().to_string());
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(unsupported)?
            .to_ascii_lowercase();

        match extension.as_str() {
            "ppm" => Ok(Format::Ppm),
            "png" => Ok(Format::Raster(image::ImageFormat::Png)),
            "jpg" | "jpeg" => Ok(Format::Raster(image::ImageFormat::Jpeg)),
            "bmp" => Ok(Format::Raster(image::ImageFormat::Bmp)),
            _ => Err(unsupported()),
        }
    }
}

/// Decode the file at `path`.
pub fn load_image(path: &Path) -> Result<PixelBuffer, SessionError> {
    let buffer = match Format::from_path(path)? {
        Format::Ppm => ppm::decode(&std::fs::read_to_string(path)?)?,
        Format::Raster(format) => raster::decode(path, format)?,
    };
    tracing::info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "Image loaded"
    );
    Ok(buffer)
}

/// Encode `buffer` to `path`, overwriting any existing file.
pub fn save_image(path: &Path, buffer: &PixelBuffer) -> Result<(), SessionError> {
    match Format::from_path(path)? {
        Format::Ppm => std::fs::write(path, ppm::encode(buffer))?,
        Format::Raster(format) => raster::encode(path, buffer, format)?,
    }
    tracing::info!(path = %path.display(), "Image saved");
    Ok(())
}

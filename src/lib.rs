//! rasterlab
//!
//! In-memory raster image editing: a named image store, a set of pixel
//! algorithms (tone, convolution, channel split/combine, Haar wavelet
//! compression, histogram rendering, levels, color correction, split
//! previews) and a small text command language to drive them.
//!
//! ## Image Format
//! Images are RGB8 arrays of shape `(height, width, 3)`, channel-last, row 0
//! at the top. Every operation allocates a new array; sources are never
//! modified in place.
//!
//! ## Layers
//! - [`filters`]: pure functions over `ArrayView3<u8>`
//! - [`operations`]: the same algorithms over a named [`ImageStore`]
//! - [`command`], [`session`], [`codec`], [`config`]: the scriptable shell
//!
//! Python bindings (feature `python`) and WebAssembly exports (feature
//! `wasm`) expose the filters directly.

pub mod buffer;
pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod filters;
pub mod operations;
pub mod session;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::{Channel, PixelBuffer};
pub use command::Command;
pub use config::SessionConfig;
pub use error::{EditError, SessionError};
pub use session::{ScriptReport, Session};
pub use store::ImageStore;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::ArrayView3;
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::EditError;
    use crate::filters::{
        brighten_u8, color_correct_u8, composite_u8, compress_u8, convolve_u8, flip_u8,
        greyscale_u8, histogram_u8, levels_u8, rgb_combine_u8, rgb_split_u8, sepia_u8,
        FlipDirection, GreyscaleComponent, Kernel, LevelCurve, LevelPoints,
    };
    use crate::operations::percentage;

    fn value_error(error: EditError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }

    /// Borrow an `(H, W, 3)` array, rejecting any other channel count.
    fn rgb_view<'a>(image: &'a PyReadonlyArray3<'_, u8>) -> PyResult<ArrayView3<'a, u8>> {
        let view = image.as_array();
        if view.dim().2 != 3 {
            return Err(value_error(EditError::InvalidShape(view.shape().to_vec())));
        }
        Ok(view)
    }

    // ========================================================================
    // Geometry & tone
    // ========================================================================

    /// Mirror an RGB image. `direction` is `horizontal`, `vertical`, or
    /// anything else for both axes.
    #[pyfunction]
    pub fn flip<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        direction: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(flip_u8(input, FlipDirection::from_token(direction)).into_pyarray(py))
    }

    /// Add a signed increment to every channel (negative darkens).
    #[pyfunction]
    pub fn brighten<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        increment: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(brighten_u8(input, increment).into_pyarray(py))
    }

    /// Greyscale projection, e.g. `component="luma-component"`.
    #[pyfunction]
    pub fn greyscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        component: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        let component = component.parse::<GreyscaleComponent>().map_err(value_error)?;
        Ok(greyscale_u8(input, component).into_pyarray(py))
    }

    #[pyfunction]
    pub fn sepia<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(sepia_u8(input).into_pyarray(py))
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    /// 3x3 blur. Pixels on the 1-pixel border are zero.
    #[pyfunction]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(convolve_u8(input, Kernel::Blur).into_pyarray(py))
    }

    /// 5x5 sharpen. Pixels on the 2-pixel border are zero.
    #[pyfunction]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(convolve_u8(input, Kernel::Sharpen).into_pyarray(py))
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Returns `(red, green, blue)` masked projections.
    #[pyfunction]
    #[allow(clippy::type_complexity)]
    pub fn rgb_split<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<(
        Bound<'py, PyArray3<u8>>,
        Bound<'py, PyArray3<u8>>,
        Bound<'py, PyArray3<u8>>,
    )> {
        let input = rgb_view(&image)?;
        let [red, green, blue] = rgb_split_u8(input);
        Ok((red.into_pyarray(py), green.into_pyarray(py), blue.into_pyarray(py)))
    }

    #[pyfunction]
    pub fn rgb_combine<'py>(
        py: Python<'py>,
        red: PyReadonlyArray3<'py, u8>,
        green: PyReadonlyArray3<'py, u8>,
        blue: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let combined = rgb_combine_u8(rgb_view(&red)?, rgb_view(&green)?, rgb_view(&blue)?)
            .map_err(value_error)?;
        Ok(combined.into_pyarray(py))
    }

    // ========================================================================
    // Compression, histogram, levels, color correction
    // ========================================================================

    /// Haar wavelet compression, `percentage` in 0-100.
    #[pyfunction]
    pub fn compress<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        percentage: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        let percentage = self::percentage(percentage).map_err(value_error)?;
        Ok(compress_u8(input, percentage).into_pyarray(py))
    }

    /// 256x256 histogram canvas.
    #[pyfunction]
    pub fn histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(histogram_u8(input).into_pyarray(py))
    }

    #[pyfunction]
    pub fn color_correct<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        Ok(color_correct_u8(input).into_pyarray(py))
    }

    /// Quadratic levels through `black < mid < white`.
    #[pyfunction]
    #[pyo3(signature = (image, black=0, mid=128, white=255))]
    pub fn levels_adjust<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        black: i32,
        mid: i32,
        white: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = rgb_view(&image)?;
        let points = LevelPoints::new(black, mid, white).map_err(value_error)?;
        Ok(levels_u8(input, &LevelCurve::from(points)).into_pyarray(py))
    }

    /// Modified pixels left of `percentage` of the width, original right of it.
    #[pyfunction]
    pub fn split_preview<'py>(
        py: Python<'py>,
        original: PyReadonlyArray3<'py, u8>,
        modified: PyReadonlyArray3<'py, u8>,
        percentage: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let percentage = self::percentage(percentage).map_err(value_error)?;
        let composite = composite_u8(rgb_view(&original)?, rgb_view(&modified)?, percentage)
            .map_err(value_error)?;
        Ok(composite.into_pyarray(py))
    }

    /// rasterlab extension module
    #[pymodule]
    pub fn rasterlab(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Geometry & tone
        m.add_function(wrap_pyfunction!(flip, m)?)?;
        m.add_function(wrap_pyfunction!(brighten, m)?)?;
        m.add_function(wrap_pyfunction!(greyscale, m)?)?;
        m.add_function(wrap_pyfunction!(sepia, m)?)?;

        // Convolution
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;

        // Channels
        m.add_function(wrap_pyfunction!(rgb_split, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_combine, m)?)?;

        // Analysis & tonal
        m.add_function(wrap_pyfunction!(compress, m)?)?;
        m.add_function(wrap_pyfunction!(histogram, m)?)?;
        m.add_function(wrap_pyfunction!(color_correct, m)?)?;
        m.add_function(wrap_pyfunction!(levels_adjust, m)?)?;
        m.add_function(wrap_pyfunction!(split_preview, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::rasterlab;

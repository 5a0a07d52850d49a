//! Pixel algorithms over `(height, width, 3)` u8 arrays.
//!
//! Every filter is a free function taking an `ArrayView3<u8>` and returning a
//! freshly allocated `Array3<u8>`; none of them touch their input. Intermediate
//! math happens in `i32`/`f64` and is clamped back to 0-255.
//!
//! ## Filter Categories
//!
//! - **Geometry**: flip
//! - **Tone**: brighten/darken, sepia, greyscale projections, levels, color correction
//! - **Spatial**: blur, sharpen (fixed kernels, zero border)
//! - **Channels**: RGB split and combine
//! - **Compression**: Haar wavelet thresholding
//! - **Diagnostics**: histogram canvas, split preview

pub mod channels;
pub mod color_adjust;
pub mod color_correct;
pub mod convolution;
pub mod geometry;
pub mod grayscale;
pub mod histogram;
pub mod levels;
pub mod preview;
pub mod wavelet;

pub use channels::{rgb_combine_u8, rgb_split_u8};
pub use color_adjust::{brighten_u8, sepia_u8};
pub use color_correct::color_correct_u8;
pub use convolution::{convolve_u8, Kernel};
pub use geometry::{flip_u8, FlipDirection};
pub use grayscale::{greyscale_u8, GreyscaleComponent};
pub use histogram::histogram_u8;
pub use levels::{levels_u8, LevelCurve, LevelPoints};
pub use preview::composite_u8;
pub use wavelet::compress_u8;

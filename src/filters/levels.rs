//! Levels adjustment through a quadratic tone curve.
//!
//! The curve `y = a*x^2 + b*x + c` passes through `(black, 0)`,
//! `(mid, 128)` and `(white, 255)`. Coefficients come from the closed-form
//! solution of that 3x3 system.

use ndarray::{Array3, ArrayView3};

use super::color_adjust::clamp_channel;
use crate::error::EditError;

/// Validated black/mid/white control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPoints {
    pub black: u8,
    pub mid: u8,
    pub white: u8,
}

impl LevelPoints {
    /// Each point must be in 0-255 and `black < mid < white`.
    pub fn new(black: i32, mid: i32, white: i32) -> Result<Self, EditError> {
        let in_range = |v: i32| (0..=255).contains(&v);
        if !(in_range(black) && in_range(mid) && in_range(white)) {
            return Err(EditError::InvalidParameter(format!(
                "levels points {} {} {} must be within 0-255",
                black, mid, white
            )));
        }
        if !(black < mid && mid < white) {
            return Err(EditError::InvalidParameter(format!(
                "levels points {} {} {} must be strictly ascending",
                black, mid, white
            )));
        }
        Ok(LevelPoints {
            black: black as u8,
            mid: mid as u8,
            white: white as u8,
        })
    }
}

/// Fitted quadratic tone curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LevelCurve {
    /// Fit the curve through the three control points.
    ///
    /// Points are not validated here. Coincident points make the system
    /// singular and every coefficient NaN, which [`LevelCurve::apply`] maps
    /// to 0.
    pub fn fit(black: u8, mid: u8, white: u8) -> Self {
        let (b, m, w) = (black as f64, mid as f64, white as f64);

        let det = b * b * (m - w) - b * (m * m - w * w) + w * m * m - m * w * w;
        let a_num = -b * (128.0 - 255.0) + 128.0 * w - 255.0 * m;
        let b_num = b * b * (128.0 - 255.0) + 255.0 * m * m - 128.0 * w * w;
        let c_num = b * b * (255.0 * m - 128.0 * w) - b * (255.0 * m * m - 128.0 * w * w);

        LevelCurve {
            a: a_num / det,
            b: b_num / det,
            c: c_num / det,
        }
    }

    /// Evaluate at `x`, truncate and clamp.
    #[inline]
    pub fn apply(&self, x: u8) -> u8 {
        let x = x as f64;
        clamp_channel((self.a * x * x + self.b * x + self.c) as i32)
    }

    /// Lookup table over all 256 input values.
    pub fn table(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = self.apply(i as u8);
        }
        lut
    }
}

impl From<LevelPoints> for LevelCurve {
    fn from(points: LevelPoints) -> Self {
        LevelCurve::fit(points.black, points.mid, points.white)
    }
}

/// Apply a levels curve to every channel.
///
/// # Arguments
/// * `input` - Image (height, width, 3)
/// * `curve` - Fitted tone curve
///
/// # Returns
/// Adjusted image with the same dimensions
pub fn levels_u8(input: ArrayView3<u8>, curve: &LevelCurve) -> Array3<u8> {
    let lut = curve.table();
    input.mapv(|v| lut[v as usize])
}

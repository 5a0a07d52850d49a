//! Greyscale projections.
//!
//! Six variants: the single-channel masks (`red`, `green`, `blue`) keep one
//! source channel and zero the other two; `value`, `intensity` and `luma`
//! write the same computed scalar into all three channels.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use crate::error::EditError;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreyscaleComponent {
    Red,
    Green,
    Blue,
    /// `max(R, G, B)`
    Value,
    /// `(R + G + B) / 3`, truncated
    Intensity,
    /// `0.299R + 0.587G + 0.114B`, truncated
    Luma,
}

impl GreyscaleComponent {
    pub const ALL: [GreyscaleComponent; 6] = [
        GreyscaleComponent::Red,
        GreyscaleComponent::Green,
        GreyscaleComponent::Blue,
        GreyscaleComponent::Value,
        GreyscaleComponent::Intensity,
        GreyscaleComponent::Luma,
    ];

    /// Command token, e.g. `luma-component`.
    pub fn name(self) -> &'static str {
        match self {
            GreyscaleComponent::Red => "red-component",
            GreyscaleComponent::Green => "green-component",
            GreyscaleComponent::Blue => "blue-component",
            GreyscaleComponent::Value => "value-component",
            GreyscaleComponent::Intensity => "intensity-component",
            GreyscaleComponent::Luma => "luma-component",
        }
    }

    #[inline]
    fn project(self, r: u8, g: u8, b: u8) -> [u8; 3] {
        match self {
            GreyscaleComponent::Red => [r, 0, 0],
            GreyscaleComponent::Green => [0, g, 0],
            GreyscaleComponent::Blue => [0, 0, b],
            GreyscaleComponent::Value => {
                let v = r.max(g).max(b);
                [v, v, v]
            }
            GreyscaleComponent::Intensity => {
                let v = ((r as u32 + g as u32 + b as u32) / 3) as u8;
                [v, v, v]
            }
            GreyscaleComponent::Luma => {
                let v = (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8;
                [v, v, v]
            }
        }
    }
}

impl fmt::Display for GreyscaleComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GreyscaleComponent {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.to_ascii_lowercase();
        GreyscaleComponent::ALL
            .into_iter()
            .find(|component| component.name() == token)
            .ok_or_else(|| EditError::InvalidParameter(format!("unknown greyscale component {}", s)))
    }
}

/// Project an RGB image onto one greyscale component.
///
/// # Arguments
/// * `input` - Image (height, width, 3)
/// * `component` - Which projection to compute
///
/// # Returns
/// New image with the same dimensions
pub fn greyscale_u8(input: ArrayView3<u8>, component: GreyscaleComponent) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 3));

    for y in 0..height {
        for x in 0..width {
            let projected = component.project(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            output[[y, x, 0]] = projected[0];
            output[[y, x, 1]] = projected[1];
            output[[y, x, 2]] = projected[2];
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img
    }

    fn project(component: GreyscaleComponent) -> [u8; 3] {
        let result = greyscale_u8(pixel(200, 100, 50).view(), component);
        [result[[0, 0, 0]], result[[0, 0, 1]], result[[0, 0, 2]]]
    }

    #[test]
    fn test_channel_masks_keep_one_channel() {
        assert_eq!(project(GreyscaleComponent::Red), [200, 0, 0]);
        assert_eq!(project(GreyscaleComponent::Green), [0, 100, 0]);
        assert_eq!(project(GreyscaleComponent::Blue), [0, 0, 50]);
    }

    #[test]
    fn test_value_is_max_channel() {
        assert_eq!(project(GreyscaleComponent::Value), [200, 200, 200]);
    }

    #[test]
    fn test_intensity_truncates() {
        // (200 + 100 + 50) / 3 = 116.67 -> 116
        assert_eq!(project(GreyscaleComponent::Intensity), [116, 116, 116]);
    }

    #[test]
    fn test_luma_truncates() {
        // 0.299*200 + 0.587*100 + 0.114*50 = 59.8 + 58.7 + 5.7 = 124.2 -> 124
        assert_eq!(project(GreyscaleComponent::Luma), [124, 124, 124]);
    }

    #[test]
    fn test_luma_of_white_stays_in_range() {
        let result = greyscale_u8(pixel(255, 255, 255).view(), GreyscaleComponent::Luma);
        assert!(result[[0, 0, 0]] >= 254);
    }

    #[test]
    fn test_parse_component_names() {
        for component in GreyscaleComponent::ALL {
            assert_eq!(component.name().parse::<GreyscaleComponent>(), Ok(component));
        }
        assert!("alpha-component".parse::<GreyscaleComponent>().is_err());
    }
}

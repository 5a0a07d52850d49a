//! Plain-text PPM (`P3`) codec.
//!
//! Layout: magic `P3`, width, height, maximum value, then `width * height`
//! RGB triples in row-major order. `#` starts a comment that runs to the end
//! of the line. Samples are rescaled to 0-255 when the maximum value differs.

use std::fmt::Write as _;

use crate::buffer::PixelBuffer;
use crate::error::SessionError;

/// Upper bound on the up-front reservation; larger images grow as samples arrive.
const MAX_RESERVED_SAMPLES: usize = 1 << 24;

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace)
}

fn next_number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<u32, SessionError> {
    let token = tokens
        .next()
        .ok_or_else(|| SessionError::Ppm(format!("unexpected end of data, expected {}", what)))?;
    token
        .parse::<u32>()
        .map_err(|_| SessionError::Ppm(format!("invalid {} '{}'", what, token)))
}

/// Decode P3 text into a pixel buffer.
pub fn decode(text: &str) -> Result<PixelBuffer, SessionError> {
    let mut tokens = tokens(text);

    match tokens.next() {
        Some("P3") => {}
        other => {
            return Err(SessionError::Ppm(format!(
                "plain PPM must begin with P3, found {:?}",
                other.unwrap_or("")
            )))
        }
    }

    let width = next_number(&mut tokens, "width")?;
    let height = next_number(&mut tokens, "height")?;
    let max_value = next_number(&mut tokens, "maximum value")?;
    if max_value == 0 {
        return Err(SessionError::Ppm("maximum value must be positive".to_string()));
    }

    let samples = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| SessionError::Ppm("image too large".to_string()))?;
    let mut data = Vec::with_capacity(samples.min(MAX_RESERVED_SAMPLES));
    for _ in 0..samples {
        let v = next_number(&mut tokens, "sample")?;
        let scaled = if max_value == 255 {
            v
        } else {
            (v as u64 * 255 / max_value as u64) as u32
        };
        data.push(scaled.min(255) as u8);
    }

    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Encode a pixel buffer as P3 text with maximum value 255.
pub fn encode(buffer: &PixelBuffer) -> String {
    let (width, height) = buffer.dimensions();
    let mut out = String::with_capacity(16 + width as usize * height as usize * 12);
    // Writing into a String cannot fail.
    let _ = write!(out, "P3\n{} {}\n255\n", width, height);

    for row in buffer.view().outer_iter() {
        for px in row.outer_iter() {
            let _ = write!(out, "{} {} {} ", px[0], px[1], px[2]);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_with_comments() {
        let text = "P3\n# created by hand\n2 1\n255\n255 0 0 # red\n0 0 255\n";
        let buffer = decode(text).unwrap();
        assert_eq!(buffer.dimensions(), (2, 1));
        assert_eq!(buffer.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(buffer.pixel(0, 1), Some([0, 0, 255]));
    }

    #[test]
    fn test_decode_rescales_max_value() {
        let buffer = decode("P3 1 1 15 15 0 7").unwrap();
        assert_eq!(buffer.pixel(0, 0), Some([255, 0, 119]));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(decode("P6 1 1 255 0 0 0"), Err(SessionError::Ppm(_))));
        assert!(matches!(decode("P3 2 2 255 1 2 3"), Err(SessionError::Ppm(_))));
        assert!(matches!(decode("P3 1 x 255"), Err(SessionError::Ppm(_))));
        assert!(matches!(decode("P3 1 1 0 0 0 0"), Err(SessionError::Ppm(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_header() {
        match decode("P3 4294967295 4294967295 255 1 2 3") {
            Err(SessionError::Ppm(message)) => assert_eq!(message, "image too large"),
            other => panic!("expected size error, got {:?}", other),
        }
        // Fits in usize but the samples run out long before the header's claim.
        assert!(matches!(
            decode("P3 100000 100000 255 1 2 3"),
            Err(SessionError::Ppm(_))
        ));
    }

    #[test]
    fn test_encode_layout() {
        let buffer = PixelBuffer::from_fn(2, 2, |y, x| [(y * 2 + x) as u8, 10, 200]);
        assert_eq!(
            encode(&buffer),
            "P3\n2 2\n255\n0 10 200 1 10 200 \n2 10 200 3 10 200 \n"
        );
    }

    #[test]
    fn test_encode_then_decode_matches() {
        let buffer = PixelBuffer::from_fn(3, 2, |y, x| [(x * 80) as u8, (y * 120) as u8, 7]);
        assert_eq!(decode(&encode(&buffer)).unwrap(), buffer);
    }
}

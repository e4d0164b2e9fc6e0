//! Binary netpbm I/O: P5 (graymap) and P6 (pixmap) in, P5 out.
//!
//! Only 8-bit rasters are supported (`maxval <= 255`). P6 input is reduced to
//! luminance `0.299 R + 0.587 G + 0.114 B`.


use std::path::Path;

use crate::error::{Error, Result};
use crate::image::Image;

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Graymap,
    Pixmap,
}

impl Format {
    fn channels(self) -> usize {
        match self {
            Format::Graymap => 1,
            Format::Pixmap => 3,
        }
    }
}

/// Loads a P5/P6 file as a grayscale image.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_grayscale(&bytes)
}

/// Saves `image` as an 8-bit P5 graymap.
pub fn save_pgm<P: AsRef<Path>>(path: P, image: &Image) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_pgm(image)?;
    std::fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes an in-memory P5/P6 file. Bytes after the raster are ignored.
pub fn decode_grayscale(bytes: &[u8]) -> Result<Image> {
    let mut header = HeaderReader::new(bytes);

    let format = match header.read_magic()? {
        b"P5" => Format::Graymap,
        b"P6" => Format::Pixmap,
        other => {
            return Err(Error::InvalidInput(format!(
                "unsupported format '{}' (expected P5 or P6)",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let width = header.read_uint("width")?;
    let height = header.read_uint("height")?;
    let maxval = header.read_uint("maxval")?;

    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "invalid image dimensions {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > 255 {
        return Err(Error::InvalidInput(format!(
            "maxval {} not supported (only 8-bit images, 1..=255)",
            maxval
        )));
    }

    header.skip_single_whitespace()?;

    let raster_len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(format.channels()))
        .ok_or_else(|| Error::InvalidInput(format!("{}x{} is too large", width, height)))?;
    let raster = header.remaining();
    if raster.len() < raster_len {
        return Err(Error::InvalidInput(format!(
            "truncated raster: {} of {} bytes",
            raster.len(),
            raster_len
        )));
    }
    let raster = &raster[..raster_len];

    let pixels = match format {
        Format::Graymap => raster.iter().map(|&v| v as f64).collect(),
        Format::Pixmap => raster
            .chunks_exact(3)
            .map(|rgb| {
                LUMA_R * rgb[0] as f64 + LUMA_G * rgb[1] as f64 + LUMA_B * rgb[2] as f64
            })
            .collect(),
    };

    Image::new(width, height, pixels)
}

/// Encodes `image` as P5 with `maxval = 255`.
///
/// Samples are clamped to `[0, 255]` and rounded half away from zero. NaN becomes 0.
pub fn encode_pgm(image: &Image) -> Result<Vec<u8>> {
    image.validate()?;

    let header = format!("P5\n{} {}\n255\n", image.width(), image.height());
    let mut bytes = Vec::with_capacity(header.len() + image.pixels().len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend(image.pixels().iter().map(|&v| to_byte(v)));

    Ok(bytes)
}

#[inline]
fn to_byte(value: f64) -> u8 {
    // `as` saturates and maps NaN to 0.
    value.clamp(0.0, 255.0).round() as u8
}

/// Cursor over the ASCII header.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Skips whitespace and `#` comments running to end of line.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_magic(&mut self) -> Result<&'a [u8]> {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        let start = self.pos;
        while self.peek().is_some_and(|b| !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(Error::InvalidInput("missing magic number".to_string()));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn read_uint(&mut self, what: &str) -> Result<usize> {
        self.skip_whitespace_and_comments();

        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(Error::InvalidInput(format!(
                "failed to read {} from header",
                what
            )));
        }

        // Digits only, so the slice is valid UTF-8; parsing fails only on overflow.
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| Error::InvalidInput(format!("{} is out of range", what)))
    }

    fn skip_single_whitespace(&mut self) -> Result<()> {
        match self.peek() {
            Some(byte) if byte.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(Error::InvalidInput(
                "expected whitespace before raster data".to_string(),
            )),
            None => Err(Error::InvalidInput("missing raster data".to_string())),
        }
    }
}

use crate::error::{Error, Result};

/// Single-channel image with `f64` samples stored row-major.
///
/// Samples conceptually lie in `[0, 255]` after loading, but nothing here
/// clamps them: high-pass kernels legitimately produce negative values.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<f64>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<f64>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                what: "image",
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Self::new(width, height, vec![value; len])
    }

    pub fn zeros(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, 0.0)
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Re-checks the size invariants.
    pub fn validate(&self) -> Result<()> {
        let expected = pixel_count(self.width, self.height)?;
        if self.pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                what: "image",
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<f64> {
        self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Largest absolute sample value, `0.0` for an all-zero image.
    pub fn max_abs(&self) -> f64 {
        self.pixels.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Largest absolute per-pixel difference to `other`.
    ///
    /// Panics if the two images differ in size.
    pub fn max_abs_diff(&self, other: &Image) -> f64 {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "image dimensions differ"
        );
        common::float_ext::max_abs_diff(&self.pixels, &other.pixels)
    }
}

/// `width * height`, rejecting zero and overflowing dimensions.
pub(crate) fn pixel_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "{}x{} (both must be positive)",
            width, height
        )));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| Error::InvalidDimensions(format!("{}x{} overflows", width, height)))
}

//! Iterative radix-2 Cooley–Tukey FFT on power-of-two lengths.
//!
//! The 1D transform works in place:
//! 1. Bit-reversal permutation of the input
//! 2. Butterfly layers for `len = 2, 4, ..., n`
//! 3. `1/n` scaling when inverting
//!
//! The 2D transform applies the 1D transform to every row, then every column.
//! Each 1D inverse already divides by its own length, so the row and column
//! passes together scale by `1/(width * height)`.


use std::f64::consts::PI;

use rayon::prelude::*;
pub use rustfft::num_complex::Complex64;

use crate::error::{Error, Result};

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// DFT with twiddles `exp(-2πi/len)`.
    Forward,
    /// Inverse DFT with twiddles `exp(+2πi/len)`, scaled by `1/n`.
    Inverse,
}

/// Smallest power of two not less than `n`. Fails for `n == 0` and on overflow.
pub fn next_pow2(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::InvalidDimensions(
            "next_pow2 requires n >= 1".to_string(),
        ));
    }
    n.checked_next_power_of_two().ok_or_else(|| {
        Error::InvalidDimensions(format!("no power of two >= {} fits in usize", n))
    })
}

/// In-place 1D FFT. Empty input is a no-op.
pub fn fft_1d(data: &mut [Complex64], direction: Direction) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    if !data.len().is_power_of_two() {
        return Err(Error::InvalidSize(data.len()));
    }

    transform(data, direction);
    Ok(())
}

/// In-place 2D FFT over a row-major `width x height` grid.
pub fn fft_2d(
    data: &mut [Complex64],
    width: usize,
    height: usize,
    direction: Direction,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "FFT grid {}x{} (both must be positive)",
            width, height
        )));
    }
    if !width.is_power_of_two() {
        return Err(Error::InvalidSize(width));
    }
    if !height.is_power_of_two() {
        return Err(Error::InvalidSize(height));
    }
    let expected = width.checked_mul(height).ok_or_else(|| {
        Error::InvalidDimensions(format!("FFT grid {}x{} overflows", width, height))
    })?;
    if data.len() != expected {
        return Err(Error::BufferSizeMismatch {
            what: "FFT grid",
            expected,
            actual: data.len(),
        });
    }

    // Rows are contiguous and independent.
    data.par_chunks_mut(width)
        .for_each(|row| transform(row, direction));

    // Columns are strided; gather each into a scratch buffer.
    let mut column = vec![Complex64::new(0.0, 0.0); height];
    for x in 0..width {
        for (y, c) in column.iter_mut().enumerate() {
            *c = data[y * width + x];
        }
        transform(&mut column, direction);
        for (y, c) in column.iter().enumerate() {
            data[y * width + x] = *c;
        }
    }

    Ok(())
}

/// Unchecked core of [`fft_1d`]; `data.len()` must be a power of two.
fn transform(data: &mut [Complex64], direction: Direction) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());

    bit_reverse_permute(data);

    let sign = match direction {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle = sign * 2.0 * PI / len as f64;
        let w_len = Complex64::new(angle.cos(), angle.sin());

        for block in data.chunks_exact_mut(len) {
            let (lo, hi) = block.split_at_mut(half);
            let mut w = Complex64::new(1.0, 0.0);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let u = *a;
                let v = *b * w;
                *a = u + v;
                *b = u - v;
                w *= w_len;
            }
        }

        len <<= 1;
    }

    if direction == Direction::Inverse {
        let scale = 1.0 / n as f64;
        for c in data.iter_mut() {
            *c *= scale;
        }
    }
}

/// Swaps `data[i]` with `data[bitreverse(i)]` for every `i`.
fn bit_reverse_permute(data: &mut [Complex64]) {
    let n = data.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}

//! Convolution through the frequency domain.
//!
//! Spectral multiplication computes a cyclic convolution on a `Wp x Hp` torus.
//! Two choices turn it into the zero-padded, centered result of
//! [`convolve_spatial`](crate::spatial::convolve_spatial):
//! 1. `Wp >= W + k - 1` and `Hp >= H + k - 1`, so image and kernel supports never wrap
//! 2. The kernel is mirrored through its center and the center lands on `(0, 0)`,
//!    so the top-left `W x H` block of the inverse transform lines up with the
//!    spatial sum `Σ img(x + kx - r, y + ky - r) * kern(kx, ky)`
//!
//! Mirroring matters only for asymmetric kernels; blur, sharpen and edge are
//! point-symmetric and place identically either way.


use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::fft::{fft_2d, next_pow2, Complex64, Direction};
use crate::image::Image;
use crate::kernel::Kernel;

/// Dimensions of the padded power-of-two FFT grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedSize {
    pub width: usize,
    pub height: usize,
}

/// Extra information from a frequency-domain run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyDiagnostics {
    pub padded: PaddedSize,
    /// Largest `|imag|` inside the cropped window. Should be round-off sized.
    pub max_imaginary: f64,
}

/// Smallest power-of-two grid that holds the linear convolution of a
/// `width x height` image with a `kernel_size` kernel.
pub fn padded_size(width: usize, height: usize, kernel_size: usize) -> Result<PaddedSize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "{}x{} (both must be positive)",
            width, height
        )));
    }
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(Error::InvalidKernelSize(kernel_size));
    }

    let grow = |n: usize| {
        n.checked_add(kernel_size - 1).ok_or_else(|| {
            Error::InvalidDimensions(format!("{} + {} - 1 overflows", n, kernel_size))
        })
    };

    Ok(PaddedSize {
        width: next_pow2(grow(width)?)?,
        height: next_pow2(grow(height)?)?,
    })
}

/// Same result as the spatial convolver, computed with 2D FFTs.
pub fn convolve_frequency(image: &Image, kernel: &Kernel) -> Result<Image> {
    convolve_frequency_with_diagnostics(image, kernel).map(|(output, _)| output)
}

/// [`convolve_frequency`] that also reports the grid size and the residual
/// imaginary magnitude that the real-part crop discards.
pub fn convolve_frequency_with_diagnostics(
    image: &Image,
    kernel: &Kernel,
) -> Result<(Image, FrequencyDiagnostics)> {
    image.validate()?;
    kernel.validate()?;

    let padded = padded_size(image.width(), image.height(), kernel.size())?;
    convolve_on_grid(image, kernel, padded)
}

/// Runs the pipeline on an explicit grid size. `padded` must be powers of two;
/// sizes below [`padded_size`] produce wrap-around at the edges.
fn convolve_on_grid(
    image: &Image,
    kernel: &Kernel,
    padded: PaddedSize,
) -> Result<(Image, FrequencyDiagnostics)> {
    let mut image_grid = ComplexGrid::from_image(image, padded);
    let mut kernel_grid = ComplexGrid::from_centered_kernel(kernel, padded);

    let (image_fft, kernel_fft) = rayon::join(
        || image_grid.transform(Direction::Forward),
        || kernel_grid.transform(Direction::Forward),
    );
    image_fft?;
    kernel_fft?;

    image_grid.multiply_assign(&kernel_grid);
    drop(kernel_grid);

    image_grid.transform(Direction::Inverse)?;

    let (pixels, max_imaginary) = image_grid.crop_real(image.width(), image.height());
    let output = Image::new(image.width(), image.height(), pixels)?;

    Ok((
        output,
        FrequencyDiagnostics {
            padded,
            max_imaginary,
        },
    ))
}

/// Row-major complex buffer private to one frequency-domain call.
#[derive(Debug, Clone)]
struct ComplexGrid {
    width: usize,
    height: usize,
    data: Vec<Complex64>,
}

impl ComplexGrid {
    fn zeros(size: PaddedSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![Complex64::new(0.0, 0.0); size.width * size.height],
        }
    }

    /// Copies the image into the top-left corner; everything else stays zero.
    fn from_image(image: &Image, size: PaddedSize) -> Self {
        debug_assert!(size.width >= image.width() && size.height >= image.height());

        let mut grid = Self::zeros(size);
        let width = image.width();
        for (y, src_row) in image.pixels().chunks_exact(width).enumerate() {
            let dst_row = &mut grid.data[y * size.width..y * size.width + width];
            for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                *dst = Complex64::new(src, 0.0);
            }
        }
        grid
    }

    /// Writes `kern(kx, ky)` at `((r - kx) mod Wp, (r - ky) mod Hp)`: the kernel
    /// mirrored through its center, center at the origin, negative offsets
    /// wrapped to the far edges.
    fn from_centered_kernel(kernel: &Kernel, size: PaddedSize) -> Self {
        let mut grid = Self::zeros(size);
        let radius = kernel.radius() as isize;
        let wp = size.width as isize;
        let hp = size.height as isize;

        for ky in 0..kernel.size() {
            let ty = (radius - ky as isize).rem_euclid(hp) as usize;
            for kx in 0..kernel.size() {
                let tx = (radius - kx as isize).rem_euclid(wp) as usize;
                grid.data[ty * size.width + tx] += Complex64::new(kernel.get(kx, ky), 0.0);
            }
        }
        grid
    }

    fn transform(&mut self, direction: Direction) -> Result<()> {
        fft_2d(&mut self.data, self.width, self.height, direction)
    }

    fn multiply_assign(&mut self, other: &ComplexGrid) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data
            .par_iter_mut()
            .zip(other.data.par_iter())
            .for_each(|(a, b)| *a *= *b);
    }

    /// Real parts of the top-left `width x height` block, plus the largest
    /// discarded imaginary magnitude.
    fn crop_real(&self, width: usize, height: usize) -> (Vec<f64>, f64) {
        let mut pixels = Vec::with_capacity(width * height);
        let mut max_imaginary = 0.0f64;
        for row in self.data.chunks_exact(self.width).take(height) {
            for c in &row[..width] {
                pixels.push(c.re);
                max_imaginary = max_imaginary.max(c.im.abs());
            }
        }
        (pixels, max_imaginary)
    }
}

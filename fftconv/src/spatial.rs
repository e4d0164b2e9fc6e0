//! Direct zero-padded convolution. This is the reference the FFT path must match.

use common::parallel::ParRowsMutAuto;
use rayon::prelude::*;

use crate::error::Result;
use crate::image::Image;
use crate::kernel::Kernel;

/// Convolves `image` with the centered `kernel`, treating samples outside the
/// image as zero:
///
/// `out(x, y) = Σ_ky Σ_kx img(x + kx - r, y + ky - r) * kern(kx, ky)`, `r = k / 2`.
///
/// Output has the same size as the input. No normalization, no clamping.
pub fn convolve_spatial(image: &Image, kernel: &Kernel) -> Result<Image> {
    image.validate()?;
    kernel.validate()?;

    let width = image.width();
    let mut output = vec![0.0f64; width * image.height()];

    output
        .par_rows_mut_auto(width)
        .for_each(|(chunk_start_row, chunk)| {
            for (local_y, out_row) in chunk.chunks_exact_mut(width).enumerate() {
                convolve_row(image, kernel, chunk_start_row + local_y, out_row);
            }
        });

    Image::new(width, image.height(), output)
}

/// Fills output row `y`. Kernel taps falling outside the image are skipped
/// by clipping the tap ranges instead of testing every sample.
fn convolve_row(image: &Image, kernel: &Kernel, y: usize, out_row: &mut [f64]) {
    let width = image.width();
    let height = image.height();
    let size = kernel.size();
    let radius = kernel.radius();
    let pixels = image.pixels();
    let weights = kernel.weights();

    // iy = y + ky - radius must lie in [0, height).
    let ky_start = radius.saturating_sub(y);
    let ky_end = size.min(height + radius - y);

    for (x, out) in out_row.iter_mut().enumerate() {
        let kx_start = radius.saturating_sub(x);
        let kx_end = size.min(width + radius - x);

        let mut acc = 0.0;
        for ky in ky_start..ky_end {
            let iy = y + ky - radius;
            let img_row = &pixels[iy * width..(iy + 1) * width];
            let taps = &weights[ky * size + kx_start..ky * size + kx_end];
            let samples = &img_row[x + kx_start - radius..x + kx_end - radius];

            for (&pixel, &weight) in samples.iter().zip(taps) {
                acc += pixel * weight;
            }
        }
        *out = acc;
    }
}

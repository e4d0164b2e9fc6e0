//! 2D convolution of grayscale images, directly or through the FFT.
//!
//! Both methods zero-pad out-of-bounds samples, center the odd-sized kernel
//! on the output pixel, and return an image of the input size. The
//! frequency-domain path reproduces the spatial one up to round-off.
//!
//! ```no_run
//! use fftconv::{convolve, load_grayscale, make_kernel, save_pgm, Method};
//!
//! let image = load_grayscale("input.ppm")?;
//! let kernel = make_kernel("blur", 31)?;
//! let blurred = convolve(&image, &kernel, Method::Frequency)?;
//! save_pgm("output.pgm", &blurred)?;
//! # Ok::<(), fftconv::Error>(())
//! ```

pub mod driver;
pub mod error;
pub mod fft;
pub mod frequency;
pub mod image;
pub mod kernel;
pub mod pnm;
pub mod spatial;

pub use driver::{convolve, Method};
pub use error::{Error, Result};
pub use frequency::{
    convolve_frequency, convolve_frequency_with_diagnostics, padded_size, FrequencyDiagnostics,
    PaddedSize,
};
pub use image::Image;
pub use kernel::{make_kernel, Kernel, KernelKind};
pub use pnm::{decode_grayscale, encode_pgm, load_grayscale, save_pgm};
pub use spatial::convolve_spatial;

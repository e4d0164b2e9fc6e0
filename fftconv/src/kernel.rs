use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Square, odd-sized convolution kernel stored row-major.
///
/// The kernel is centered: index `(r, r)` with `r = size / 2` is the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self> {
        let expected = weight_count(size)?;
        if weights.len() != expected {
            return Err(Error::BufferSizeMismatch {
                what: "kernel",
                expected,
                actual: weights.len(),
            });
        }

        Ok(Self { size, weights })
    }

    /// 1x1 kernel with weight 1.
    pub fn identity() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// `size x size` box filter, every weight `1 / size²`.
    pub fn box_blur(size: usize) -> Result<Self> {
        let count = weight_count(size)?;
        let value = 1.0 / count as f64;
        Self::new(size, vec![value; count])
    }

    pub fn validate(&self) -> Result<()> {
        let expected = weight_count(self.size)?;
        if self.weights.len() != expected {
            return Err(Error::BufferSizeMismatch {
                what: "kernel",
                expected,
                actual: self.weights.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to the edge, `size / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn get(&self, kx: usize, ky: usize) -> f64 {
        debug_assert!(kx < self.size && ky < self.size);
        self.weights[ky * self.size + kx]
    }
}

fn check_kernel_size(size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(Error::InvalidKernelSize(size));
    }
    Ok(())
}

/// `size²` for a valid kernel size, or an error when that many weights
/// cannot be addressed.
fn weight_count(size: usize) -> Result<usize> {
    check_kernel_size(size)?;
    size.checked_mul(size)
        .filter(|&count| count <= isize::MAX as usize / std::mem::size_of::<f64>())
        .ok_or_else(|| Error::InvalidDimensions(format!("kernel {}x{} is too large", size, size)))
}

/// Named kernels understood by [`make_kernel`].
#[derive(
    Debug,
    Display,
    EnumIter,
    EnumString,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    /// Box blur of any odd size.
    #[default]
    Blur,
    Sharpen,
    /// 8-neighbour Laplacian.
    Edge,
    Emboss,
}

const SHARPEN_3X3: [f64; 9] = [
    0.0, -1.0, 0.0, //
    -1.0, 5.0, -1.0, //
    0.0, -1.0, 0.0,
];

const EDGE_3X3: [f64; 9] = [
    -1.0, -1.0, -1.0, //
    -1.0, 8.0, -1.0, //
    -1.0, -1.0, -1.0,
];

const EMBOSS_3X3: [f64; 9] = [
    -2.0, -1.0, 0.0, //
    -1.0, 1.0, 1.0, //
    0.0, 1.0, 2.0,
];

impl KernelKind {
    /// Whether this kind can be built at `size`. Only blur scales; the rest are fixed 3x3 tables.
    pub fn supports_size(self, size: usize) -> bool {
        match self {
            KernelKind::Blur => size % 2 == 1,
            KernelKind::Sharpen | KernelKind::Edge | KernelKind::Emboss => size == 3,
        }
    }

    pub fn build(self, size: usize) -> Result<Kernel> {
        check_kernel_size(size)?;
        if !self.supports_size(size) {
            return Err(Error::UnsupportedKernelSize {
                kind: self.to_string(),
                size,
            });
        }

        match self {
            KernelKind::Blur => Kernel::box_blur(size),
            KernelKind::Sharpen => Kernel::new(3, SHARPEN_3X3.to_vec()),
            KernelKind::Edge => Kernel::new(3, EDGE_3X3.to_vec()),
            KernelKind::Emboss => Kernel::new(3, EMBOSS_3X3.to_vec()),
        }
    }

    pub fn names() -> Vec<String> {
        KernelKind::iter().map(|kind| kind.to_string()).collect()
    }
}

/// Builds a kernel by name (`blur`, `sharpen`, `edge`, `emboss`) and size.
pub fn make_kernel(name: &str, size: usize) -> Result<Kernel> {
    let kind =
        KernelKind::from_str(name).map_err(|_| Error::UnknownKernel(name.to_string()))?;
    kind.build(size)
}

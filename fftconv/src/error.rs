use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the convolution core and its I/O helpers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("{what} buffer has {actual} elements, expected {expected}")]
    BufferSizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),

    #[error("FFT length must be a power of two, got {0}")]
    InvalidSize(usize),

    #[error("Invalid image data: {0}")]
    InvalidInput(String),

    #[error("Unknown kernel '{0}' (expected blur|sharpen|edge|emboss)")]
    UnknownKernel(String),

    #[error("Kernel '{kind}' only supports size 3, got {size}")]
    UnsupportedKernelSize { kind: String, size: usize },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

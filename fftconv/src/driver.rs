use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::Result;
use crate::frequency::convolve_frequency;
use crate::image::Image;
use crate::kernel::Kernel;
use crate::spatial::convolve_spatial;

/// Convolution method.
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
pub enum Method {
    /// Direct summation over kernel taps.
    #[default]
    #[strum(to_string = "spatial", serialize = "naive")]
    #[serde(alias = "naive")]
    Spatial,
    /// Pointwise product of 2D spectra.
    #[strum(to_string = "frequency", serialize = "fft")]
    #[serde(alias = "fft")]
    Frequency,
}

impl Method {
    /// The method that computes the same result the other way.
    pub fn other(self) -> Self {
        match self {
            Method::Spatial => Method::Frequency,
            Method::Frequency => Method::Spatial,
        }
    }
}

/// Convolves `image` with `kernel` using `method`.
pub fn convolve(image: &Image, kernel: &Kernel, method: Method) -> Result<Image> {
    match method {
        Method::Spatial => convolve_spatial(image, kernel),
        Method::Frequency => convolve_frequency(image, kernel),
    }
}

use std::fmt;
use std::path::PathBuf;

use fftconv::{KernelKind, Method, PaddedSize};

/// Spatial vs frequency agreement for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub max_abs_diff: f64,
    pub max_imaginary: f64,
    pub padded: PaddedSize,
}

/// Summary of a timed run, printed to stdout.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub method: Method,
    pub filter: KernelKind,
    pub kernel_size: usize,
    pub width: usize,
    pub height: usize,
    pub repeat: usize,
    pub average_ms: f64,
    pub output: PathBuf,
    pub comparison: Option<Comparison>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Filter: {}", self.filter)?;
        writeln!(f, "Kernel: {}x{}", self.kernel_size, self.kernel_size)?;
        writeln!(f, "Image:  {} x {}", self.width, self.height)?;
        writeln!(f, "Repeat: {}", self.repeat)?;
        writeln!(f, "Average time: {:.3} ms", self.average_ms)?;
        writeln!(f, "Wrote:  {}", self.output.display())?;

        if let Some(comparison) = &self.comparison {
            writeln!(
                f,
                "FFT grid: {} x {}",
                comparison.padded.width, comparison.padded.height
            )?;
            writeln!(
                f,
                "Max |spatial - frequency|: {:.3e}",
                comparison.max_abs_diff
            )?;
            writeln!(f, "Max imaginary residue: {:.3e}", comparison.max_imaginary)?;
        }

        Ok(())
    }
}

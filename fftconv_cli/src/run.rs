use std::time::{Duration, Instant};

use anyhow::Context;
use fftconv::{
    convolve, convolve_frequency_with_diagnostics, convolve_spatial, load_grayscale, save_pgm,
    Image, Kernel,
};
use log::{debug, info, warn};

use crate::config::RunSettings;
use crate::report::{Comparison, RunReport};

/// Loads the input, runs one warm-up and `repeat` timed convolutions, saves
/// the last result and reports the average time.
pub fn execute(settings: &RunSettings) -> anyhow::Result<RunReport> {
    let image = load_grayscale(&settings.input)
        .with_context(|| format!("Failed to load '{}'", settings.input.display()))?;
    info!(
        "Loaded {} ({}x{})",
        settings.input.display(),
        image.width(),
        image.height()
    );

    let kernel = settings
        .filter
        .build(settings.kernel_size)
        .context("Failed to build kernel")?;

    // Warm-up: catches errors before timing and touches all allocations once.
    let mut output = convolve(&image, &kernel, settings.method)?;

    let mut total = Duration::ZERO;
    for run in 0..settings.repeat {
        let start = Instant::now();
        output = convolve(&image, &kernel, settings.method)?;
        let elapsed = start.elapsed();
        debug!(
            "Run {}/{}: {:.3} ms",
            run + 1,
            settings.repeat,
            elapsed.as_secs_f64() * 1e3
        );
        total += elapsed;
    }
    let average_ms = total.as_secs_f64() * 1e3 / settings.repeat as f64;
    info!(
        "{} {}x{} {}: {:.3} ms average over {} runs",
        settings.filter,
        settings.kernel_size,
        settings.kernel_size,
        settings.method,
        average_ms,
        settings.repeat
    );

    save_pgm(&settings.output, &output)
        .with_context(|| format!("Failed to save '{}'", settings.output.display()))?;
    info!("Wrote {}", settings.output.display());

    let comparison = if settings.compare {
        Some(compare_methods(&image, &kernel)?)
    } else {
        None
    };

    Ok(RunReport {
        method: settings.method,
        filter: settings.filter,
        kernel_size: settings.kernel_size,
        width: image.width(),
        height: image.height(),
        repeat: settings.repeat,
        average_ms,
        output: settings.output.clone(),
        comparison,
    })
}

/// Runs both methods on the same input and measures their disagreement.
pub fn compare_methods(image: &Image, kernel: &Kernel) -> anyhow::Result<Comparison> {
    let spatial = convolve_spatial(image, kernel)?;
    let (frequency, diagnostics) = convolve_frequency_with_diagnostics(image, kernel)?;
    let max_abs_diff = spatial.max_abs_diff(&frequency);

    debug!(
        "FFT grid {}x{}, max imaginary residue {:.3e}",
        diagnostics.padded.width, diagnostics.padded.height, diagnostics.max_imaginary
    );
    if max_abs_diff > 1e-6 * image.max_abs().max(1.0) {
        warn!(
            "Methods disagree by {:.3e}, more than round-off",
            max_abs_diff
        );
    }

    Ok(Comparison {
        max_abs_diff,
        max_imaginary: diagnostics.max_imaginary,
        padded: diagnostics.padded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::{test_output_path, write_test_file};
    use fftconv::{decode_grayscale, encode_pgm, KernelKind, Method};

    fn write_input(name: &str, width: usize, height: usize) -> std::path::PathBuf {
        let image = Image::from_fn(width, height, |x, y| ((x * 37 + y * 11) % 256) as f64).unwrap();
        write_test_file(name, &encode_pgm(&image).unwrap())
    }

    fn settings(name: &str, method: Method, compare: bool) -> RunSettings {
        RunSettings {
            input: write_input(&format!("{}_in.pgm", name), 24, 16),
            output: test_output_path(&format!("{}_out.pgm", name)),
            filter: KernelKind::Emboss,
            method,
            kernel_size: 3,
            repeat: 2,
            compare,
        }
    }

    #[test]
    fn test_execute_writes_output_and_reports() {
        let settings = settings("run_execute", Method::Frequency, false);
        let report = execute(&settings).unwrap();

        assert_eq!((report.width, report.height), (24, 16));
        assert_eq!(report.repeat, 2);
        assert_eq!(report.method, Method::Frequency);
        assert!(report.average_ms >= 0.0);
        assert!(report.comparison.is_none());

        let written = decode_grayscale(&std::fs::read(&settings.output).unwrap()).unwrap();
        assert_eq!((written.width(), written.height()), (24, 16));
    }

    #[test]
    fn test_both_methods_write_identical_files() {
        let spatial = settings("run_identical_spatial", Method::Spatial, false);
        let frequency = settings("run_identical_frequency", Method::Frequency, false);
        execute(&spatial).unwrap();
        execute(&frequency).unwrap();

        let a = std::fs::read(&spatial.output).unwrap();
        let b = std::fs::read(&frequency.output).unwrap();
        let differing = a.iter().zip(&b).filter(|(x, y)| x != y).count();
        // Rounding can flip a byte only when a value sits on a .5 boundary.
        assert!(differing <= 1, "{} bytes differ", differing);
    }

    #[test]
    fn test_execute_with_compare_reports_agreement() {
        let report = execute(&settings("run_compare", Method::Spatial, true)).unwrap();
        let comparison = report.comparison.unwrap();

        assert!(comparison.max_abs_diff < 1e-9);
        assert!(comparison.max_imaginary < 1e-9);
        assert_eq!(comparison.padded.width, 32);
        assert_eq!(comparison.padded.height, 32);
    }

    #[test]
    fn test_missing_input_is_reported_with_path() {
        let mut settings = settings("run_missing", Method::Spatial, false);
        settings.input = test_output_path("run_missing_nonexistent.pgm");

        let err = execute(&settings).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("run_missing_nonexistent.pgm"), "{}", message);
    }
}

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use fftconv::{KernelKind, Method};

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(
    name = "fftconv",
    version,
    about = "Convolve a grayscale image spatially or through the FFT",
    after_help = "Example:\n  fftconv --in data/photo.ppm --out out.pgm --filter blur --kernel-size 31 --method fft --repeat 5"
)]
pub struct Cli {
    /// Input image (binary PGM P5 or PPM P6, 8-bit)
    #[arg(long = "in", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output image, written as PGM P5
    #[arg(long = "out", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Kernel: blur|sharpen|edge|emboss [default: blur]
    #[arg(long, value_name = "NAME")]
    pub filter: Option<KernelKind>,

    /// Method: spatial|frequency (aliases naive|fft) [default: spatial]
    #[arg(long, value_name = "NAME")]
    pub method: Option<Method>,

    /// Odd kernel size; sizes other than 3 only for blur [default: 3]
    #[arg(long = "kernel-size", value_name = "N")]
    pub kernel_size: Option<usize>,

    /// Number of timed runs after the warm-up run [default: 1]
    #[arg(long, value_name = "N")]
    pub repeat: Option<usize>,

    /// Also run the other method and report the largest difference
    #[arg(long)]
    pub compare: bool,

    /// YAML or JSON file with run parameters; flags override its values
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "debug" [default: info]
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write logs to rotating files in this directory
    #[arg(long = "log-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Config file values (or defaults) with explicit flags applied on top.
    pub fn resolve(&self) -> common::file_format::ConfigResult<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(&self, config: &mut RunConfig) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(kernel_size) = self.kernel_size {
            config.kernel_size = kernel_size;
        }
        if let Some(repeat) = self.repeat {
            config.repeat = repeat;
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = Some(log_dir.clone());
        }
        config.compare |= self.compare;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use common::test_utils::write_test_file;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fftconv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = parse(&[
            "--in", "a.ppm", "--out", "b.pgm", "--filter", "edge", "--method", "fft", "--repeat",
            "5", "--compare",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.input, Some(PathBuf::from("a.ppm")));
        assert_eq!(config.output, Some(PathBuf::from("b.pgm")));
        assert_eq!(config.filter, KernelKind::Edge);
        assert_eq!(config.method, Method::Frequency);
        assert_eq!(config.kernel_size, 3);
        assert_eq!(config.repeat, 5);
        assert!(config.compare);
    }

    #[test]
    fn test_omitted_flags_keep_defaults() {
        let config = parse(&[]).resolve().unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_unknown_values_are_rejected_by_parser() {
        let args = ["fftconv", "--method", "winograd"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["fftconv", "--filter", "gaussian"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["fftconv", "--kernel-size", "-3"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["fftconv", "--bogus"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = write_test_file(
            "cli_flags_override.yaml",
            b"input: from_file.ppm\noutput: from_file.pgm\nfilter: sharpen\nrepeat: 3\nlog_level: debug\n",
        );
        let path = path.to_string_lossy().into_owned();

        let config = parse(&["--config", &path, "--out", "flag.pgm", "--repeat", "7"])
            .resolve()
            .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("from_file.ppm")));
        assert_eq!(config.output, Some(PathBuf::from("flag.pgm")));
        assert_eq!(config.filter, KernelKind::Sharpen);
        assert_eq!(config.repeat, 7);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = parse(&["--config", "nowhere/config.yaml"]);
        assert!(cli.resolve().is_err());
    }
}

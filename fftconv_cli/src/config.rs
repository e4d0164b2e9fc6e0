use std::path::{Path, PathBuf};

use fftconv::{KernelKind, Method};
use serde::{Deserialize, Serialize};

/// Run parameters as read from a config file and/or the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub filter: KernelKind,
    pub method: Method,
    pub kernel_size: usize,
    pub repeat: usize,
    pub compare: bool,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            filter: KernelKind::Blur,
            method: Method::Spatial,
            kernel_size: 3,
            repeat: 1,
            compare: false,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("You must specify --in and --out")]
    MissingPath,
    #[error("--kernel-size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),
    #[error("--kernel-size {size} is only supported with --filter blur, not {filter}")]
    UnsupportedKernelSize { filter: KernelKind, size: usize },
    #[error("--repeat must be >= 1")]
    ZeroRepeat,
}

/// Validated parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub filter: KernelKind,
    pub method: Method,
    pub kernel_size: usize,
    pub repeat: usize,
    pub compare: bool,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> common::file_format::ConfigResult<Self> {
        common::file_format::load_config(path)
    }

    pub fn validate(&self) -> Result<RunSettings, SettingsError> {
        let (Some(input), Some(output)) = (&self.input, &self.output) else {
            return Err(SettingsError::MissingPath);
        };
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(SettingsError::InvalidKernelSize(self.kernel_size));
        }
        if !self.filter.supports_size(self.kernel_size) {
            return Err(SettingsError::UnsupportedKernelSize {
                filter: self.filter,
                size: self.kernel_size,
            });
        }
        if self.repeat == 0 {
            return Err(SettingsError::ZeroRepeat);
        }

        Ok(RunSettings {
            input: input.clone(),
            output: output.clone(),
            filter: self.filter,
            method: self.method,
            kernel_size: self.kernel_size,
            repeat: self.repeat,
            compare: self.compare,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::write_test_file;
    use common::FileFormat;

    fn with_paths() -> RunConfig {
        RunConfig {
            input: Some(PathBuf::from("in.ppm")),
            output: Some(PathBuf::from("out.pgm")),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_validate_once_paths_are_set() {
        let settings = with_paths().validate().unwrap();
        assert_eq!(settings.filter, KernelKind::Blur);
        assert_eq!(settings.method, Method::Spatial);
        assert_eq!(settings.kernel_size, 3);
        assert_eq!(settings.repeat, 1);
        assert!(!settings.compare);
    }

    #[test]
    fn test_missing_paths_are_rejected() {
        assert_eq!(
            RunConfig::default().validate(),
            Err(SettingsError::MissingPath)
        );
        let only_input = RunConfig {
            input: Some(PathBuf::from("in.ppm")),
            ..Default::default()
        };
        assert_eq!(only_input.validate(), Err(SettingsError::MissingPath));
    }

    #[test]
    fn test_kernel_size_rules() {
        let even = RunConfig {
            kernel_size: 4,
            ..with_paths()
        };
        assert_eq!(even.validate(), Err(SettingsError::InvalidKernelSize(4)));

        let large_edge = RunConfig {
            filter: KernelKind::Edge,
            kernel_size: 5,
            ..with_paths()
        };
        assert_eq!(
            large_edge.validate(),
            Err(SettingsError::UnsupportedKernelSize {
                filter: KernelKind::Edge,
                size: 5
            })
        );

        let large_blur = RunConfig {
            kernel_size: 51,
            ..with_paths()
        };
        assert_eq!(large_blur.validate().unwrap().kernel_size, 51);
    }

    #[test]
    fn test_zero_repeat_is_rejected() {
        let config = RunConfig {
            repeat: 0,
            ..with_paths()
        };
        assert_eq!(config.validate(), Err(SettingsError::ZeroRepeat));
    }

    #[test]
    fn test_yaml_fills_missing_fields_with_defaults() {
        let config: RunConfig = FileFormat::Yaml
            .deserialize("input: a.ppm\nmethod: fft\nkernel_size: 31\n")
            .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("a.ppm")));
        assert_eq!(config.method, Method::Frequency);
        assert_eq!(config.kernel_size, 31);
        assert_eq!(config.filter, KernelKind::Blur);
        assert_eq!(config.repeat, 1);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: common::file_format::ConfigResult<RunConfig> =
            FileFormat::Json.deserialize(r#"{"kernel": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_reads_json() {
        let path = write_test_file(
            "cli_config_from_file.json",
            br#"{"filter": "emboss", "repeat": 4, "compare": true}"#,
        );
        let config = RunConfig::from_file(&path).unwrap();

        assert_eq!(config.filter, KernelKind::Emboss);
        assert_eq!(config.repeat, 4);
        assert!(config.compare);
    }
}

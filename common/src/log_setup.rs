use std::path::Path;

use flexi_logger::{Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle};

/// Initializes the global `log` backend.
///
/// `base_level` is a flexi_logger spec such as `"info"` or `"warn, fftconv=debug"`.
/// Records go to stderr so that stdout stays free for program output. When
/// `log_dir` is given, records are also written to size-rotated files there.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging(
    base_level: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(base_level)?;

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .duplicate_to_stderr(Duplicate::All)
            .rotate(
                flexi_logger::Criterion::Size(1024 * 1024), //1MB
                flexi_logger::Naming::Timestamps,
                flexi_logger::Cleanup::KeepLogFiles(5),
            ),
        None => logger.log_to_stderr(),
    };

    logger.start()
}

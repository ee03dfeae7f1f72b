//! Common logging initialization for binaries.

use std::path::PathBuf;

use tracing::info;
use tracing_appender::rolling::Rotation;

use super::{errors::LoggingError, format_service_name, init, FileLoggingConfig, LoggerConfig};

/// Configuration parameters for logging initialization.
#[derive(Debug)]
pub struct LoggingInitConfig<'a> {
    /// Base service name
    pub service_base_name: &'a str,
    /// Optional service label to append like prod or dev
    pub service_label: Option<&'a str>,
    /// Directory for file-based logging
    pub log_dir: Option<&'a PathBuf>,
    /// Prefix for log file names
    pub log_file_prefix: Option<&'a str>,
    /// How often log files roll over, daily if unset
    pub log_rotation: Option<Rotation>,
    /// Use JSON format instead of compact
    pub json_format: Option<bool>,
    /// Send console logs to stderr
    pub use_stderr: bool,
    /// Default log file prefix if not specified in config
    pub default_log_prefix: &'a str,
}

/// Turns binary-level logging options into a [`LoggerConfig`].
pub fn logger_config(config: &LoggingInitConfig<'_>) -> LoggerConfig {
    let service_name = format_service_name(config.service_base_name, config.service_label);
    let mut lconfig = LoggerConfig::new(service_name);

    if let Some(dir) = config.log_dir {
        let prefix = config
            .log_file_prefix
            .unwrap_or(config.default_log_prefix)
            .to_string();
        let mut file_config = FileLoggingConfig::new(dir.clone(), prefix);
        if let Some(rotation) = config.log_rotation.clone() {
            file_config = file_config.with_rotation(rotation);
        }
        lconfig = lconfig.with_file_logging(file_config);
    }

    if let Some(json_format) = config.json_format {
        lconfig = lconfig.with_json_logging(json_format);
    }

    lconfig.with_stderr(config.use_stderr)
}

/// Initialize logging from binary options with all standard setup.
pub fn init_logging_from_config(config: LoggingInitConfig<'_>) -> Result<(), LoggingError> {
    let lconfig = logger_config(&config);
    let file_logging_config = lconfig.file_logging_config.clone();

    init(lconfig)?;

    if let Some(file_config) = &file_logging_config {
        info!(
            log_dir = %file_config.directory.display(),
            log_prefix = %file_config.file_name_prefix,
            rotation = ?file_config.rotation,
            "file logging enabled"
        );
    }
    Ok(())
}

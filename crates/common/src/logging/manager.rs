//! Logging initialization.

use std::{fs, io};

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::{errors::LoggingError, types::LoggerConfig};

/// Builds the filter shared by all layers: `RUST_LOG` if set, otherwise the
/// configured default level, plus any extra directives.
pub fn build_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggingError> {
    let mut filt = EnvFilter::builder()
        .with_default_directive(config.default_level.into())
        .from_env_lossy();

    for directive in &config.directives {
        let parsed = directive.parse().map_err(|source| LoggingError::Directive {
            directive: directive.clone(),
            source,
        })?;
        filt = filt.add_directive(parsed);
    }

    Ok(filt)
}

/// Initializes the global subscriber with the provided config.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = build_filter(&config)?;

    let stdout = &config.stdout_config;
    let stdout_sub = match (stdout.json_format, stdout.use_stderr) {
        (true, false) => layer()
            .json()
            .with_filter(filt.clone())
            .boxed(),
        (true, true) => layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(filt.clone())
            .boxed(),
        (false, false) => layer()
            .compact()
            .with_filter(filt.clone())
            .boxed(),
        (false, true) => layer()
            .compact()
            .with_writer(io::stderr)
            .with_filter(filt.clone())
            .boxed(),
    };

    let file_layer = match config.file_logging_config.as_ref() {
        Some(file_config) => {
            fs::create_dir_all(&file_config.directory)?;
            let file_appender = RollingFileAppender::new(
                file_config.rotation.clone(),
                &file_config.directory,
                &file_config.file_name_prefix,
            );

            let file_layer = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt)
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt)
                    .boxed()
            };
            Some(file_layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        service_version = ?config.service_version,
        "logging initialized"
    );
    Ok(())
}

use std::io;

use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid filter directive '{directive}': {source}")]
    Directive {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to create log directory: {0}")]
    LogDir(#[from] io::Error),

    #[error("global subscriber already set: {0}")]
    Init(#[from] TryInitError),
}

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{LevelFilter, SetLoggerError};
use simplelog::{ConfigBuilder, WriteLogger};
use thiserror::Error;

const LOG_FILE_NAME: &str = "grid-snake.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    AlreadyInitialized(#[from] SetLoggerError),
}

/// Default log location next to the records file.
#[must_use]
pub fn default_log_path() -> PathBuf {
    crate::store::data_dir().join(LOG_FILE_NAME)
}

/// Routes the `log` facade into `path`. The terminal is owned by the game,
/// so nothing is written to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file_error = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    let file = File::create(path).map_err(file_error)?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)?;
    Ok(())
}

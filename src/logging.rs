use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::save::current_timestamp;

pub const LOG_FILE: &str = "log.txt";

#[derive(Debug)]
struct FileLogger {
    log_path: PathBuf,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Follows `log::max_level`, so the level can change at runtime.
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "[{}] {} - {}\n",
                current_timestamp(),
                record.level(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.log_path) {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// Appends log records to `<log_dir>/log.txt`. Only the first call installs a logger.
pub fn init(log_dir: &Path, level: LevelFilter) -> Result<(), SetLoggerError> {
    if let Err(e) = create_dir_all(log_dir) {
        eprintln!("Could not create log folder {}: {e}", log_dir.display());
    }

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_path: log_dir.join(LOG_FILE),
    });

    log::set_logger(logger).map(|()| log::set_max_level(level))
}

use anyhow::{Context, Result};
use chrono::Local; // Importing Local from chrono to get the current date and time
use crossterm::style::Stylize; // Importing Stylize from crossterm to style log levels
use log::{Level, LevelFilter, Metadata, Record}; // Importing logging types from the log crate
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

// Logger that prints to stderr and appends the same lines to a file
pub struct Logger {
    log_file: Mutex<File>,
    level: LevelFilter,
}

impl Logger {
    // Install the logger as the global `log` backend
    pub fn init(log_path: &Path, level: LevelFilter) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("Cannot open log file {}", log_path.display()))?;

        let logger = Logger {
            log_file: Mutex::new(file),
            level,
        };

        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }

    // Format a log record; only the console copy gets a coloured level
    fn format_log(record: &Record, styled: bool) -> String {
        let level = record.level().to_string();
        let level = if styled {
            match record.level() {
                Level::Error => level.red().to_string(),
                Level::Warn => level.yellow().to_string(),
                Level::Info => level.green().to_string(),
                Level::Debug => level.blue().to_string(),
                Level::Trace => level.magenta().to_string(),
            }
        } else {
            level
        };

        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            record.target(),
            record.args()
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprint!("{}", Self::format_log(record, true));

        if let Ok(mut file) = self.log_file.lock() {
            let _ = file.write_all(Self::format_log(record, false).as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.log_file.lock() {
            let _ = file.flush();
        }
    }
}

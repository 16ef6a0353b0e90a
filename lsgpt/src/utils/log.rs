// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU8, Ordering};

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

impl LogLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => LogLevel::Quiet,
            (true, false) => LogLevel::Verbose,
            (false, false) => LogLevel::Normal,
        }
    }

    /// Library records let through at this level.
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Quiet => LevelFilter::Error,
            LogLevel::Normal => LevelFilter::Warn,
            LogLevel::Verbose => LevelFilter::Trace,
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Normal as u8);

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn log_level() -> LogLevel {
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Quiet,
        2 => LogLevel::Verbose,
        _ => LogLevel::Normal,
    }
}

/// Prints `log` records from the libraries on stderr.
struct CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log_level().filter()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error".red().bold(),
            Level::Warn => "warning".yellow().bold(),
            Level::Info => "info".green(),
            Level::Debug => "debug".blue(),
            Level::Trace => "trace".dimmed(),
        };
        eprintln!("[lsgpt] {tag}: {}", record.args());
    }

    fn flush(&self) {}
}

static LOGGER: CliLogger = CliLogger;

/// Installs the logger once; later calls only change the level.
pub fn init_logger(level: LogLevel) {
    set_log_level(level);
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.filter());
}

#[macro_export]
macro_rules! log_normal {
    ($($arg:tt)*) => {
            println!("[lsgpt] {}", format_args!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() != $crate::utils::LogLevel::Quiet {
            println!("[lsgpt] {}", format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() == $crate::utils::LogLevel::Verbose {
            println!("[lsgpt] {}", format_args!($($arg)*));
        }
    };
}

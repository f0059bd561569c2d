//! Module implementing logging for the application.
//!
//! Log records from the library (which uses the `log` facade) are bridged
//! into a `slog` logger that writes to standard error.

use std::sync::Mutex;

use log::{self, SetLoggerError};
use slog::{Drain, Level, LevelFilter, Logger};
use slog_scope::GlobalLoggerGuard;
use slog_term::{FullFormat, TermDecorator};


/// Initialize logging with given verbosity.
///
/// The verbosity value has the following meaning:
/// * -2 and below: only errors
/// * -1: warnings and errors
/// * 0: informational messages and above
/// * 1: debug output
/// * 2 and above: everything
///
/// The returned guard has to be kept alive for as long as logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let level = level_for(verbosity);

    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build();
    let drain = LevelFilter::new(Mutex::new(drain).fuse(), level).fuse();
    let logger = Logger::root(drain, o!("v" => env!("CARGO_PKG_VERSION")));

    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log_level(level))?;
    Ok(guard)
}


/// Map verbosity to the most verbose level of messages that are logged.
fn level_for(verbosity: isize) -> Level {
    match verbosity {
        v if v <= -2 => Level::Error,
        -1 => Level::Warning,
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Convert a `slog` level to the `log` one.
fn log_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}

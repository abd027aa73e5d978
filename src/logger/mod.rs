//! Process-wide logger behind the `error!`, `warn!`, `info!`, `debug!` and
//! `verbose!` macros.
//!
//! Cargo features decide what can be logged at all: `log-info` and
//! `log-debug` compile in the two chattier levels, `verbose` the untagged
//! printer and `file-logging` the log file sink. At runtime every record is
//! filtered by the current [`Level`], and debug records also need the debug
//! switch.

use std::fmt::{self, Arguments};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

/// Severity of a log record, least verbose first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures; always compiled in.
    Error = 1,
    /// Recoverable problems; always compiled in.
    Warn = 2,
    /// Progress messages (`log-info`).
    Info = 3,
    /// Diagnostics (`log-debug`).
    Debug = 4,
}

impl Level {
    /// Parse a level name, ignoring case. `err` and `warning` are accepted too.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Lowercase name, as written in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 | 1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn compiled_in(self) -> bool {
        match self {
            Self::Error | Self::Warn => true,
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);
static DEBUG: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static SINK: Mutex<Option<File>> = Mutex::new(None);

/// Set the most verbose level that is still written.
pub fn set_level(level: Level) {
    LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current runtime level.
#[must_use]
pub fn level() -> Level {
    Level::from_raw(LEVEL.load(Ordering::SeqCst))
}

/// Turn debug records on or off; no effect without `log-debug`.
pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::SeqCst);
}

/// Whether debug records can currently be written.
#[must_use]
pub fn is_debug_enabled() -> bool {
    cfg!(feature = "log-debug") && DEBUG.load(Ordering::SeqCst)
}

/// Turn `verbose!` output on or off; no effect without `verbose`.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Whether `verbose!` prints.
#[must_use]
pub fn is_verbose_enabled() -> bool {
    cfg!(feature = "verbose") && VERBOSE.load(Ordering::SeqCst)
}

/// Whether a record at `level` would be written right now.
#[must_use]
pub fn enabled(level: Level) -> bool {
    level.compiled_in() && level <= self::level() && (level != Level::Debug || is_debug_enabled())
}

/// Append tagged records to `path` instead of the terminal.
///
/// # Errors
/// Returns the open error, or [`io::ErrorKind::Unsupported`] when the
/// `file-logging` feature is off.
pub fn log_to_file(path: &Path) -> io::Result<()> {
    if !cfg!(feature = "file-logging") {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file logging is not compiled in",
        ));
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut sink = SINK
        .lock()
        .map_err(|_| io::Error::other("log file lock poisoned"))?;
    *sink = Some(file);
    Ok(())
}

/// Write one record; called by the logging macros.
#[doc(hidden)]
pub fn write_record(level: Level, args: Arguments) {
    if !enabled(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());

    if let Ok(mut sink) = SINK.lock() {
        if let Some(file) = sink.as_mut() {
            if writeln!(file, "{line}").and_then(|()| file.flush()).is_ok() {
                return;
            }
        }
    }

    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

#[macro_export]
/// Logs an error record.
macro_rules! error { ($($arg:tt)*) => { $crate::logger::write_record($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning record.
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::write_record($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info record.
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::write_record($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug record.
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::write_record($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints an untagged line to stdout when verbose output is on; never goes to the log file.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("ERR"), Some(Level::Error));
        assert_eq!(Level::parse(" Warning "), Some(Level::Warn));
        assert_eq!(Level::parse("info"), Some(Level::Info));
        assert_eq!(Level::parse("trace"), None);
    }

    #[test]
    fn test_level_names_round_trip() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(Level::parse(level.as_str()), Some(level));
            assert_eq!(Level::from_raw(level as u8), level);
        }
        assert!(Level::Error < Level::Debug);
        assert_eq!(Level::Warn.to_string(), "warn");
    }
}

//! Stderr logger for the `log` facade.
//!
//! Lines use the `seq|LEVEL|target|message` layout so a run can be grepped
//! and ordered even when stdout and stderr are interleaved.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Sequence counter shared by every log line
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

static LOGGER: CliLogger = CliLogger;

struct CliLogger;

/// Get next sequence number
fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

fn format_line(seq: u64, record: &Record) -> String {
    format!("{}|{}|{}|{}", seq, record.level(), record.target(), record.args())
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_line(next_seq(), record));
        }
    }

    fn flush(&self) {}
}

/// Map `-q` / repeated `-v` to a level. Warnings show by default.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

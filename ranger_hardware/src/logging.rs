//! `log` backend for the firmware. Library code logs through the `log` macros;
//! records that pass the level filter are handed to every enabled sink.

#[cfg(feature = "defmt_logger")]
mod defmt_logger;

pub use log::Level;
use log::{Metadata, Record, SetLoggerError};

struct LoggerType;

static LOGGER: LoggerType = LoggerType;

/// Installs the logger. Fails if a logger is already set.
pub fn init(level: Level) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

impl log::Log for LoggerType {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            #[cfg(feature = "defmt_logger")]
            defmt_logger::log(record);
        }
    }

    fn flush(&self) {}
}

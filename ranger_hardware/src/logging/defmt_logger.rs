use defmt::{debug, error, info, trace, warn, Display2Format};
use defmt_rtt as _;
use log::{Level, Record};

pub(super) fn log(record: &Record) {
    let target = record.target();
    let args = Display2Format(record.args());
    match record.level() {
        Level::Trace => trace!("[{=str}] {}", target, args),
        Level::Debug => debug!("[{=str}] {}", target, args),
        Level::Info => info!("[{=str}] {}", target, args),
        Level::Warn => warn!("[{=str}] {}", target, args),
        Level::Error => error!("[{=str}] {}", target, args),
    }
}

use core::fmt;

use crate::acoustics::OutOfRangeConfig;

/// Errors reported by [`RangeSensor`](crate::RangeSensor).
///
/// `E` is the error type of the platform pins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Air temperature outside of the sensor's working range. Nothing was changed.
    OutOfRangeConfig(OutOfRangeConfig),
    /// No echo pulse within the echo timeout: nothing in range.
    Timeout,
    /// The platform reported a negative pulse width.
    NegativeDuration,
    /// Pin or pulse capture failure.
    Pin(E),
}

impl<E> From<OutOfRangeConfig> for Error<E> {
    fn from(e: OutOfRangeConfig) -> Self {
        Error::OutOfRangeConfig(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRangeConfig(e) => write!(f, "{}", e),
            Error::Timeout => f.write_str("out of range"),
            Error::NegativeDuration => f.write_str("negative pulse duration"),
            Error::Pin(e) => write!(f, "pin error: {:?}", e),
        }
    }
}

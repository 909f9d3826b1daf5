use fugit::{ExtU32, MicrosDurationU32};

use crate::acoustics::{speed_of_sound_mm_per_us, DEFAULT_AIR_TEMP_C};
use crate::time::round_trip;

/// Echo timeout covering the sensor's 4 m range with margin.
pub const DEFAULT_ECHO_TIMEOUT_US: u32 = 500 * 2 * 30;

/// Multiplier applied to the round-trip time by [`SensorConfig::max_range_mm`].
pub const TIMEOUT_SAFETY_FACTOR: u32 = 2;

/// Construction parameters for a [`RangeSensor`](crate::RangeSensor).
///
/// The temperature is not validated here; that happens when the sensor is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    pub echo_timeout: MicrosDurationU32,
    pub air_temperature_c: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            echo_timeout: DEFAULT_ECHO_TIMEOUT_US.micros(),
            air_temperature_c: DEFAULT_AIR_TEMP_C,
        }
    }
}

impl SensorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echo_timeout(self, timeout: MicrosDurationU32) -> Self {
        let mut s = self;
        s.echo_timeout = timeout;
        s
    }

    pub fn echo_timeout_us(self, micros: u32) -> Self {
        self.echo_timeout(micros.micros())
    }

    pub fn air_temperature(self, celsius: f64) -> Self {
        let mut s = self;
        s.air_temperature_c = celsius;
        s
    }

    /// Sets the echo timeout from the farthest distance worth waiting for,
    /// at the temperature currently configured.
    ///
    /// Set the temperature first.
    pub fn max_range_mm(self, range_mm: u32) -> Self {
        let speed = speed_of_sound_mm_per_us(self.air_temperature_c);
        let micros = round_trip(range_mm, speed).ticks() * TIMEOUT_SAFETY_FACTOR as u64;
        self.echo_timeout_us(u32::try_from(micros).unwrap_or(u32::MAX))
    }
}

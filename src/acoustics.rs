//! Air temperature and the speed of sound derived from it.

use core::fmt;

use num_traits::Float;

/// Lowest operating temperature from the HC-SR04 datasheet.
pub const MIN_WORKING_TEMP_C: f64 = -15.0;
/// Highest operating temperature from the HC-SR04 datasheet.
pub const MAX_WORKING_TEMP_C: f64 = 70.0;
/// Temperature assumed when the caller doesn't supply one.
pub const DEFAULT_AIR_TEMP_C: f64 = 20.0;

// sqrt(gamma * R) for dry air, m/s per sqrt(K)
const SOUND_COEFFICIENT: f64 = 20.05;
const ZERO_CELSIUS_K: f64 = 273.15;

/// A temperature outside of the sensor's working envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRangeConfig {
    pub celsius: f64,
}

impl fmt::Display for OutOfRangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature {} C out of range [{}, {}]",
            self.celsius, MIN_WORKING_TEMP_C, MAX_WORKING_TEMP_C
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutOfRangeConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "temperature {=f64} C out of range", self.celsius)
    }
}

/// Checks a temperature against the working envelope, bounds included.
pub fn validate_temperature(celsius: f64) -> Result<f64, OutOfRangeConfig> {
    // NaN fails both comparisons and lands here too
    if (MIN_WORKING_TEMP_C..=MAX_WORKING_TEMP_C).contains(&celsius) {
        Ok(celsius)
    } else {
        Err(OutOfRangeConfig { celsius })
    }
}

/// Speed of sound in air at `celsius`, in millimeters per microsecond.
///
/// `c = 20.05 * sqrt(T)` m/s with `T` in Kelvin; m/s to mm/us is a division
/// by 1000.
pub fn speed_of_sound_mm_per_us(celsius: f64) -> f64 {
    let speed_m_s = SOUND_COEFFICIENT * Float::sqrt(celsius + ZERO_CELSIUS_K);
    speed_m_s / 1000.0
}

/// A validated air temperature together with the speed of sound at it.
///
/// The only way to build one is [`AirTemperature::new`], so the two values
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirTemperature {
    celsius: f64,
    sound_speed: f64,
}

impl AirTemperature {
    pub fn new(celsius: f64) -> Result<Self, OutOfRangeConfig> {
        let celsius = validate_temperature(celsius)?;
        Ok(Self {
            celsius,
            sound_speed: speed_of_sound_mm_per_us(celsius),
        })
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    /// Millimeters per microsecond.
    pub fn sound_speed(&self) -> f64 {
        self.sound_speed
    }
}

impl Default for AirTemperature {
    fn default() -> Self {
        Self {
            celsius: DEFAULT_AIR_TEMP_C,
            sound_speed: speed_of_sound_mm_per_us(DEFAULT_AIR_TEMP_C),
        }
    }
}

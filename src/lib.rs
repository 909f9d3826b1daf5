//! Driver for the HC-SR04 ultrasonic ranging sensor.
//!
//! The sensor is triggered with a short pulse on one line and answers with a
//! high pulse on another line whose width is the round-trip time of flight of
//! the ultrasonic burst. Distance is derived from that width using the speed of
//! sound at the current air temperature.
//!
//! The driver is built on `embedded-hal` 1.0: the trigger is any
//! [`OutputPin`](embedded_hal::digital::OutputPin), delays come from any
//! [`DelayNs`](embedded_hal::delay::DelayNs), and the echo is read through the
//! [`EchoPulse`] trait. [`PolledEcho`] implements it for any input pin and a
//! microsecond clock.
//!
//! ```ignore
//! let echo = PolledEcho::new(echo_pin, clock);
//! let mut sensor = RangeSensor::new(trigger_pin, echo, delay)?;
//!
//! sensor.update_temperature(24.5)?;
//! match sensor.distance_cm() {
//!     Ok(cm) => log::info!("{} cm", cm),
//!     Err(Error::Timeout) => log::warn!("nothing in range"),
//!     Err(e) => log::error!("{}", e),
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod acoustics;
pub mod config;
pub mod error;
pub mod time;
pub mod ultrasonic;

pub use acoustics::{AirTemperature, OutOfRangeConfig, MAX_WORKING_TEMP_C, MIN_WORKING_TEMP_C};
pub use config::SensorConfig;
pub use error::Error;
pub use ultrasonic::echo::{EchoPulse, MicrosClock, PolledEcho, PulseReading};
pub use ultrasonic::RangeSensor;

pub mod echo;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use fugit::{MicrosDurationU32, MicrosDurationU64};

use crate::acoustics::AirTemperature;
use crate::config::SensorConfig;
use crate::error::Error;
use echo::{EchoPulse, PulseReading};

/// Low time before the trigger pulse, lets the previous cycle settle.
pub const TRIGGER_SETTLE_US: u32 = 5;
/// Minimum trigger pulse width required by the datasheet.
pub const TRIGGER_PULSE_US: u32 = 10;

// 2 * 25.4: round trip and mm -> in
const ROUND_TRIP_MM_PER_IN: f64 = 50.8;
// 2 * 10: round trip and mm -> cm
const ROUND_TRIP_MM_PER_CM: f64 = 20.0;

/// HC-SR04 on a trigger output and an echo pulse source.
///
/// Every distance query runs a full trigger/echo cycle; nothing is cached
/// between calls and failed measurements are not retried.
pub struct RangeSensor<T, E, D> {
    trig_pin: T,
    echo: E,
    delay: D,
    echo_timeout: MicrosDurationU32,
    air: AirTemperature,
}

impl<T, E, D> RangeSensor<T, E, D>
where
    T: OutputPin,
    E: EchoPulse<Error = T::Error>,
    D: DelayNs,
{
    /// 30 ms echo timeout, air at 20 C.
    pub fn new(trig_pin: T, echo: E, delay: D) -> Result<Self, Error<T::Error>> {
        Self::with_config(trig_pin, echo, delay, SensorConfig::default())
    }

    /// Fails with [`Error::OutOfRangeConfig`] before touching any pin if the
    /// configured temperature is outside the working range.
    pub fn with_config(
        mut trig_pin: T,
        echo: E,
        delay: D,
        config: SensorConfig,
    ) -> Result<Self, Error<T::Error>> {
        let air = AirTemperature::new(config.air_temperature_c)?;
        trig_pin.set_low().map_err(Error::Pin)?;

        Ok(Self {
            trig_pin,
            echo,
            delay,
            echo_timeout: config.echo_timeout,
            air,
        })
    }

    pub fn air_temperature(&self) -> f64 {
        self.air.celsius()
    }

    /// Millimeters per microsecond at the current air temperature.
    pub fn sound_speed(&self) -> f64 {
        self.air.sound_speed()
    }

    pub fn echo_timeout(&self) -> MicrosDurationU32 {
        self.echo_timeout
    }

    /// Replaces the air temperature and the speed of sound together.
    /// On error neither changes.
    pub fn update_temperature(&mut self, celsius: f64) -> Result<(), Error<T::Error>> {
        match AirTemperature::new(celsius) {
            Ok(air) => {
                self.air = air;
                log::debug!(
                    "air {} C, sound speed {} mm/us",
                    air.celsius(),
                    air.sound_speed()
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(e.into())
            }
        }
    }

    /// Fires one trigger pulse and times the echo.
    ///
    /// If ending the trigger pulse fails, one more attempt is made to drive
    /// the trigger low before the error is returned. If that also fails the
    /// trigger may be left high.
    pub fn measure_pulse(&mut self) -> Result<MicrosDurationU64, Error<T::Error>> {
        self.trig_pin.set_low().map_err(Error::Pin)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trig_pin.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        if let Err(e) = self.trig_pin.set_low() {
            log::error!("trigger stuck high, retrying");
            let _ = self.trig_pin.set_low();
            return Err(Error::Pin(e));
        }
        log::trace!("trigger sent");

        match self
            .echo
            .pulse_width(PinState::High, self.echo_timeout)
            .map_err(Error::Pin)?
        {
            PulseReading::TimedOut => {
                log::warn!("no echo within {} us", self.echo_timeout.ticks());
                Err(Error::Timeout)
            }
            PulseReading::Width(us) if us < 0 => {
                log::error!("echo pulse reported as {} us", us);
                Err(Error::NegativeDuration)
            }
            PulseReading::Width(us) => {
                log::debug!("echo {} us", us);
                Ok(MicrosDurationU64::from_ticks(us as u64))
            }
        }
    }

    // mm travelled out and back
    fn round_trip_mm(&mut self) -> Result<f64, Error<T::Error>> {
        let pulse = self.measure_pulse()?;
        Ok(self.air.sound_speed() * pulse.ticks() as f64)
    }

    /// Distance in whole millimeters, rounded down.
    pub fn distance_mm(&mut self) -> Result<i64, Error<T::Error>> {
        let round_trip = self.round_trip_mm()?;
        // non-negative, so truncation is floor
        Ok((round_trip / 2.0) as i64)
    }

    pub fn distance_cm(&mut self) -> Result<f64, Error<T::Error>> {
        Ok(self.round_trip_mm()? / ROUND_TRIP_MM_PER_CM)
    }

    pub fn distance_in(&mut self) -> Result<f64, Error<T::Error>> {
        Ok(self.round_trip_mm()? / ROUND_TRIP_MM_PER_IN)
    }

    /// Gives back the trigger pin, echo source and delay.
    pub fn release(self) -> (T, E, D) {
        (self.trig_pin, self.echo, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustics::OutOfRangeConfig;
    use crate::ultrasonic::echo::PolledEcho;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
    use embedded_hal_mock::eh1::MockError;

    /// Echo source that always reports the same reading.
    struct FixedEcho(PulseReading);

    /// Echo source whose capture always fails.
    struct BrokenEcho;

    impl EchoPulse for BrokenEcho {
        type Error = MockError;

        fn pulse_width(
            &mut self,
            _level: PinState,
            _timeout: MicrosDurationU32,
        ) -> Result<PulseReading, Self::Error> {
            Err(MockError::Io(std::io::ErrorKind::TimedOut))
        }
    }

    impl EchoPulse for FixedEcho {
        type Error = MockError;

        fn pulse_width(
            &mut self,
            _level: PinState,
            _timeout: MicrosDurationU32,
        ) -> Result<PulseReading, Self::Error> {
            Ok(self.0)
        }
    }

    fn trigger_cycle() -> [Transaction; 3] {
        [
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]
    }

    #[test]
    fn construction_drives_trigger_low_once() {
        let trig = PinMock::new(&[Transaction::set(State::Low)]);
        let sensor =
            RangeSensor::new(trig, FixedEcho(PulseReading::TimedOut), NoopDelay).unwrap();

        assert_eq!(sensor.air_temperature(), 20.0);
        assert_eq!(sensor.echo_timeout().ticks(), 30_000);

        let (mut trig, _, _) = sensor.release();
        trig.done();
    }

    #[test]
    fn bad_temperature_touches_no_pin() {
        let trig = PinMock::new(&[]);
        let config = SensorConfig::new().air_temperature(71.0);
        let result = RangeSensor::with_config(
            trig.clone(),
            FixedEcho(PulseReading::TimedOut),
            NoopDelay,
            config,
        );

        assert!(matches!(
            result,
            Err(Error::OutOfRangeConfig(OutOfRangeConfig { celsius })) if celsius == 71.0
        ));

        let mut trig = trig;
        trig.done();
    }

    #[test]
    fn failed_update_keeps_state() {
        let trig = PinMock::new(&[Transaction::set(State::Low)]);
        let config = SensorConfig::new().air_temperature(30.0);
        let echo = FixedEcho(PulseReading::TimedOut);
        let mut sensor = RangeSensor::with_config(trig, echo, NoopDelay, config).unwrap();
        let speed = sensor.sound_speed();

        assert!(sensor.update_temperature(-16.0).is_err());
        assert!(sensor.update_temperature(f64::NAN).is_err());
        assert_eq!(sensor.air_temperature(), 30.0);
        assert_eq!(sensor.sound_speed(), speed);

        let (mut trig, _, _) = sensor.release();
        trig.done();
    }

    #[test]
    fn pin_error_surfaces() {
        let trig = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::Low)
                .with_error(MockError::Io(std::io::ErrorKind::NotConnected)),
        ]);
        let echo = FixedEcho(PulseReading::Width(100));
        let mut sensor = RangeSensor::new(trig, echo, NoopDelay).unwrap();

        assert!(matches!(sensor.distance_mm(), Err(Error::Pin(_))));

        let (mut trig, _, _) = sensor.release();
        trig.done();
    }

    #[test]
    fn echo_capture_error_surfaces() {
        let mut trig_expectations = vec![Transaction::set(State::Low)];
        trig_expectations.extend(trigger_cycle());
        let trig = PinMock::new(&trig_expectations);
        let mut sensor = RangeSensor::new(trig, BrokenEcho, NoopDelay).unwrap();

        assert!(matches!(
            sensor.distance_cm(),
            Err(Error::Pin(MockError::Io(std::io::ErrorKind::TimedOut)))
        ));

        let (mut trig, _, _) = sensor.release();
        trig.done();
    }

    #[test]
    fn failed_trigger_end_is_retried_low() {
        let trig = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low)
                .with_error(MockError::Io(std::io::ErrorKind::NotConnected)),
            Transaction::set(State::Low),
        ]);
        let echo = FixedEcho(PulseReading::Width(100));
        let mut sensor = RangeSensor::new(trig, echo, NoopDelay).unwrap();

        assert!(matches!(sensor.measure_pulse(), Err(Error::Pin(_))));

        let (mut trig, _, _) = sensor.release();
        trig.done();
    }

    #[test]
    fn measures_through_polled_echo() {
        let mut trig_expectations = vec![Transaction::set(State::Low)];
        trig_expectations.extend(trigger_cycle());
        let trig = PinMock::new(&trig_expectations);

        let echo_pin = PinMock::new(&[
            Transaction::get(State::Low),
            Transaction::get(State::High),
            Transaction::get(State::Low),
        ]);
        let clock = Ticker(0);
        let echo = PolledEcho::new(echo_pin, clock);

        let mut sensor = RangeSensor::new(trig, echo, NoopDelay).unwrap();
        // clock: 0 wait, 1000 low, 2000 high, 3000 low -> 1000 us
        let mm = sensor.distance_mm().unwrap();
        assert_eq!(mm, (sensor.sound_speed() * 1000.0 / 2.0) as i64);

        let (mut trig, echo, _) = sensor.release();
        let (mut echo_pin, _) = echo.release();
        trig.done();
        echo_pin.done();
    }

    struct Ticker(u32);

    impl echo::MicrosClock for Ticker {
        fn now(&mut self) -> echo::Instant {
            let now = echo::Instant::from_ticks(self.0);
            self.0 += 1000;
            now
        }
    }
}

//! Measuring the width of the echo pulse.

use embedded_hal::digital::{InputPin, PinState};
use fugit::{MicrosDurationU32, TimerInstantU32};

pub type Instant = TimerInstantU32<1_000_000>;

/// Outcome of waiting for a pulse on the echo line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseReading {
    /// Pulse width in microseconds. Negative values mean the platform timing
    /// went wrong.
    Width(i64),
    /// No complete pulse within the timeout.
    TimedOut,
}

/// Something that can time a pulse on the echo line.
pub trait EchoPulse {
    type Error;

    /// Waits for the line to reach `level`, then measures how long it stays
    /// there. Each phase gets `timeout` on its own.
    fn pulse_width(
        &mut self,
        level: PinState,
        timeout: MicrosDurationU32,
    ) -> Result<PulseReading, Self::Error>;
}

/// Free-running microsecond clock.
pub trait MicrosClock {
    fn now(&mut self) -> Instant;
}

#[derive(Debug, Clone, Copy)]
enum MeasurementState {
    NotStarted { since: Instant },
    Running { start: Instant },
}

/// Busy-polls an input pin against a [`MicrosClock`].
pub struct PolledEcho<P, C> {
    echo_pin: P,
    clock: C,
}

impl<P: InputPin, C: MicrosClock> PolledEcho<P, C> {
    pub fn new(echo_pin: P, clock: C) -> Self {
        Self { echo_pin, clock }
    }

    pub fn release(self) -> (P, C) {
        (self.echo_pin, self.clock)
    }

    fn at_level(&mut self, level: PinState) -> Result<bool, P::Error> {
        match level {
            PinState::High => self.echo_pin.is_high(),
            PinState::Low => self.echo_pin.is_low(),
        }
    }
}

fn expired(since: Instant, now: Instant, timeout: MicrosDurationU32) -> bool {
    now.checked_duration_since(since)
        .map_or(false, |elapsed| elapsed > timeout)
}

fn signed_width(start: Instant, end: Instant) -> i64 {
    match end.checked_duration_since(start) {
        Some(d) => d.ticks() as i64,
        None => start
            .checked_duration_since(end)
            .map_or(0, |d| -(d.ticks() as i64)),
    }
}

impl<P: InputPin, C: MicrosClock> EchoPulse for PolledEcho<P, C> {
    type Error = P::Error;

    fn pulse_width(
        &mut self,
        level: PinState,
        timeout: MicrosDurationU32,
    ) -> Result<PulseReading, Self::Error> {
        let mut state = MeasurementState::NotStarted {
            since: self.clock.now(),
        };

        loop {
            let at_level = self.at_level(level)?;
            let now = self.clock.now();

            state = match state {
                MeasurementState::NotStarted { since } => {
                    if at_level {
                        MeasurementState::Running { start: now }
                    } else if expired(since, now, timeout) {
                        return Ok(PulseReading::TimedOut);
                    } else {
                        state
                    }
                }
                MeasurementState::Running { start } => {
                    if !at_level {
                        return Ok(PulseReading::Width(signed_width(start, now)));
                    } else if expired(start, now, timeout) {
                        return Ok(PulseReading::TimedOut);
                    } else {
                        state
                    }
                }
            };
        }
    }
}

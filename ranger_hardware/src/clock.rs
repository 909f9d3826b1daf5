use fugit::ExtU32;
use stm32f4xx_hal::{
    pac::TIM2,
    timer::{CounterUs, Error},
};

use hcsr04_ranger::ultrasonic::echo::{Instant, MicrosClock};

/// TIM2 free-running at 1 MHz, timestamps echo edges.
pub struct EchoClock {
    counter: CounterUs<TIM2>,
}

impl EchoClock {
    /// TIM2 is 32 bit, so the counter wraps roughly every 71 minutes.
    /// The wrap lands one tick short of 2^32; a pulse straddling it reads 1 us long.
    pub fn start(mut counter: CounterUs<TIM2>) -> Result<Self, Error> {
        counter.start(u32::MAX.micros())?;
        Ok(Self { counter })
    }
}

impl MicrosClock for EchoClock {
    fn now(&mut self) -> Instant {
        self.counter.now()
    }
}

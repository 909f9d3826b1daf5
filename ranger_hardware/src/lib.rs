#![no_std]

use stm32f4xx_hal::{
    pac::{CorePeripherals, Peripherals, TIM2, TIM5},
    prelude::*,
    timer::{CounterUs, DelayUs, SysDelay},
};

pub mod clock;
pub mod led;
pub mod logging;
pub mod ultrasonic;

use clock::EchoClock;
use led::{BlueLed, RedLed};
use ultrasonic::{EchoPin, TriggerPin};

/// Everything the ranging firmware needs, brought up and ready.
pub struct RangerHardware {
    /// Owned by the sensor for trigger timing.
    pub delay: SysDelay,
    /// Spacing between ranging cycles.
    pub cycle_delay: DelayUs<TIM5>,
    pub red_led: RedLed,
    pub blue_led: BlueLed,

    pub trigger: TriggerPin,
    pub echo: EchoPin,
    pub clock: EchoClock,
}

impl RangerHardware {
    pub fn init(pac: Peripherals, core: CorePeripherals) -> Self {
        let rcc = pac.RCC.constrain();
        let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();
        let delay = core.SYST.delay(&clocks);
        let cycle_delay = pac.TIM5.delay_us(&clocks);

        let gpiob = pac.GPIOB.split();
        let gpiod = pac.GPIOD.split();

        let red_led = gpiod.pd14.into_push_pull_output();
        let blue_led = gpiod.pd15.into_push_pull_output();

        // The echo line is 5V; PB10 is 5V tolerant, keep a series resistor anyway.
        let trigger = gpiob.pb11.into_push_pull_output();
        let echo = gpiob.pb10.into_floating_input();

        let counter: CounterUs<TIM2> = pac.TIM2.counter_us(&clocks);
        let clock = EchoClock::start(counter).expect("TIM2 can't free-run");

        Self {
            delay,
            cycle_delay,
            red_led,
            blue_led,
            trigger,
            echo,
            clock,
        }
    }
}

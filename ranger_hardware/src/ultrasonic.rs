use stm32f4xx_hal::{
    gpio::{Input, Output, PushPull, PB10, PB11},
    timer::SysDelay,
};

use hcsr04_ranger::{PolledEcho, RangeSensor, SensorConfig};

use crate::clock::EchoClock;

pub type TriggerPin = PB11<Output<PushPull>>;
pub type EchoPin = PB10<Input>;

pub type Echo = PolledEcho<EchoPin, EchoClock>;
pub type Hcsr04 = RangeSensor<TriggerPin, Echo, SysDelay>;

pub type Error = hcsr04_ranger::Error<core::convert::Infallible>;

pub fn hcsr04(
    trigger: TriggerPin,
    echo: EchoPin,
    clock: EchoClock,
    delay: SysDelay,
    config: SensorConfig,
) -> Result<Hcsr04, Error> {
    RangeSensor::with_config(trigger, PolledEcho::new(echo, clock), delay, config)
}

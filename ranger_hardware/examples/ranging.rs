#![no_main]
#![no_std]

use panic_probe as _;

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use stm32f4xx_hal::pac;

use hcsr04_ranger::{Error, SensorConfig};
use ranger_hardware::{
    led::show_fault,
    logging::{self, Level},
    ultrasonic::hcsr04,
    RangerHardware,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

// No thermometer on the board, use the room we're in.
const AMBIENT_C: f64 = 22.0;
const MAX_RANGE_MM: u32 = 4000;
// The datasheet asks for at least 60 ms between ranging cycles.
const CYCLE_MS: u32 = 60;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().expect("Failed to get device periph");
    let cp = cortex_m::peripheral::Peripherals::take().expect("Failed to get core periph");

    logging::init(Level::Info).expect("logger already set");
    log::info!("{} v{}", NAME, VERSION);

    let hw = RangerHardware::init(dp, cp);
    let RangerHardware {
        delay,
        mut cycle_delay,
        mut red_led,
        mut blue_led,
        trigger,
        echo,
        clock,
    } = hw;

    let config = SensorConfig::new()
        .air_temperature(AMBIENT_C)
        .max_range_mm(MAX_RANGE_MM);
    let mut sensor = match hcsr04(trigger, echo, clock, delay, config) {
        Ok(s) => s,
        Err(e) => panic!("Couldn't create sensor: {}", e),
    };
    log::info!(
        "echo timeout {} us at {} C",
        sensor.echo_timeout().ticks(),
        sensor.air_temperature()
    );

    loop {
        blue_led.toggle();

        match sensor.distance_mm() {
            Ok(mm) => {
                show_fault(&mut red_led, false);
                log::info!("Distance: {} mm", mm);
            }
            Err(Error::Timeout) => {
                show_fault(&mut red_led, true);
                log::warn!("Out of range");
            }
            Err(e) => {
                show_fault(&mut red_led, true);
                log::error!("Couldn't read distance: {}", e);
            }
        }

        DelayNs::delay_ms(&mut cycle_delay, CYCLE_MS);
    }
}

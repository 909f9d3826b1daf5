use stm32f4xx_hal::gpio::{Output, PushPull, PD14, PD15};

pub type RedLed = PD14<Output<PushPull>>;
pub type BlueLed = PD15<Output<PushPull>>;

/// Lights while the last reading was a failure.
pub fn show_fault(led: &mut RedLed, fault: bool) {
    if fault {
        led.set_high();
    } else {
        led.set_low();
    }
}

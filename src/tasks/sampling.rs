use defmt::{info, warn, Debug2Format};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::{ADC1, GPIO2, GPIO3, GPIO4, GPIO5};
use esp_hal::rmt::Channel as RmtChannel;
use esp_hal::Blocking;

use crate::hal::{EmbassyMillis, ShieldAdc};
use crate::led::Led;
use crate::sensor::{MyoWare, OutputType};

/// ADC1 with ENV on GPIO2, RAW on GPIO3, REF on GPIO4 and RECT on GPIO5.
pub type BoardAdc = ShieldAdc<
    'static,
    ADC1<'static>,
    GPIO2<'static>,
    GPIO3<'static>,
    GPIO4<'static>,
    GPIO5<'static>,
>;

pub type StatusLed = Led<RmtChannel<Blocking, 0>>;

/// The sensor loop: read every wired output, log it, keep the heartbeat going.
#[embassy_executor::task]
pub async fn sampling_task(
    mut myoware: MyoWare<BoardAdc>,
    mut led: StatusLed,
    sample_period_ms: u32,
    blink_period_ms: u32,
) {
    let clock = EmbassyMillis;
    let outputs: &[OutputType] = if myoware.config().rect_pin().is_some() {
        &[OutputType::Envelope, OutputType::Raw, OutputType::Rectified]
    } else {
        &[OutputType::Envelope, OutputType::Raw]
    };
    let unit = if myoware.config().convert_output() { "mV" } else { "codes" };

    info!(
        "Sampling {} MyoWare outputs every {} ms ({})",
        outputs.len(),
        sample_period_ms,
        unit
    );

    loop {
        for &output in outputs {
            match myoware.read_output(output) {
                Ok(value) => info!("{}: {}", output, value),
                Err(e) => warn!("{} read failed: {}", output, Debug2Format(&e)),
            }
        }

        if let Err(e) = myoware.blink_status_led(&mut led, &clock, blink_period_ms) {
            warn!("Status LED write failed: {}", Debug2Format(&e));
        }

        Timer::after(Duration::from_millis(u64::from(sample_period_ms))).await;
    }
}

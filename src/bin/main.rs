#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::{info, warn, Display2Format};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::clock::CpuClock;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal::timer::systimer::SystemTimer;
use esp_myoware_emg::config::board::CONFIG;
use esp_myoware_emg::hal::ShieldAdc;
use esp_myoware_emg::led::Led;
use esp_myoware_emg::tasks::sampling::sampling_task;
use esp_myoware_emg::{MyoWare, SensorConfig};
use panic_rtt_target as _;
use smart_leds::RGB8;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    rtt_target::rtt_init_defmt!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    info!("Embassy initialized!");

    let sensor_config = SensorConfig::from(&CONFIG);
    if let Err(e) = sensor_config.validate() {
        warn!("Sensor config rejected, readings will be meaningless: {}", Display2Format(&e));
    }
    info!(
        "MyoWare: ENV gain {}, {} V per ADC code",
        sensor_config.env_gain(),
        sensor_config.volts_per_code()
    );

    // ── ADC1: the pin numbers in cfg.toml must name the GPIOs wired here ──────
    let mut adc_config = AdcConfig::new();
    let env = adc_config.enable_pin(peripherals.GPIO2, Attenuation::_11dB);
    let raw = adc_config.enable_pin(peripherals.GPIO3, Attenuation::_11dB);
    let reference = adc_config.enable_pin(peripherals.GPIO4, Attenuation::_11dB);
    let rect = adc_config.enable_pin(peripherals.GPIO5, Attenuation::_11dB);
    let adc = Adc::new(peripherals.ADC1, adc_config);

    let shield = ShieldAdc::new(
        adc,
        (CONFIG.env_pin, env),
        (CONFIG.raw_pin, raw),
        (CONFIG.ref_pin, reference),
        (CONFIG.rect_pin, rect),
    );

    // ── status LED: on-board WS2812 on GPIO8 ──────────────────────────────────
    let rmt = Rmt::new(peripherals.RMT, Rate::from_mhz(80)).expect("Failed to initialize RMT");
    let led = Led::new_ws2812(
        rmt.channel0,
        peripherals.GPIO8,
        CONFIG.status_led_pin,
        RGB8::new(0, 30, 0),
    );

    let myoware = MyoWare::new(shield, sensor_config);
    spawner
        .spawn(sampling_task(
            myoware,
            led,
            CONFIG.sample_period_ms,
            CONFIG.blink_period_ms,
        ))
        .unwrap();

    // Nothing else to do here; park the main task.
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

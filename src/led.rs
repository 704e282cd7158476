use embedded_hal::digital::PinState;

#[cfg(feature = "esp32c6")]
use esp_hal_smartled::{smart_led_buffer, SmartLedsAdapter};
#[cfg(feature = "esp32c6")]
use smart_leds::{RGB8, SmartLedsWrite};
#[cfg(feature = "esp32c6")]
pub(crate) use esp_hal::rmt::{TxChannel, TxChannelCreator};
#[cfg(feature = "esp32c6")]
use esp_hal::gpio::OutputPin;

use crate::hal::PinId;
#[cfg(feature = "esp32c6")]
use crate::hal::DigitalWrite;

/// Full on/off cycle used when the caller has no preference.
pub const DEFAULT_BLINK_PERIOD_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "esp32c6", derive(defmt::Format))]
pub enum LedError {
    #[error("LED is on pin {led}, not pin {requested}")]
    WrongPin { led: PinId, requested: PinId },
    #[error("failed to push color to the WS2812")]
    Write,
}

/// Non-blocking blink timer for the status LED.
///
/// Holds only the last toggle time and the level to drive next; the caller
/// polls it from its own loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBlink {
    last_toggle_ms: u32,
    next_level: PinState,
}

impl Default for StatusBlink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBlink {
    /// Starts at t = 0 ms with the LED due to switch on first.
    pub const fn new() -> Self {
        Self {
            last_toggle_ms: 0,
            next_level: PinState::High,
        }
    }

    /// Level to drive if more than `period_ms` has passed since the last
    /// toggle. Elapsed time uses wrapping subtraction, so a counter rollover
    /// between toggles is harmless.
    pub fn due(&self, now_ms: u32, period_ms: u32) -> Option<PinState> {
        (now_ms.wrapping_sub(self.last_toggle_ms) > period_ms).then_some(self.next_level)
    }

    /// Records a toggle performed at `now_ms` and flips the next level.
    pub fn mark_toggled(&mut self, now_ms: u32) {
        self.last_toggle_ms = now_ms;
        self.next_level = match self.next_level {
            PinState::High => PinState::Low,
            PinState::Low => PinState::High,
        };
    }

    pub fn last_toggle_ms(&self) -> u32 {
        self.last_toggle_ms
    }

    pub fn next_level(&self) -> PinState {
        self.next_level
    }
}

#[cfg(feature = "esp32c6")]
/// On-board WS2812 of the ESP32-C6 DevKit, used as a plain on/off status LED.
pub struct Led<TX>
where
    TX: TxChannel,
{
    ws2812: SmartLedsAdapter<TX, 25>,
    pin: PinId,
    color: RGB8,
}

#[cfg(feature = "esp32c6")]
impl<TX> Led<TX>
where
    TX: TxChannel,
{
    /// Create a new LED on `pin`, lit with `color` whenever it is driven high.
    pub fn new_ws2812<C, O>(channel: C, pin: O, pin_id: PinId, color: RGB8) -> Self
    where
        C: TxChannelCreator<'static, TX>,
        O: OutputPin + 'static,
    {
        let led_adapter = SmartLedsAdapter::new(channel, pin, smart_led_buffer!(1));
        Self {
            ws2812: led_adapter,
            pin: pin_id,
            color,
        }
    }

    pub fn set_color_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LedError> {
        self.ws2812
            .write([RGB8::new(r, g, b)].iter().cloned())
            .map_err(|_| LedError::Write)
    }
}

#[cfg(feature = "esp32c6")]
impl<TX> DigitalWrite for Led<TX>
where
    TX: TxChannel,
{
    type Error = LedError;

    fn digital_write(&mut self, pin: PinId, level: PinState) -> Result<(), Self::Error> {
        if pin != self.pin {
            return Err(LedError::WrongPin {
                led: self.pin,
                requested: pin,
            });
        }
        let RGB8 { r, g, b } = match level {
            PinState::High => self.color,
            PinState::Low => RGB8::new(0, 0, 0),
        };
        self.set_color_rgb(r, g, b)
    }
}
